//! Heap collections.
//!
//! [`MaxHeap`] is the single-owner structure; [`SharedMaxHeap`] wraps it in a
//! reader-writer lock for callers that need to share one heap across threads.

pub mod max_heap;
pub mod shared;

pub use max_heap::MaxHeap;
pub use shared::SharedMaxHeap;
