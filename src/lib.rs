//! # `maxheap` - Array-Backed Binary Max-Heap
//!
//! A mutable binary max-heap stored in one contiguous `Vec`, supporting
//! insertion, maximum extraction, linear-time bulk construction, and update or
//! removal of the element at an arbitrary index.
//!
//! ## Layout
//!
//! The heap is an implicit complete binary tree: the element at index `i` has
//! its parent at `(i - 1) / 2` and its children at `2i + 1` and `2i + 2`.
//! After every public operation each parent compares greater than or equal to
//! both of its children (the max-heap invariant), which
//! [`MaxHeap::is_heap_valid`] checks.
//!
//! ## Errors
//!
//! Fallible operations return [`Result`] with a [`HeapError`]:
//! - [`HeapError::EmptyCollection`] from `extract_max` on an empty heap.
//! - [`HeapError::IndexOutOfRange`] from `update` and `remove`.
//!
//! An error never leaves the heap partially modified.
//!
//! ## Features
//!
//! - `tracing`: emit `trace`-level events from bulk builds, updates and removals.
//! - `parallel`: adds [`MaxHeap::par_is_heap_valid`] backed by `rayon`.
//!
//! ## Example
//!
//! ```rust
//! use maxheap::{HeapError, MaxHeap};
//!
//! let mut heap = MaxHeap::new();
//! heap.build_heap(vec![3, 1, 4, 1, 5, 9, 2, 6]);
//! assert!(heap.is_heap_valid());
//!
//! assert_eq!(heap.extract_max(), Ok(9));
//! heap.insert(10);
//! assert_eq!(heap.extract_max(), Ok(10));
//!
//! heap.update(0, -100).unwrap();
//! assert_eq!(heap.peek(), Some(&5));
//!
//! assert_eq!(
//!     heap.remove(42),
//!     Err(HeapError::IndexOutOfRange { index: 42, len: 7 })
//! );
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

/// Emits a `tracing::trace!` event when the `tracing` feature is enabled.
macro_rules! heap_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    };
}

pub mod collections;
pub mod error;

pub use collections::{MaxHeap, SharedMaxHeap};
pub use error::{HeapError, Result};

// The heap adds nothing on top of its backing vector.
const _: () = {
    use core::mem;

    assert!(mem::size_of::<MaxHeap<i32>>() == mem::size_of::<Vec<i32>>());
    assert!(mem::align_of::<MaxHeap<u64>>() == mem::align_of::<Vec<u64>>());
};
