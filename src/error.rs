//! Error type shared by the heap collections.

use core::fmt;

/// The error type for heap operations that can fail.
///
/// Every fallible operation validates its input before touching the heap,
/// so receiving an error means the heap is exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The heap holds no elements.
    EmptyCollection,
    /// `index` does not address an element of a heap of length `len`.
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Length of the heap at the time of the call.
        len: usize,
    },
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyCollection => f.write_str("heap is empty"),
            HeapError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for heap of length {len}")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// Result alias for heap operations.
pub type Result<T> = core::result::Result<T, HeapError>;
