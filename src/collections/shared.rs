//! `SharedMaxHeap` - a [`MaxHeap`] that can be shared across threads.
//!
//! `MaxHeap` itself does no synchronization. This wrapper serializes every
//! mutation behind the write half of a `parking_lot::RwLock`, while queries
//! share the read half and may run concurrently with one another.

use crate::collections::MaxHeap;
use crate::error::Result;
use parking_lot::{RwLock, RwLockReadGuard};

/// A reader-writer-locked max-heap.
pub struct SharedMaxHeap<T> {
    inner: RwLock<MaxHeap<T>>,
}

impl<T> SharedMaxHeap<T> {
    /// Creates an empty shared heap.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MaxHeap::new()),
        }
    }

    /// Returns the number of elements in the heap.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Locks the heap for reading.
    ///
    /// Mutations block until the returned guard is dropped.
    pub fn read(&self) -> RwLockReadGuard<'_, MaxHeap<T>> {
        self.inner.read()
    }

    /// Consumes the lock, returning the heap.
    pub fn into_inner(self) -> MaxHeap<T> {
        self.inner.into_inner()
    }
}

impl<T: Clone> SharedMaxHeap<T> {
    /// Returns a clone of the greatest element.
    pub fn peek(&self) -> Option<T> {
        self.inner.read().peek().cloned()
    }

    /// Copies the current contents in storage order.
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.read().as_slice().to_vec()
    }
}

impl<T: Ord> SharedMaxHeap<T> {
    /// See [`MaxHeap::insert`].
    pub fn insert(&self, value: T) {
        self.inner.write().insert(value);
    }

    /// See [`MaxHeap::extract_max`].
    ///
    /// # Errors
    /// Returns [`crate::HeapError::EmptyCollection`] if the heap is empty.
    pub fn extract_max(&self) -> Result<T> {
        self.inner.write().extract_max()
    }

    /// See [`MaxHeap::build_heap`].
    pub fn build_heap<I>(&self, data: I)
    where
        I: IntoIterator<Item = T>,
    {
        // Collect outside the lock so a slow iterator doesn't stall readers.
        let data: Vec<T> = data.into_iter().collect();
        *self.inner.write() = MaxHeap::from(data);
    }

    /// See [`MaxHeap::update`].
    ///
    /// # Errors
    /// Returns [`crate::HeapError::IndexOutOfRange`] if `index >= len()`.
    pub fn update(&self, index: usize, value: T) -> Result<T> {
        self.inner.write().update(index, value)
    }

    /// See [`MaxHeap::remove`].
    ///
    /// # Errors
    /// Returns [`crate::HeapError::IndexOutOfRange`] if `index >= len()`.
    pub fn remove(&self, index: usize) -> Result<T> {
        self.inner.write().remove(index)
    }

    /// See [`MaxHeap::is_heap_valid`]; holds only the read lock.
    pub fn is_heap_valid(&self) -> bool {
        self.inner.read().is_heap_valid()
    }
}

impl<T> Default for SharedMaxHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<MaxHeap<T>> for SharedMaxHeap<T> {
    fn from(heap: MaxHeap<T>) -> Self {
        Self {
            inner: RwLock::new(heap),
        }
    }
}
