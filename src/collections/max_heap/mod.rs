//! `MaxHeap` - an array-backed binary max-heap with indexed update and removal.
//!
//! Elements are stored in a single `Vec` in implicit complete-binary-tree
//! order: the parent of index `i` is `(i - 1) / 2` and its children are
//! `2i + 1` and `2i + 2`. Every public operation returns with the max-heap
//! invariant restored, so `as_slice()[0]` is always the greatest element.
//!
//! Time Complexity:
//! - `insert` / `extract_max` / `update` / `remove`: O(log n)
//! - `build_heap`: O(n)
//! - `peek`: O(1)
//!
//! Indices handed out by [`MaxHeap::as_slice`] are only meaningful until the
//! next mutation, since any operation may move any element.

use crate::error::{HeapError, Result};
use core::cmp::Ordering;
use core::{fmt, mem, slice};
use serde::{Deserialize, Deserializer, Serialize, Serializer};


/// A binary max-heap over a totally ordered element type.
#[derive(Clone)]
pub struct MaxHeap<T> {
    data: Vec<T>,
}

#[inline]
fn parent_of(node: usize) -> usize {
    (node - 1) / 2
}

impl<T> MaxHeap<T> {
    /// Creates an empty heap.
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates an empty heap with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of elements in the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the heap is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of elements the heap can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Returns the greatest element, or `None` if the heap is empty.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Read-only view of the heap in storage order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterates over the elements in storage order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Drops all elements, keeping the allocation.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Consumes the heap, returning the backing vector in storage order.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.data.len() {
            Ok(())
        } else {
            Err(HeapError::IndexOutOfRange {
                index,
                len: self.data.len(),
            })
        }
    }
}

impl<T: Ord> MaxHeap<T> {
    /// Pushes `value` onto the heap.
    pub fn insert(&mut self, value: T) {
        self.data.push(value);
        self.sift_up(self.data.len() - 1);
    }

    /// Removes and returns the greatest element.
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyCollection`] if the heap is empty.
    pub fn extract_max(&mut self) -> Result<T> {
        let last = self.data.pop().ok_or(HeapError::EmptyCollection)?;
        if self.data.is_empty() {
            return Ok(last);
        }
        let max = mem::replace(&mut self.data[0], last);
        self.sift_down(0);
        Ok(max)
    }

    /// Replaces the whole contents of the heap with `data` and heapifies it
    /// bottom-up in linear time.
    pub fn build_heap<I>(&mut self, data: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.data.clear();
        self.data.extend(data);
        self.rebuild();
    }

    /// Overwrites the element at `index` with `value`, returning the old one.
    ///
    /// A larger value is sifted toward the root, a smaller one toward the
    /// leaves; an equal value leaves the layout untouched.
    ///
    /// # Errors
    /// Returns [`HeapError::IndexOutOfRange`] if `index >= len()`.
    pub fn update(&mut self, index: usize, value: T) -> Result<T> {
        self.check_index(index)?;
        let old = mem::replace(&mut self.data[index], value);
        let ordering = self.data[index].cmp(&old);
        match ordering {
            Ordering::Greater => {
                self.sift_up(index);
            }
            Ordering::Less => {
                self.sift_down(index);
            }
            Ordering::Equal => {}
        }
        heap_trace!(index, ?ordering, "updated element");
        Ok(old)
    }

    /// Removes and returns the element at `index`.
    ///
    /// The last element fills the hole and is then moved up or down,
    /// whichever direction it violates the invariant in.
    ///
    /// # Errors
    /// Returns [`HeapError::IndexOutOfRange`] if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        self.check_index(index)?;
        let removed = self.data.swap_remove(index);
        if index < self.data.len() {
            self.restore(index);
        }
        heap_trace!(index, len = self.data.len(), "removed element");
        Ok(removed)
    }

    /// Returns `true` if every parent is greater than or equal to its children.
    pub fn is_heap_valid(&self) -> bool {
        self.first_violation().is_none()
    }

    /// Returns the first child index (in storage order) whose element is
    /// greater than its parent's.
    pub fn first_violation(&self) -> Option<usize> {
        (1..self.data.len()).find(|&child| self.data[parent_of(child)] < self.data[child])
    }

    /// Parallel version of [`MaxHeap::is_heap_valid`].
    #[cfg(feature = "parallel")]
    pub fn par_is_heap_valid(&self) -> bool
    where
        T: Sync,
    {
        use rayon::prelude::*;

        (1..self.data.len())
            .into_par_iter()
            .all(|child| self.data[parent_of(child)] >= self.data[child])
    }

    /// Consumes the heap and returns its elements in ascending order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut end = self.data.len();
        while end > 1 {
            end -= 1;
            self.data.swap(0, end);
            sift_down_range(&mut self.data[..end], 0);
        }
        self.data
    }

    fn rebuild(&mut self) {
        for node in (0..self.data.len() / 2).rev() {
            self.sift_down(node);
        }
        heap_trace!(len = self.data.len(), "heapified bottom-up");
    }

    fn restore(&mut self, node: usize) -> usize {
        if node > 0 && self.data[node] > self.data[parent_of(node)] {
            self.sift_up(node)
        } else {
            self.sift_down(node)
        }
    }

    /// Moves the element at `node` toward the root; returns where it settled.
    fn sift_up(&mut self, mut node: usize) -> usize {
        while node > 0 {
            let parent = parent_of(node);
            if self.data[node] > self.data[parent] {
                self.data.swap(node, parent);
                node = parent;
            } else {
                break;
            }
        }
        node
    }

    fn sift_down(&mut self, node: usize) -> usize {
        sift_down_range(&mut self.data, node)
    }
}

/// Moves `data[node]` toward the leaves of the heap laid out in `data`;
/// returns where it settled.
fn sift_down_range<T: Ord>(data: &mut [T], mut node: usize) -> usize {
    let len = data.len();
    loop {
        let left = 2 * node + 1;
        if left >= len {
            break;
        }
        let right = left + 1;

        let mut largest = node;
        if data[left] > data[largest] {
            largest = left;
        }
        if right < len && data[right] > data[largest] {
            largest = right;
        }

        if largest == node {
            break;
        }
        data.swap(node, largest);
        node = largest;
    }
    node
}

impl<T> Default for MaxHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for MaxHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaxHeap")
            .field("len", &self.len())
            .field("data", &self.data)
            .finish()
    }
}

impl<T: Ord> From<Vec<T>> for MaxHeap<T> {
    /// Heapifies `data` in place in linear time.
    fn from(data: Vec<T>) -> Self {
        let mut heap = Self { data };
        heap.rebuild();
        heap
    }
}

impl<T> From<MaxHeap<T>> for Vec<T> {
    fn from(heap: MaxHeap<T>) -> Self {
        heap.data
    }
}

impl<T: Ord> FromIterator<T> for MaxHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T: Ord> Extend<T> for MaxHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.data.reserve(iter.size_hint().0);
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> IntoIterator for MaxHeap<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a MaxHeap<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T: Serialize> Serialize for MaxHeap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for MaxHeap<T>
where
    T: Deserialize<'de> + Ord,
{
    /// The sequence is re-heapified, so any element order yields a valid heap.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from)
    }
}
