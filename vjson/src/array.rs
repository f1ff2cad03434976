//! Array value type.

use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter};
use core::ops::{Deref, DerefMut, Index, IndexMut, Range};
use core::slice::SliceIndex;

use crate::value::Value;

/// An ordered, index-addressable, resizable sequence of values.
#[derive(Clone, Default, PartialEq)]
pub struct VArray {
    items: Vec<Value>,
}

impl VArray {
    /// Creates a new empty array.
    #[must_use]
    pub const fn new() -> Self {
        VArray { items: Vec::new() }
    }

    /// Creates a new array with the specified capacity.
    #[must_use]
    pub fn with_capacity(cap: usize) -> Self {
        VArray {
            items: Vec::with_capacity(cap),
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the array is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Returns the elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    /// Returns the elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [Value] {
        &mut self.items
    }

    /// Ensures room for at least `cap` elements in total.
    pub fn reserve(&mut self, cap: usize) {
        self.items.reserve(cap.saturating_sub(self.items.len()));
    }

    /// Pushes an element to the back.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.items.push(value.into());
    }

    /// Pops an element from the back.
    pub fn pop(&mut self) -> Option<Value> {
        self.items.pop()
    }

    /// Inserts an element at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: impl Into<Value>) {
        self.items.insert(index, value.into());
    }

    /// Removes and returns the element at the given index, if any.
    pub fn remove(&mut self, index: usize) -> Option<Value> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Removes the elements in `range`, clamped to the current length.
    pub fn remove_range(&mut self, range: Range<usize>) {
        let end = range.end.min(self.items.len());
        let start = range.start.min(end);
        self.items.drain(start..end);
    }

    /// Clears the array.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Truncates the array to the given length.
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// Resizes to `len` elements, filling new slots with clones of `fill`.
    pub fn resize(&mut self, len: usize, fill: Value) {
        self.items.resize(len, fill);
    }

    /// Gets an element by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Gets a mutable element by index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index)
    }

    /// Shrinks the capacity to match the length.
    pub fn shrink_to_fit(&mut self) {
        self.items.shrink_to_fit();
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> core::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Returns an iterator over mutable references to the elements.
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Value> {
        self.items.iter_mut()
    }

    /// Converts into the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }
}

// === Iteration ===

impl IntoIterator for VArray {
    type Item = Value;
    type IntoIter = alloc::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a VArray {
    type Item = &'a Value;
    type IntoIter = core::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut VArray {
    type Item = &'a mut Value;
    type IntoIter = core::slice::IterMut<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// === Deref ===

impl Deref for VArray {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.items
    }
}

impl DerefMut for VArray {
    fn deref_mut(&mut self) -> &mut [Value] {
        &mut self.items
    }
}

impl AsRef<[Value]> for VArray {
    fn as_ref(&self) -> &[Value] {
        &self.items
    }
}

// === Index ===

impl<I: SliceIndex<[Value]>> Index<I> for VArray {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        &self.items[index]
    }
}

impl<I: SliceIndex<[Value]>> IndexMut<I> for VArray {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.items[index]
    }
}

impl Debug for VArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

// === FromIterator / Extend ===

impl<T: Into<Value>> FromIterator<T> for VArray {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        VArray {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<T: Into<Value>> Extend<T> for VArray {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter.into_iter().map(Into::into));
    }
}

// === From implementations ===

impl<T: Into<Value>> From<Vec<T>> for VArray {
    fn from(vec: Vec<T>) -> Self {
        vec.into_iter().collect()
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for VArray {
    fn from(slice: &[T]) -> Self {
        slice.iter().cloned().collect()
    }
}
