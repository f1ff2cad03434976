//! Object value type.

use core::fmt::{self, Debug, Formatter};
use core::ops::{Index, IndexMut, Range};

use indexmap::IndexMap;

use crate::string::VString;
use crate::value::Value;

/// An insertion-ordered mapping from unique string keys to values.
///
/// Replacing the value of an existing key keeps its position; removing a key shifts the
/// members after it.
#[derive(Clone, Default)]
pub struct VObject {
    map: IndexMap<VString, Value>,
}

impl VObject {
    /// Creates a new empty object.
    #[must_use]
    pub fn new() -> Self {
        VObject {
            map: IndexMap::new(),
        }
    }

    /// Creates a new object with room for `cap` members.
    #[must_use]
    pub fn with_capacity(cap: usize) -> Self {
        VObject {
            map: IndexMap::with_capacity(cap),
        }
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the object is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Ensures room for at least `cap` members in total.
    pub fn reserve(&mut self, cap: usize) {
        self.map.reserve(cap.saturating_sub(self.map.len()));
    }

    /// Gets a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    /// Gets a mutable value by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.map.get_mut(key)
    }

    /// Gets a key-value pair by key.
    #[must_use]
    pub fn get_key_value(&self, key: &str) -> Option<(&VString, &Value)> {
        self.map.get_key_value(key)
    }

    /// Returns the position of `key`, if present.
    #[must_use]
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.map.get_index_of(key)
    }

    /// Returns the member at `index` in insertion order.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&VString, &Value)> {
        self.map.get_index(index)
    }

    /// Checks if the object contains a key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Inserts a key-value pair. Returns the old value if the key existed.
    pub fn insert(&mut self, key: impl Into<VString>, value: impl Into<Value>) -> Option<Value> {
        self.map.insert(key.into(), value.into())
    }

    /// Returns the value for `key`, inserting `f()` first if it is missing.
    pub fn get_or_insert_with(&mut self, key: &str, f: impl FnOnce() -> Value) -> &mut Value {
        let index = match self.map.get_index_of(key) {
            Some(index) => index,
            None => self.map.insert_full(VString::new(key), f()).0,
        };
        &mut self.map[index]
    }

    /// Removes a key-value pair. Returns the value if the key existed.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.map.shift_remove(key)
    }

    /// Removes and returns a key-value pair.
    pub fn remove_entry(&mut self, key: &str) -> Option<(VString, Value)> {
        self.map.shift_remove_entry(key)
    }

    /// Removes the members at positions in `range`, clamped to the current length.
    pub fn remove_range(&mut self, range: Range<usize>) {
        let end = range.end.min(self.map.len());
        let start = range.start.min(end);
        self.map.drain(start..end);
    }

    /// Clears the object.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Shrinks the capacity to match the length.
    pub fn shrink_to_fit(&mut self) {
        self.map.shrink_to_fit();
    }

    /// Returns an iterator over keys.
    pub fn keys(&self) -> Keys<'_> {
        Keys(self.map.keys())
    }

    /// Returns an iterator over values.
    pub fn values(&self) -> Values<'_> {
        Values(self.map.values())
    }

    /// Returns an iterator over mutable values.
    pub fn values_mut(&mut self) -> ValuesMut<'_> {
        ValuesMut(self.map.values_mut())
    }

    /// Returns an iterator over key-value pairs.
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.map.iter())
    }

    /// Returns an iterator over mutable key-value pairs.
    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut(self.map.iter_mut())
    }
}

// === Iterators ===

macro_rules! forward_iterator {
    ($(#[$meta:meta])* $name:ident<$a:lifetime>, $inner:ty, $item:ty) => {
        $(#[$meta])*
        pub struct $name<$a>($inner);

        impl<$a> Iterator for $name<$a> {
            type Item = $item;

            #[inline]
            fn next(&mut self) -> Option<Self::Item> {
                self.0.next()
            }

            #[inline]
            fn size_hint(&self) -> (usize, Option<usize>) {
                self.0.size_hint()
            }
        }

        impl DoubleEndedIterator for $name<'_> {
            #[inline]
            fn next_back(&mut self) -> Option<Self::Item> {
                self.0.next_back()
            }
        }

        impl ExactSizeIterator for $name<'_> {}
    };
}

forward_iterator!(
    /// Iterator over object keys.
    Keys<'a>, indexmap::map::Keys<'a, VString, Value>, &'a VString
);
forward_iterator!(
    /// Iterator over object values.
    Values<'a>, indexmap::map::Values<'a, VString, Value>, &'a Value
);
forward_iterator!(
    /// Iterator over mutable object values.
    ValuesMut<'a>, indexmap::map::ValuesMut<'a, VString, Value>, &'a mut Value
);
forward_iterator!(
    /// Iterator over object members.
    Iter<'a>, indexmap::map::Iter<'a, VString, Value>, (&'a VString, &'a Value)
);
forward_iterator!(
    /// Iterator over object members with mutable values.
    IterMut<'a>, indexmap::map::IterMut<'a, VString, Value>, (&'a VString, &'a mut Value)
);

impl IntoIterator for VObject {
    type Item = (VString, Value);
    type IntoIter = indexmap::map::IntoIter<VString, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl<'a> IntoIterator for &'a VObject {
    type Item = (&'a VString, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut VObject {
    type Item = (&'a VString, &'a mut Value);
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// === Index ===

impl Index<&str> for VObject {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).expect("key not found")
    }
}

impl IndexMut<&str> for VObject {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        self.get_mut(key).expect("key not found")
    }
}

// === Comparison ===

impl PartialEq for VObject {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(k, v)| other.get(k.as_str()).is_some_and(|o| o == v))
    }
}

impl Debug for VObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// === FromIterator / Extend ===

impl<K: Into<VString>, V: Into<Value>> FromIterator<(K, V)> for VObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut obj = VObject::new();
        obj.extend(iter);
        obj
    }
}

impl<K: Into<VString>, V: Into<Value>> Extend<(K, V)> for VObject {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
