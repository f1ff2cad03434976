//! The [`Value`] façade: construction, typed access, mutation and traversal.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter};
use core::ops::{Index, IndexMut, Range};

use crate::array::VArray;
use crate::convert::FromValue;
use crate::error::{Error, ErrorKind, Operation, Result};
use crate::extension::{Extension, ExtensionPayload};
use crate::handler::{ContentHandler, Scalar};
use crate::object::{self, VObject};
use crate::string::VString;
use crate::variant::{Tag, Variant};
use crate::writer::WriteOptions;

/// Shared read-only null handed out by [`Value::get`] for missing members.
static NULL: Value = Value::NULL;

/// A JSON document node.
///
/// Exactly one representation is active at a time (see [`Tag`]). Cloning is a deep copy;
/// [`take`](Value::take) moves the contents out and leaves `null` behind.
///
/// Three numeric representations (`i64`, `u64`, `f64`) are stored as given. Equality compares
/// them by numeric value, so `Value::from(5i64) == Value::from(5.0)`, while a negative `i64`
/// never equals any `u64`.
///
/// [`Value::empty_object`] (also the [`Default`]) is an object that has not allocated storage
/// yet. It reads exactly like an empty object and turns into a real one on the first mutation.
#[derive(Clone, PartialEq)]
#[repr(transparent)]
pub struct Value {
    pub(crate) var: Variant,
}

impl Value {
    /// JSON `null`.
    pub const NULL: Value = Value { var: Variant::Null };

    /// JSON `true`.
    pub const TRUE: Value = Value {
        var: Variant::Bool(true),
    };

    /// JSON `false`.
    pub const FALSE: Value = Value {
        var: Variant::Bool(false),
    };

    pub(crate) const fn from_variant(var: Variant) -> Self {
        Value { var }
    }

    // === Construction ===

    /// An empty object that allocates nothing until it is mutated.
    #[must_use]
    pub const fn empty_object() -> Self {
        Value {
            var: Variant::EmptyObject,
        }
    }

    /// An empty object with backing storage.
    #[must_use]
    pub fn object() -> Self {
        Self::object_with_capacity(0)
    }

    /// An empty object with room for `cap` members.
    #[must_use]
    pub fn object_with_capacity(cap: usize) -> Self {
        Value {
            var: Variant::object_with_capacity(cap),
        }
    }

    /// An empty array.
    #[must_use]
    pub fn array() -> Self {
        Self::array_with_capacity(0)
    }

    /// An empty array with room for `cap` elements.
    #[must_use]
    pub fn array_with_capacity(cap: usize) -> Self {
        Value {
            var: Variant::array_with_capacity(cap),
        }
    }

    /// Boxes an arbitrary Rust value.
    pub fn from_extension<T: ExtensionPayload>(value: T) -> Self {
        Extension::new(value).into()
    }

    /// An array of `n` nulls.
    #[must_use]
    pub fn make_array(n: usize) -> Self {
        Self::make_array_with(n, Value::NULL)
    }

    /// An array of `n` copies of `fill`.
    #[must_use]
    pub fn make_array_with(n: usize, fill: impl Into<Value>) -> Self {
        let mut arr = VArray::with_capacity(n);
        arr.resize(n, fill.into());
        arr.into()
    }

    /// An `m` by `n` array of nulls.
    #[must_use]
    pub fn make_2d_array(m: usize, n: usize) -> Self {
        Self::make_multi_array(&[m, n], Value::NULL)
    }

    /// An `m` by `n` array of copies of `fill`.
    #[must_use]
    pub fn make_2d_array_with(m: usize, n: usize, fill: impl Into<Value>) -> Self {
        Self::make_multi_array(&[m, n], fill)
    }

    /// An `m` by `n` by `k` array of nulls.
    #[must_use]
    pub fn make_3d_array(m: usize, n: usize, k: usize) -> Self {
        Self::make_multi_array(&[m, n, k], Value::NULL)
    }

    /// An `m` by `n` by `k` array of copies of `fill`.
    #[must_use]
    pub fn make_3d_array_with(m: usize, n: usize, k: usize, fill: impl Into<Value>) -> Self {
        Self::make_multi_array(&[m, n, k], fill)
    }

    /// Nested arrays with one level per entry of `dims`, innermost slots set to `fill`.
    ///
    /// With no dimensions this is just `fill`.
    #[must_use]
    pub fn make_multi_array(dims: &[usize], fill: impl Into<Value>) -> Self {
        let fill = fill.into();
        dims.iter()
            .rev()
            .fold(fill, |inner, &n| Self::make_array_with(n, inner))
    }

    // === Type inspection ===

    /// The active representation.
    #[must_use]
    pub const fn tag(&self) -> Tag {
        self.var.tag()
    }

    /// Returns `true` if this is `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self.var, Variant::Null)
    }

    /// Returns `true` if this is a boolean.
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self.var, Variant::Bool(_))
    }

    /// Returns `true` if this is a string of either representation.
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self.var, Variant::String(_))
    }

    /// Returns `true` for any of the three numeric representations.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self.var, Variant::I64(_) | Variant::U64(_) | Variant::F64(_))
    }

    /// Returns `true` if this holds an `i64`.
    #[must_use]
    pub const fn is_i64(&self) -> bool {
        matches!(self.var, Variant::I64(_))
    }

    /// Returns `true` if this holds a `u64`.
    #[must_use]
    pub const fn is_u64(&self) -> bool {
        matches!(self.var, Variant::U64(_))
    }

    /// Returns `true` if this holds an `f64`.
    #[must_use]
    pub const fn is_f64(&self) -> bool {
        matches!(self.var, Variant::F64(_))
    }

    /// Returns `true` for objects, including the unallocated empty object.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self.var, Variant::Object(_) | Variant::EmptyObject)
    }

    /// Returns `true` if this is an array.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self.var, Variant::Array(_))
    }

    /// Returns `true` if this holds an [`Extension`].
    #[must_use]
    pub const fn is_extension(&self) -> bool {
        matches!(self.var, Variant::Extension(_))
    }

    /// Returns `true` for empty strings, arrays and objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.var {
            Variant::String(s) => s.is_empty(),
            Variant::EmptyObject => true,
            Variant::Array(a) => a.is_empty(),
            Variant::Object(o) => o.is_empty(),
            _ => false,
        }
    }

    /// Returns `true` if [`to::<T>`](Value::to) would succeed without loss.
    #[must_use]
    pub fn is<T: FromValue>(&self) -> bool {
        T::is(self)
    }

    // === Coercing accessors ===

    /// Truthiness: `null` and empty objects are false, numbers are true when nonzero, strings
    /// arrays and objects when non-empty, extensions always.
    #[must_use]
    pub fn as_bool(&self) -> bool {
        match &self.var {
            Variant::Null | Variant::EmptyObject => false,
            Variant::Bool(b) => *b,
            Variant::I64(n) => *n != 0,
            Variant::U64(n) => *n != 0,
            Variant::F64(n) => *n != 0.0,
            Variant::String(s) => !s.is_empty(),
            Variant::Array(a) => !a.is_empty(),
            Variant::Object(o) => !o.is_empty(),
            Variant::Extension(_) => true,
        }
    }

    /// Signed integer view. Doubles truncate toward zero, `u64` casts, booleans give 0 or 1.
    pub fn as_i64(&self) -> Result<i64> {
        match self.var {
            Variant::I64(n) => Ok(n),
            Variant::U64(n) => Ok(n as i64),
            Variant::F64(n) => Ok(n as i64),
            Variant::Bool(b) => Ok(i64::from(b)),
            _ => Err(Error::not_a("long long")),
        }
    }

    /// Unsigned integer view. Doubles truncate toward zero, `i64` casts, booleans give 0 or 1.
    pub fn as_u64(&self) -> Result<u64> {
        match self.var {
            Variant::I64(n) => Ok(n as u64),
            Variant::U64(n) => Ok(n),
            Variant::F64(n) => Ok(n as u64),
            Variant::Bool(b) => Ok(u64::from(b)),
            _ => Err(Error::not_a("unsigned long long")),
        }
    }

    /// Floating point view. Integers widen and `null` reads as NaN.
    pub fn as_f64(&self) -> Result<f64> {
        match self.var {
            Variant::I64(n) => Ok(n as f64),
            Variant::U64(n) => Ok(n as f64),
            Variant::F64(n) => Ok(n),
            Variant::Null => Ok(f64::NAN),
            _ => Err(Error::not_a("double")),
        }
    }

    /// Like [`as_i64`](Value::as_i64), narrowed with `as` to `i32`.
    pub fn as_i32(&self) -> Result<i32> {
        match self.var {
            Variant::I64(n) => Ok(n as i32),
            Variant::U64(n) => Ok(n as i32),
            Variant::F64(n) => Ok(n as i32),
            Variant::Bool(b) => Ok(i32::from(b)),
            _ => Err(Error::not_a("int")),
        }
    }

    /// Like [`as_u64`](Value::as_u64), narrowed with `as` to `u32`.
    pub fn as_u32(&self) -> Result<u32> {
        match self.var {
            Variant::I64(n) => Ok(n as u32),
            Variant::U64(n) => Ok(n as u32),
            Variant::F64(n) => Ok(n as u32),
            Variant::Bool(b) => Ok(u32::from(b)),
            _ => Err(Error::not_a("unsigned int")),
        }
    }

    /// String contents for strings, compact JSON text for everything else.
    ///
    /// # Panics
    ///
    /// Panics if an extension's [`emit`](crate::ExtensionPayload::emit) fails while rendering,
    /// like [`to_string_with`](Value::to_string_with).
    #[must_use]
    pub fn as_string(&self) -> String {
        match &self.var {
            Variant::String(s) => s.as_str().into(),
            _ => self.to_string(),
        }
    }

    /// Like [`as_string`](Value::as_string), rendering non-strings with `options`.
    ///
    /// # Panics
    ///
    /// Panics if an extension's [`emit`](crate::ExtensionPayload::emit) fails while rendering.
    #[must_use]
    pub fn as_string_with(&self, options: &WriteOptions) -> String {
        match &self.var {
            Variant::String(s) => s.as_str().into(),
            _ => self.to_string_with(options),
        }
    }

    /// Borrows string contents; fails for every other type.
    pub fn as_str(&self) -> Result<&str> {
        match &self.var {
            Variant::String(s) => Ok(s.as_str()),
            _ => Err(Error::not_a("string")),
        }
    }

    /// Borrows the underlying [`VString`].
    #[must_use]
    pub fn as_vstring(&self) -> Option<&VString> {
        match &self.var {
            Variant::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrows the underlying [`VArray`].
    #[must_use]
    pub fn as_array(&self) -> Option<&VArray> {
        match &self.var {
            Variant::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Mutably borrows the underlying [`VArray`].
    pub fn as_array_mut(&mut self) -> Option<&mut VArray> {
        match &mut self.var {
            Variant::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Borrows the underlying [`VObject`]. An unallocated empty object has none.
    #[must_use]
    pub fn as_object(&self) -> Option<&VObject> {
        match &self.var {
            Variant::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Mutably borrows the object storage, materializing an empty object first.
    pub fn object_mut(&mut self) -> Result<&mut VObject> {
        self.var.materialize(0);
        match &mut self.var {
            Variant::Object(o) => Ok(o),
            _ => Err(Error::new(ErrorKind::TypeMismatch {
                operation: Operation::Object,
            })),
        }
    }

    /// Converts to `T` using [`FromValue`].
    pub fn to<T: FromValue>(&self) -> Result<T> {
        T::from_value(self)
    }

    /// Converts every array element to `T`.
    pub fn as_vec<T: FromValue>(&self) -> Result<Vec<T>> {
        self.elements()?.map(T::from_value).collect()
    }

    // === Extension access ===

    /// Borrows the boxed [`Extension`].
    pub fn extension_value(&self) -> Result<&Extension> {
        match &self.var {
            Variant::Extension(e) => Ok(e),
            _ => Err(Error::new(ErrorKind::NotAnExtension)),
        }
    }

    /// Mutably borrows the boxed [`Extension`].
    pub fn extension_value_mut(&mut self) -> Result<&mut Extension> {
        match &mut self.var {
            Variant::Extension(e) => Ok(e),
            _ => Err(Error::new(ErrorKind::NotAnExtension)),
        }
    }

    /// Borrows the boxed value as a `T`.
    pub fn extension<T: ExtensionPayload>(&self) -> Result<&T> {
        self.extension_value()?.downcast_ref()
    }

    /// Mutably borrows the boxed value as a `T`.
    pub fn extension_mut<T: ExtensionPayload>(&mut self) -> Result<&mut T> {
        self.extension_value_mut()?.downcast_mut()
    }

    // === Lookup ===

    /// Member by key. Fails when the key is missing or this is not an object.
    pub fn at(&self, key: &str) -> Result<&Value> {
        match &self.var {
            Variant::EmptyObject => Err(key_not_found(key)),
            Variant::Object(o) => o.get(key).ok_or_else(|| key_not_found(key)),
            _ => Err(Error::not_an_object_get(key)),
        }
    }

    /// Mutable member by key. Never materializes an empty object.
    pub fn at_mut(&mut self, key: &str) -> Result<&mut Value> {
        match &mut self.var {
            Variant::EmptyObject => Err(key_not_found(key)),
            Variant::Object(o) => o.get_mut(key).ok_or_else(|| key_not_found(key)),
            _ => Err(Error::not_an_object_get(key)),
        }
    }

    /// Element by position. Fails when out of range or this is not an array.
    pub fn at_index(&self, index: usize) -> Result<&Value> {
        match &self.var {
            Variant::Array(a) => a.get(index).ok_or_else(|| out_of_range(index, a.len())),
            _ => Err(Error::not_an_array_index()),
        }
    }

    /// Mutable element by position.
    pub fn at_index_mut(&mut self, index: usize) -> Result<&mut Value> {
        match &mut self.var {
            Variant::Array(a) => {
                let len = a.len();
                a.get_mut(index).ok_or_else(|| out_of_range(index, len))
            }
            _ => Err(Error::not_an_array_index()),
        }
    }

    /// Member by key, `None` when missing. Fails if this is not an object.
    pub fn find(&self, key: &str) -> Result<Option<&Value>> {
        match &self.var {
            Variant::EmptyObject => Ok(None),
            Variant::Object(o) => Ok(o.get(key)),
            _ => Err(Error::not_an_object_get(key)),
        }
    }

    /// Member by key, or a shared `null` when missing. Fails if this is not an object.
    pub fn get(&self, key: &str) -> Result<&Value> {
        Ok(self.find(key)?.unwrap_or(&NULL))
    }

    /// Copy of the member, or `default` when missing. Fails if this is not an object.
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Result<Value> {
        match self.find(key)? {
            Some(v) => Ok(v.clone()),
            None => Ok(default.into()),
        }
    }

    /// Returns `true` if this is an object with a member named `key`.
    #[doc(alias = "has_member")]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        match &self.var {
            Variant::Object(o) => o.contains_key(key),
            _ => false,
        }
    }

    /// Number of members named `key`: zero or one.
    #[must_use]
    pub fn count(&self, key: &str) -> usize {
        usize::from(self.contains_key(key))
    }

    // === Mutation ===

    /// Inserts or replaces a member. An empty object is materialized first; any other
    /// non-object fails and is left untouched.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        if !self.is_object() {
            return Err(Error::not_an_object_set(key));
        }
        self.var.materialize(1);
        if let Variant::Object(o) = &mut self.var {
            o.insert(key, value);
        }
        Ok(())
    }

    /// Member by key, inserting an empty object under `key` first if it is missing.
    pub fn get_or_insert_default(&mut self, key: &str) -> Result<&mut Value> {
        if !self.is_object() {
            return Err(Error::not_an_object_set(key));
        }
        self.var.materialize(1);
        match &mut self.var {
            Variant::Object(o) => Ok(o.get_or_insert_with(key, Value::empty_object)),
            _ => Err(Error::not_an_object_set(key)),
        }
    }

    /// Appends to an array.
    #[doc(alias = "add")]
    pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
        match &mut self.var {
            Variant::Array(a) => {
                a.push(value);
                Ok(())
            }
            _ => Err(Error::not_an_array_insert()),
        }
    }

    /// Inserts into an array at `index`, shifting later elements. `index` may equal the length.
    pub fn insert(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
        match &mut self.var {
            Variant::Array(a) if index <= a.len() => {
                a.insert(index, value);
                Ok(())
            }
            Variant::Array(a) => Err(out_of_range(index, a.len())),
            _ => Err(Error::not_an_array_insert()),
        }
    }

    /// Removes a member, returning it if it was present.
    pub fn erase(&mut self, key: &str) -> Result<Option<Value>> {
        match &mut self.var {
            Variant::EmptyObject => Ok(None),
            Variant::Object(o) => Ok(o.remove(key)),
            _ => Err(not_an(Operation::Object)),
        }
    }

    /// Removes and returns the element at `index`.
    pub fn erase_index(&mut self, index: usize) -> Result<Value> {
        match &mut self.var {
            Variant::Array(a) => {
                let len = a.len();
                a.remove(index).ok_or_else(|| out_of_range(index, len))
            }
            _ => Err(not_an(Operation::Array)),
        }
    }

    /// Removes the members at positions `range` (insertion order), clamped to the length.
    pub fn erase_members(&mut self, range: Range<usize>) -> Result<()> {
        match &mut self.var {
            Variant::EmptyObject => Ok(()),
            Variant::Object(o) => {
                o.remove_range(range);
                Ok(())
            }
            _ => Err(not_an(Operation::Object)),
        }
    }

    /// Removes the elements at positions `range`, clamped to the length.
    pub fn erase_elements(&mut self, range: Range<usize>) -> Result<()> {
        match &mut self.var {
            Variant::Array(a) => {
                a.remove_range(range);
                Ok(())
            }
            _ => Err(not_an(Operation::Array)),
        }
    }

    /// Removes array elements from `from` (inclusive) to `to` (exclusive). No-op on non-arrays.
    pub fn remove_range(&mut self, from: usize, to: usize) {
        if let Variant::Array(a) = &mut self.var {
            a.remove_range(from..to);
        }
    }

    /// Empties an array or object, keeping its tag. No-op for everything else.
    pub fn clear(&mut self) {
        match &mut self.var {
            Variant::Array(a) => a.clear(),
            Variant::Object(o) => o.clear(),
            _ => {}
        }
    }

    /// Ensures room for `n` elements or members. An empty object is materialized with that
    /// capacity; scalars are left alone.
    pub fn reserve(&mut self, n: usize) {
        self.var.materialize(n);
        match &mut self.var {
            Variant::Array(a) => a.reserve(n),
            Variant::Object(o) => o.reserve(n),
            _ => {}
        }
    }

    /// Resizes an array to `n` elements, padding with nulls. No-op on non-arrays.
    pub fn resize(&mut self, n: usize) {
        self.resize_filled(n, Value::NULL);
    }

    /// Resizes an array to `n` elements, padding with copies of `fill`. No-op on non-arrays.
    pub fn resize_filled(&mut self, n: usize, fill: impl Into<Value>) {
        if let Variant::Array(a) = &mut self.var {
            a.resize(n, fill.into());
        }
    }

    /// Releases spare capacity of an array or object.
    pub fn shrink_to_fit(&mut self) {
        match &mut self.var {
            Variant::Array(a) => a.shrink_to_fit(),
            Variant::Object(o) => o.shrink_to_fit(),
            _ => {}
        }
    }

    /// Element or member count; zero for scalars and the empty object.
    #[must_use]
    pub fn size(&self) -> usize {
        match &self.var {
            Variant::Array(a) => a.len(),
            Variant::Object(o) => o.len(),
            _ => 0,
        }
    }

    /// Allocated capacity of an array or object; zero otherwise.
    #[must_use]
    pub fn capacity(&self) -> usize {
        match &self.var {
            Variant::Array(a) => a.capacity(),
            Variant::Object(o) => o.capacity(),
            _ => 0,
        }
    }

    /// Replaces this value in place.
    pub fn assign(&mut self, value: impl Into<Value>) {
        self.var.assign(value.into().var);
    }

    /// Replaces this value with a string.
    pub fn assign_str(&mut self, s: &str) {
        self.var.assign_str(s);
    }

    /// Exchanges contents with `other` without copying.
    pub fn swap(&mut self, other: &mut Value) {
        self.var.swap(&mut other.var);
    }

    /// Takes this value, replacing it with `Value::NULL`.
    pub const fn take(&mut self) -> Value {
        core::mem::replace(self, Value::NULL)
    }

    // === Iteration ===

    /// Members of an object in insertion order. An empty object yields nothing and stays
    /// unallocated.
    pub fn members(&self) -> Result<Members<'_>> {
        match &self.var {
            Variant::EmptyObject => Ok(Members(None)),
            Variant::Object(o) => Ok(Members(Some(o.iter()))),
            _ => Err(not_an(Operation::Object)),
        }
    }

    /// Members of an object with mutable values.
    pub fn members_mut(&mut self) -> Result<MembersMut<'_>> {
        match &mut self.var {
            Variant::EmptyObject => Ok(MembersMut(None)),
            Variant::Object(o) => Ok(MembersMut(Some(o.iter_mut()))),
            _ => Err(not_an(Operation::Object)),
        }
    }

    /// Elements of an array.
    pub fn elements(&self) -> Result<core::slice::Iter<'_, Value>> {
        match &self.var {
            Variant::Array(a) => Ok(a.iter()),
            _ => Err(not_an(Operation::Array)),
        }
    }

    /// Mutable elements of an array.
    pub fn elements_mut(&mut self) -> Result<core::slice::IterMut<'_, Value>> {
        match &mut self.var {
            Variant::Array(a) => Ok(a.iter_mut()),
            _ => Err(not_an(Operation::Array)),
        }
    }

    // === Traversal ===

    /// Emits this tree depth-first to `handler`.
    ///
    /// Containers produce one matched begin/end pair, leaves one `value` event. An empty
    /// object is emitted as `begin_object` immediately followed by `end_object`. Extensions
    /// emit whatever their payload's [`ExtensionPayload::emit`] produces.
    pub fn emit(&self, handler: &mut dyn ContentHandler) -> Result<()> {
        match &self.var {
            Variant::Null => handler.value(Scalar::Null),
            Variant::Bool(b) => handler.value(Scalar::Bool(*b)),
            Variant::I64(n) => handler.value(Scalar::I64(*n)),
            Variant::U64(n) => handler.value(Scalar::U64(*n)),
            Variant::F64(n) => handler.value(Scalar::F64(*n)),
            Variant::String(s) => handler.value(Scalar::Str(s.as_str())),
            Variant::EmptyObject => {
                handler.begin_object()?;
                handler.end_object()
            }
            Variant::Array(a) => {
                handler.begin_array()?;
                for element in a.iter() {
                    element.emit(handler)?;
                }
                handler.end_array()
            }
            Variant::Object(o) => {
                handler.begin_object()?;
                for (key, member) in o.iter() {
                    handler.name(key.as_str())?;
                    member.emit(handler)?;
                }
                handler.end_object()
            }
            Variant::Extension(e) => e.emit(handler),
        }
    }
}

fn key_not_found(key: &str) -> Error {
    Error::new(ErrorKind::KeyNotFound { key: key.into() })
}

fn out_of_range(index: usize, len: usize) -> Error {
    Error::new(ErrorKind::IndexOutOfRange { index, len })
}

fn not_an(operation: Operation) -> Error {
    Error::new(ErrorKind::TypeMismatch { operation })
}

// === Iterators ===

/// Iterator over object members, see [`Value::members`].
pub struct Members<'a>(Option<object::Iter<'a>>);

impl<'a> Iterator for Members<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.as_mut()?.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.as_ref().map_or((0, Some(0)), Iterator::size_hint)
    }
}

impl DoubleEndedIterator for Members<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.as_mut()?.next_back().map(|(k, v)| (k.as_str(), v))
    }
}

impl ExactSizeIterator for Members<'_> {}

/// Iterator over object members with mutable values, see [`Value::members_mut`].
pub struct MembersMut<'a>(Option<object::IterMut<'a>>);

impl<'a> Iterator for MembersMut<'a> {
    type Item = (&'a str, &'a mut Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.as_mut()?.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.as_ref().map_or((0, Some(0)), Iterator::size_hint)
    }
}

impl DoubleEndedIterator for MembersMut<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.as_mut()?.next_back().map(|(k, v)| (k.as_str(), v))
    }
}

impl ExactSizeIterator for MembersMut<'_> {}

// === Index ===

impl Index<&str> for Value {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if this is not an object or the key is missing; see [`Value::at`].
    fn index(&self, key: &str) -> &Value {
        match self.at(key) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl Index<usize> for Value {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if this is not an array or the index is out of range; see [`Value::at_index`].
    fn index(&self, index: usize) -> &Value {
        match self.at_index(index) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl IndexMut<usize> for Value {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        match self.at_index_mut(index) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

// === Debug / Display ===

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.var {
            Variant::Null => f.write_str("null"),
            Variant::Bool(b) => Debug::fmt(b, f),
            Variant::I64(n) => Debug::fmt(n, f),
            Variant::U64(n) => write!(f, "{n}u"),
            Variant::F64(n) => Debug::fmt(n, f),
            Variant::String(s) => Debug::fmt(s, f),
            Variant::EmptyObject => f.write_str("{}"),
            Variant::Array(a) => Debug::fmt(a, f),
            Variant::Object(o) => Debug::fmt(o, f),
            Variant::Extension(e) => Debug::fmt(e, f),
        }
    }
}

impl fmt::Display for Value {
    /// Compact JSON text.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.try_to_string_with(&WriteOptions::default()).map_err(|_| fmt::Error)?)
    }
}

// === Default ===

impl Default for Value {
    /// The unallocated empty object.
    fn default() -> Self {
        Self::empty_object()
    }
}

// === From implementations ===

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        if b { Self::TRUE } else { Self::FALSE }
    }
}

macro_rules! from_signed {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            fn from(n: $ty) -> Self {
                Value::from_variant(Variant::I64(n as i64))
            }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            fn from(n: $ty) -> Self {
                Value::from_variant(Variant::U64(n as u64))
            }
        }
    )*};
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::from_variant(Variant::F64(f64::from(n)))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::from_variant(Variant::F64(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::from_variant(Variant::string(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::from(s.as_str())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::from(s.as_str())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        VString::from(c).into()
    }
}

impl From<VString> for Value {
    fn from(s: VString) -> Self {
        Value::from_variant(Variant::String(s))
    }
}

impl From<VArray> for Value {
    fn from(a: VArray) -> Self {
        Value::from_variant(Variant::Array(a.into()))
    }
}

impl From<VObject> for Value {
    fn from(o: VObject) -> Self {
        Value::from_variant(Variant::Object(o.into()))
    }
}

impl From<Extension> for Value {
    fn from(e: Extension) -> Self {
        Value::from_variant(Variant::Extension(e.into()))
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::NULL
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(vec: Vec<T>) -> Self {
        VArray::from(vec).into()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Self::NULL,
        }
    }
}

// === FromIterator implementations ===

impl<T: Into<Value>> FromIterator<T> for Value {
    /// Collect into an array Value.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        VArray::from_iter(iter).into()
    }
}

impl<K: Into<VString>, V: Into<Value>> FromIterator<(K, V)> for Value {
    /// Collect key-value pairs into an object Value.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        VObject::from_iter(iter).into()
    }
}
