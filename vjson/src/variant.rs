//! Tagged-union storage behind [`Value`](crate::Value).

use alloc::boxed::Box;
use core::mem;

use crate::array::VArray;
use crate::extension::Extension;
use crate::object::VObject;
use crate::string::VString;

/// Which representation a value currently holds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tag {
    /// `null`
    Null,
    /// Boolean
    Bool,
    /// Signed 64-bit integer
    Int64,
    /// Unsigned 64-bit integer
    UInt64,
    /// 64-bit float
    Double,
    /// String of at most [`VString::INLINE_CAPACITY`] bytes, stored inline
    SmallString,
    /// Heap string
    String,
    /// Empty object with no backing storage yet
    EmptyObject,
    /// Array
    Array,
    /// Object
    Object,
    /// Boxed arbitrary Rust value
    Extension,
}

impl Tag {
    /// Tags whose payload owns no heap resources.
    #[must_use]
    pub const fn is_trivial(self) -> bool {
        matches!(
            self,
            Tag::Null
                | Tag::Bool
                | Tag::Int64
                | Tag::UInt64
                | Tag::Double
                | Tag::SmallString
                | Tag::EmptyObject
        )
    }

    /// Lowercase name used in messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Tag::Null => "null",
            Tag::Bool => "bool",
            Tag::Int64 => "int64",
            Tag::UInt64 => "uint64",
            Tag::Double => "double",
            Tag::SmallString => "small string",
            Tag::String => "string",
            Tag::EmptyObject => "empty object",
            Tag::Array => "array",
            Tag::Object => "object",
            Tag::Extension => "extension",
        }
    }
}

#[derive(Clone)]
pub(crate) enum Variant {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(VString),
    EmptyObject,
    Array(Box<VArray>),
    Object(Box<VObject>),
    Extension(Box<Extension>),
}

#[derive(Clone, Copy)]
pub(crate) enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Variant {
    pub(crate) fn string(s: &str) -> Self {
        Variant::String(VString::new(s))
    }

    pub(crate) fn array_with_capacity(cap: usize) -> Self {
        Variant::Array(Box::new(VArray::with_capacity(cap)))
    }

    pub(crate) fn object_with_capacity(cap: usize) -> Self {
        Variant::Object(Box::new(VObject::with_capacity(cap)))
    }

    pub(crate) const fn tag(&self) -> Tag {
        match self {
            Variant::Null => Tag::Null,
            Variant::Bool(_) => Tag::Bool,
            Variant::I64(_) => Tag::Int64,
            Variant::U64(_) => Tag::UInt64,
            Variant::F64(_) => Tag::Double,
            Variant::String(s) => {
                if s.is_inline() {
                    Tag::SmallString
                } else {
                    Tag::String
                }
            }
            Variant::EmptyObject => Tag::EmptyObject,
            Variant::Array(_) => Tag::Array,
            Variant::Object(_) => Tag::Object,
            Variant::Extension(_) => Tag::Extension,
        }
    }

    pub(crate) const fn number(&self) -> Option<Number> {
        match *self {
            Variant::I64(n) => Some(Number::I64(n)),
            Variant::U64(n) => Some(Number::U64(n)),
            Variant::F64(n) => Some(Number::F64(n)),
            _ => None,
        }
    }

    /// Replaces the payload in place.
    ///
    /// Trivial payloads are overwritten directly; anything owning heap storage is swapped out
    /// and released after the new payload is in place.
    pub(crate) fn assign(&mut self, other: Variant) {
        if self.tag().is_trivial() {
            *self = other;
        } else {
            let mut old = other;
            self.swap(&mut old);
            drop(old);
        }
    }

    /// Replaces the payload with a string; short strings land inline without allocating.
    pub(crate) fn assign_str(&mut self, s: &str) {
        self.assign(Variant::string(s));
    }

    pub(crate) fn swap(&mut self, other: &mut Variant) {
        mem::swap(self, other);
    }

    /// Turns `EmptyObject` into a storage-backed empty `Object`; other tags are untouched.
    pub(crate) fn materialize(&mut self, cap: usize) {
        if let Variant::EmptyObject = self {
            crate::trace!(cap, "materializing empty object");
            *self = Variant::object_with_capacity(cap);
        }
    }
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.number(), other.number()) {
            return a == b;
        }
        match (self, other) {
            (Variant::Null, Variant::Null) => true,
            (Variant::Bool(a), Variant::Bool(b)) => a == b,
            (Variant::String(a), Variant::String(b)) => a == b,
            (Variant::EmptyObject, Variant::EmptyObject) => true,
            (Variant::EmptyObject, Variant::Object(o)) | (Variant::Object(o), Variant::EmptyObject) => {
                o.is_empty()
            }
            (Variant::Array(a), Variant::Array(b)) => a == b,
            (Variant::Object(a), Variant::Object(b)) => a == b,
            // Opaque payloads have no generic equality
            (Variant::Extension(_), Variant::Extension(_)) => false,
            _ => false,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Number::I64(a), Number::I64(b)) => a == b,
            (Number::U64(a), Number::U64(b)) => a == b,
            (Number::F64(a), Number::F64(b)) => a == b,
            (Number::I64(i), Number::U64(u)) | (Number::U64(u), Number::I64(i)) => {
                u64::try_from(i).is_ok_and(|i| i == u)
            }
            // Widening to f64 loses precision above 2^53
            (Number::I64(i), Number::F64(f)) | (Number::F64(f), Number::I64(i)) => i as f64 == f,
            (Number::U64(u), Number::F64(f)) | (Number::F64(f), Number::U64(u)) => u as f64 == f,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::ExtensionPayload;

    #[derive(Clone, Debug)]
    struct Marker;

    impl ExtensionPayload for Marker {}

    #[test]
    fn trivial_tags() {
        assert!(Tag::Null.is_trivial());
        assert!(Tag::SmallString.is_trivial());
        assert!(Tag::EmptyObject.is_trivial());
        assert!(!Tag::String.is_trivial());
        assert!(!Tag::Array.is_trivial());
        assert!(!Tag::Object.is_trivial());
        assert!(!Tag::Extension.is_trivial());
    }

    #[test]
    fn string_tag_follows_length() {
        assert_eq!(Variant::string("seven!!").tag(), Tag::SmallString);
        assert_eq!(Variant::string("eight!!!").tag(), Tag::String);
    }

    #[test]
    fn assign_over_trivial_and_owned_payloads() {
        let mut v = Variant::Bool(true);
        v.assign(Variant::I64(3));
        assert_eq!(v.tag(), Tag::Int64);

        v.assign(Variant::array_with_capacity(4));
        assert_eq!(v.tag(), Tag::Array);

        v.assign_str("a heap allocated string");
        assert_eq!(v.tag(), Tag::String);

        v.assign_str("tiny");
        assert_eq!(v.tag(), Tag::SmallString);

        v.assign(Variant::Extension(Box::new(Extension::new(Marker))));
        assert_eq!(v.tag(), Tag::Extension);

        v.assign(Variant::Null);
        assert_eq!(v.tag(), Tag::Null);
    }

    #[test]
    fn swap_exchanges_payloads() {
        let mut a = Variant::string("left side of the swap");
        let mut b = Variant::U64(7);
        a.swap(&mut b);
        assert_eq!(a.tag(), Tag::UInt64);
        assert_eq!(b.tag(), Tag::String);
    }

    #[test]
    fn materialize_is_one_way() {
        let mut v = Variant::EmptyObject;
        v.materialize(8);
        assert_eq!(v.tag(), Tag::Object);
        if let Variant::Object(o) = &v {
            assert!(o.capacity() >= 8);
        }

        let mut n = Variant::I64(1);
        n.materialize(0);
        assert_eq!(n.tag(), Tag::Int64);
    }

    #[test]
    fn numeric_equality_crosses_representations() {
        assert!(Variant::I64(5) == Variant::U64(5));
        assert!(Variant::U64(5) == Variant::F64(5.0));
        assert!(Variant::I64(5) == Variant::F64(5.0));
        assert!(Variant::I64(-1) != Variant::U64(u64::MAX));
        assert!(Variant::F64(f64::NAN) != Variant::F64(f64::NAN));
        assert!(Variant::I64(0) != Variant::Bool(false));
    }

    #[test]
    fn empty_object_equals_empty_object_storage() {
        assert!(Variant::EmptyObject == Variant::object_with_capacity(0));
        assert!(Variant::object_with_capacity(4) == Variant::EmptyObject);
        assert!(Variant::EmptyObject != Variant::array_with_capacity(0));
    }

    #[test]
    fn extensions_never_compare_equal() {
        let a = Variant::Extension(Box::new(Extension::new(Marker)));
        let b = a.clone();
        assert!(a != b);
    }
}
