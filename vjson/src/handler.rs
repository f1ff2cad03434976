//! The traversal contract: events a value tree is emitted as, and built from.

use crate::error::Result;

/// A leaf of the traversal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    /// `null`
    Null,
    /// `true` or `false`
    Bool(bool),
    /// Signed integer
    I64(i64),
    /// Unsigned integer
    U64(u64),
    /// Floating point
    F64(f64),
    /// String
    Str(&'a str),
}

/// Receives a depth-first, pre-order stream of document events.
///
/// Every container produces exactly one matched `begin_*`/`end_*` pair. Inside an object each
/// member is a [`name`](ContentHandler::name) followed by the member's events; every leaf is one
/// [`value`](ContentHandler::value).
///
/// [`Value::emit`](crate::Value::emit) drives a handler from a tree, the parser drives one from
/// text, [`JsonWriter`](crate::JsonWriter) renders events as text and
/// [`ValueBuilder`](crate::ValueBuilder) turns them back into a tree.
pub trait ContentHandler {
    /// Start of an object.
    fn begin_object(&mut self) -> Result<()>;

    /// Key of the next object member.
    fn name(&mut self, name: &str) -> Result<()>;

    /// End of the innermost open object.
    fn end_object(&mut self) -> Result<()>;

    /// Start of an array.
    fn begin_array(&mut self) -> Result<()>;

    /// End of the innermost open array.
    fn end_array(&mut self) -> Result<()>;

    /// A leaf value.
    fn value(&mut self, value: Scalar<'_>) -> Result<()>;
}

impl<H: ContentHandler + ?Sized> ContentHandler for &mut H {
    fn begin_object(&mut self) -> Result<()> {
        (**self).begin_object()
    }

    fn name(&mut self, name: &str) -> Result<()> {
        (**self).name(name)
    }

    fn end_object(&mut self) -> Result<()> {
        (**self).end_object()
    }

    fn begin_array(&mut self) -> Result<()> {
        (**self).begin_array()
    }

    fn end_array(&mut self) -> Result<()> {
        (**self).end_array()
    }

    fn value(&mut self, value: Scalar<'_>) -> Result<()> {
        (**self).value(value)
    }
}
