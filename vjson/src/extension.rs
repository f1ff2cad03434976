//! Type-erased extension values.
//!
//! An [`Extension`] embeds one arbitrary Rust value in a [`Value`](crate::Value) tree. It can be
//! deep-cloned and emitted as traversal events, and gives its contents back only when asked for
//! the exact concrete type it was built from.

use alloc::boxed::Box;
use core::any::{Any, type_name};
use core::fmt::{self, Debug, Formatter};

use crate::error::{Error, ErrorKind, Result};
use crate::handler::{ContentHandler, Scalar};

/// A Rust type that can live inside an [`Extension`].
///
/// The default [`emit`](ExtensionPayload::emit) writes a single `null`, so a type that only
/// needs to ride along in a document can implement this trait with an empty body.
///
/// ```
/// use vjson::{ContentHandler, ExtensionPayload, Result, Scalar, Value};
///
/// #[derive(Clone, Debug)]
/// struct Celsius(f64);
///
/// impl ExtensionPayload for Celsius {
///     fn emit(&self, handler: &mut dyn ContentHandler) -> Result<()> {
///         handler.begin_object()?;
///         handler.name("celsius")?;
///         handler.value(Scalar::F64(self.0))?;
///         handler.end_object()
///     }
/// }
///
/// let v = Value::from_extension(Celsius(21.5));
/// assert_eq!(v.to_string(), r#"{"celsius":21.5}"#);
/// assert_eq!(v.extension::<Celsius>().unwrap().0, 21.5);
/// ```
pub trait ExtensionPayload: Any + Clone + Debug + Send + Sync {
    /// Emits this value as one balanced group of traversal events.
    fn emit(&self, handler: &mut dyn ContentHandler) -> Result<()> {
        handler.value(Scalar::Null)
    }
}

trait ErasedPayload: Any + Send + Sync {
    fn clone_box(&self) -> Box<dyn ErasedPayload>;
    fn emit(&self, handler: &mut dyn ContentHandler) -> Result<()>;
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn debug(&self, f: &mut Formatter<'_>) -> fmt::Result;
}

impl<T: ExtensionPayload> ErasedPayload for T {
    fn clone_box(&self) -> Box<dyn ErasedPayload> {
        Box::new(self.clone())
    }

    fn emit(&self, handler: &mut dyn ContentHandler) -> Result<()> {
        ExtensionPayload::emit(self, handler)
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn debug(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

/// A box holding one value of a type known only at construction time.
pub struct Extension {
    inner: Box<dyn ErasedPayload>,
}

impl Extension {
    /// Boxes `value`.
    pub fn new<T: ExtensionPayload>(value: T) -> Self {
        Extension {
            inner: Box::new(value),
        }
    }

    /// Name of the boxed concrete type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name()
    }

    /// Returns `true` if the boxed value is a `T`.
    #[must_use]
    pub fn is<T: ExtensionPayload>(&self) -> bool {
        self.inner.as_any().is::<T>()
    }

    /// Borrows the boxed value as a `T`.
    pub fn downcast_ref<T: ExtensionPayload>(&self) -> Result<&T> {
        let found = self.inner.type_name();
        self.inner
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| bad_cast::<T>(found))
    }

    /// Mutably borrows the boxed value as a `T`.
    pub fn downcast_mut<T: ExtensionPayload>(&mut self) -> Result<&mut T> {
        let found = self.inner.type_name();
        self.inner
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or_else(|| bad_cast::<T>(found))
    }

    /// Unboxes the value as a `T`, handing the extension back unchanged on a mismatch.
    pub fn into_inner<T: ExtensionPayload>(self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        match self.inner.into_any().downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("type checked above"),
        }
    }

    /// Emits the boxed value through its own [`ExtensionPayload::emit`].
    pub fn emit(&self, handler: &mut dyn ContentHandler) -> Result<()> {
        self.inner.emit(handler)
    }
}

fn bad_cast<T>(found: &'static str) -> Error {
    crate::trace!(expected = type_name::<T>(), found, "extension cast failed");
    Error::new(ErrorKind::BadExtensionCast {
        expected: type_name::<T>(),
        found,
    })
}

impl Clone for Extension {
    fn clone(&self) -> Self {
        Extension {
            inner: self.inner.clone_box(),
        }
    }
}

impl Debug for Extension {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Extension<{}>(", self.inner.type_name())?;
        self.inner.debug(f)?;
        f.write_str(")")
    }
}
