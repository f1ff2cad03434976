//! `vjson` provides a JSON document value type: a single polymorphic [`Value`] that can hold
//! any JSON document (null, booleans, signed and unsigned integers, doubles, strings, arrays and
//! objects) plus an [`Extension`] slot for embedding arbitrary Rust values.
//!
//! # Features
//!
//! - **Small-string optimization**: strings of up to 7 bytes live inline in the value; longer
//!   strings take exactly one heap allocation (header and payload in one block)
//! - **Lazy objects**: [`Value::empty_object`] allocates nothing until the first mutation
//! - **Three numeric representations**: `i64`, `u64` and `f64` are stored as given and compared
//!   by numeric value
//! - **Key proxies**: `root.key("a")?.key("b")?.set(5)` creates missing intermediate objects
//! - **Event traversal**: [`Value::emit`] drives any [`ContentHandler`]; the bundled
//!   [`JsonWriter`] renders text and [`ValueBuilder`] rebuilds a tree
//!
//! # Example
//!
//! ```
//! use vjson::Value;
//!
//! let mut doc = Value::parse(r#"[1, "two", {"k": true}]"#).unwrap();
//! assert_eq!(doc.size(), 3);
//! assert_eq!(doc.at_index(1).unwrap().as_string(), "two");
//! assert!(doc.at_index(2).unwrap().at("k").unwrap().as_bool());
//!
//! doc.push(Value::empty_object()).unwrap();
//! doc[3].key("a").unwrap().key("b").unwrap().set(5).unwrap();
//! assert_eq!(doc.to_string(), r#"[1,"two",{"k":true},{"a":{"b":5}}]"#);
//! ```
//!
//! # Threading
//!
//! A `Value` tree has exactly one owner and no interior mutability. Extension payloads must be
//! `Send + Sync`, so every `Value` is too: a finished tree can be shared read-only across
//! threads, and mutation always goes through `&mut`.

#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]

extern crate alloc;

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
#[macro_export]
/// Forwards to tracing::trace when the tracing feature is enabled
macro_rules! trace {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
#[macro_export]
/// Forwards to tracing::debug when the tracing feature is enabled
macro_rules! debug {
    ($($tt:tt)*) => {};
}

mod error;
pub use error::{Error, ErrorKind, Operation, ParseErrorKind, Position, Result};

mod string;
pub use string::VString;

mod array;
pub use array::VArray;

mod object;
pub use object::VObject;

mod extension;
pub use extension::{Extension, ExtensionPayload};

mod variant;
pub use variant::Tag;

mod value;
pub use value::*;

mod convert;
pub use convert::FromValue;

mod proxy;
pub use proxy::KeyProxy;

mod handler;
pub use handler::{ContentHandler, Scalar};

mod builder;
pub use builder::ValueBuilder;

mod writer;
pub use writer::{JsonPrintable, JsonWriter, WriteOptions, pretty_print, print};

mod scanner;

mod parser;
pub use parser::{
    LenientErrorHandler, ParseErrorHandler, ParseOptions, StrictErrorHandler, parse_into,
};

#[cfg(feature = "serde")]
mod serde_impl;
