//! Builds a [`Value`] tree bottom-up from traversal events.

use alloc::vec::Vec;

use crate::array::VArray;
use crate::error::{Error, Result};
use crate::handler::{ContentHandler, Scalar};
use crate::object::VObject;
use crate::string::VString;
use crate::value::Value;

/// A container being built.
enum Frame {
    Object {
        obj: VObject,
        pending_key: Option<VString>,
    },
    Array {
        arr: VArray,
    },
}

/// Event handler that assembles the events it receives into a [`Value`].
///
/// Objects come out storage-backed even when empty, so an empty object that went through
/// text compares equal to, but is not tagged like, [`Value::empty_object`].
///
/// ```
/// use vjson::{ContentHandler, Scalar, ValueBuilder};
///
/// let mut builder = ValueBuilder::new();
/// builder.begin_object().unwrap();
/// builder.name("id").unwrap();
/// builder.value(Scalar::U64(7)).unwrap();
/// builder.end_object().unwrap();
///
/// let v = builder.finish().unwrap();
/// assert_eq!(v.to_string(), r#"{"id":7}"#);
/// ```
#[derive(Default)]
pub struct ValueBuilder {
    stack: Vec<Frame>,
    result: Option<Value>,
}

impl ValueBuilder {
    /// Creates a builder with nothing built yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the finished tree. Fails if a container is still open or nothing was built.
    pub fn finish(self) -> Result<Value> {
        if !self.stack.is_empty() {
            return Err(Error::custom("unclosed container at end of events"));
        }
        self.result
            .ok_or_else(|| Error::custom("no value was built"))
    }

    fn attach(&mut self, value: Value) -> Result<()> {
        match self.stack.last_mut() {
            Some(Frame::Object { obj, pending_key }) => match pending_key.take() {
                Some(key) => {
                    obj.insert(key, value);
                    Ok(())
                }
                None => Err(Error::custom("object member without a name")),
            },
            Some(Frame::Array { arr }) => {
                arr.push(value);
                Ok(())
            }
            None if self.result.is_some() => Err(Error::custom("more than one root value")),
            None => {
                self.result = Some(value);
                Ok(())
            }
        }
    }
}

impl ContentHandler for ValueBuilder {
    fn begin_object(&mut self) -> Result<()> {
        self.stack.push(Frame::Object {
            obj: VObject::new(),
            pending_key: None,
        });
        Ok(())
    }

    fn name(&mut self, name: &str) -> Result<()> {
        match self.stack.last_mut() {
            Some(Frame::Object {
                pending_key: Some(_),
                ..
            }) => Err(Error::custom("member name received twice without a value")),
            Some(Frame::Object { pending_key, .. }) => {
                *pending_key = Some(VString::new(name));
                Ok(())
            }
            _ => Err(Error::custom("name outside of an object")),
        }
    }

    fn end_object(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Object {
                pending_key: Some(key),
                ..
            }) => Err(Error::custom(format!(
                "object closed before a value for member {key}"
            ))),
            Some(Frame::Object { obj, .. }) => self.attach(obj.into()),
            _ => Err(Error::custom("end_object without matching begin_object")),
        }
    }

    fn begin_array(&mut self) -> Result<()> {
        self.stack.push(Frame::Array { arr: VArray::new() });
        Ok(())
    }

    fn end_array(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Array { arr }) => self.attach(arr.into()),
            _ => Err(Error::custom("end_array without matching begin_array")),
        }
    }

    fn value(&mut self, value: Scalar<'_>) -> Result<()> {
        let value = match value {
            Scalar::Null => Value::NULL,
            Scalar::Bool(b) => Value::from(b),
            Scalar::I64(n) => Value::from(n),
            Scalar::U64(n) => Value::from(n),
            Scalar::F64(n) => Value::from(n),
            Scalar::Str(s) => Value::from(s),
        };
        self.attach(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tag;

    #[test]
    fn rebuilds_emitted_tree() {
        let mut original = Value::object();
        original.set("list", vec![Value::from(1u64), Value::from("x")]).unwrap();
        original.set("nested", Value::empty_object()).unwrap();

        let mut builder = ValueBuilder::new();
        original.emit(&mut builder).unwrap();
        let rebuilt = builder.finish().unwrap();

        assert_eq!(rebuilt, original);
        assert_eq!(rebuilt.at("nested").unwrap().tag(), Tag::Object);
    }

    #[test]
    fn scalar_root() {
        let mut builder = ValueBuilder::new();
        builder.value(Scalar::F64(0.5)).unwrap();
        assert_eq!(builder.finish().unwrap(), Value::from(0.5));
    }

    #[test]
    fn unbalanced_events_fail() {
        let mut builder = ValueBuilder::new();
        builder.begin_array().unwrap();
        assert!(builder.end_object().is_err());

        let mut builder = ValueBuilder::new();
        builder.begin_array().unwrap();
        assert!(builder.finish().is_err());

        assert!(ValueBuilder::new().finish().is_err());
    }

    #[test]
    fn member_needs_a_name() {
        let mut builder = ValueBuilder::new();
        builder.begin_object().unwrap();
        assert!(builder.value(Scalar::Null).is_err());
    }

    #[test]
    fn second_root_is_rejected() {
        let mut builder = ValueBuilder::new();
        builder.value(Scalar::Null).unwrap();
        assert!(builder.value(Scalar::Null).is_err());
    }

    #[test]
    fn every_name_needs_one_value() {
        let mut builder = ValueBuilder::new();
        builder.begin_object().unwrap();
        builder.name("k").unwrap();
        let err = builder.end_object().unwrap_err();
        assert_eq!(err.to_string(), "object closed before a value for member k");

        let mut builder = ValueBuilder::new();
        builder.begin_object().unwrap();
        builder.name("a").unwrap();
        assert!(builder.name("b").is_err());
    }

    #[derive(Clone, Debug)]
    struct Silent;

    impl crate::ExtensionPayload for Silent {
        fn emit(&self, _handler: &mut dyn ContentHandler) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn silent_extension_member_fails_to_rebuild() {
        let mut v = Value::empty_object();
        v.set("k", Value::from_extension(Silent)).unwrap();
        let mut builder = ValueBuilder::new();
        assert!(v.emit(&mut builder).is_err());
    }
}
