//! Deferred-materialization access to object members.

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::value::Value;

/// A handle on the member `key` of an object that may not exist yet.
///
/// A proxy records the path from the value it was taken on; nothing is created until it writes.
/// Reading goes through [`get`](KeyProxy::get), which fails if any member on the path is
/// missing and leaves the tree as it was. Only [`set`](KeyProxy::set) and
/// [`or_insert_default`](KeyProxy::or_insert_default) write; they materialize an empty parent
/// and create missing intermediate objects, so a path of any depth can be assigned in one
/// expression:
///
/// ```
/// use vjson::Value;
///
/// let mut root = Value::empty_object();
/// root.key("a").unwrap().key("b").unwrap().set(5).unwrap();
/// assert_eq!(root.at("a").unwrap().at("b").unwrap(), &Value::from(5));
/// ```
#[derive(Debug)]
pub struct KeyProxy<'a> {
    parent: &'a mut Value,
    /// Members between `parent` and the one this proxy names. Each one that exists is an object.
    via: Vec<&'a str>,
    key: &'a str,
}

impl<'a> KeyProxy<'a> {
    /// The member name this proxy refers to.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.key
    }

    /// Returns `true` if the member and every object on the way to it exist.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.peek().is_some()
    }

    /// Reads the member; fails with "not found" if it or an object on the way is missing.
    pub fn get(&self) -> Result<&Value> {
        let mut node: &Value = self.parent;
        for key in &self.via {
            node = node.at(key)?;
        }
        node.at(self.key)
    }

    /// Mutably borrows the member; fails with "not found" if it or an object on the way is
    /// missing.
    pub fn get_mut(&mut self) -> Result<&mut Value> {
        let mut node: &mut Value = self.parent;
        for key in &self.via {
            node = node.at_mut(key)?;
        }
        node.at_mut(self.key)
    }

    /// Turns the proxy into a mutable borrow of the existing member.
    pub fn into_mut(self) -> Result<&'a mut Value> {
        let KeyProxy { parent, via, key } = self;
        let mut node = parent;
        for step in &via {
            node = node.at_mut(step)?;
        }
        node.at_mut(key)
    }

    /// Assigns the member, creating it and any missing objects on the way.
    pub fn set(self, value: impl Into<Value>) -> Result<()> {
        let KeyProxy { parent, via, key } = self;
        materialize_path(parent, &via)?.set(key, value)
    }

    /// Returns the member, inserting empty objects for it and anything missing on the way.
    pub fn or_insert_default(self) -> Result<&'a mut Value> {
        let KeyProxy { parent, via, key } = self;
        materialize_path(parent, &via)?.get_or_insert_default(key)
    }

    /// Descends one level to the member `name` of this member. Nothing is created.
    ///
    /// Fails if this member exists and is not an object.
    pub fn key(mut self, name: &'a str) -> Result<KeyProxy<'a>> {
        if self.peek().is_some_and(|member| !member.is_object()) {
            return Err(Error::not_an_object_get(name));
        }
        self.via.push(self.key);
        self.key = name;
        Ok(self)
    }

    fn peek(&self) -> Option<&Value> {
        let mut node: &Value = self.parent;
        for key in &self.via {
            node = node.find(key).ok()??;
        }
        node.find(self.key).ok().flatten()
    }
}

/// Walks `via` from `node`, inserting empty objects for missing members.
///
/// Every existing member on the path is an object, so this cannot fail halfway.
fn materialize_path<'a>(mut node: &'a mut Value, via: &[&str]) -> Result<&'a mut Value> {
    for key in via {
        node = node.get_or_insert_default(key)?;
    }
    Ok(node)
}

impl Value {
    /// A proxy on the member `name`, which need not exist yet.
    ///
    /// Fails if this value is not an object. An empty object is not materialized until the
    /// proxy writes.
    pub fn key<'a>(&'a mut self, name: &'a str) -> Result<KeyProxy<'a>> {
        if !self.is_object() {
            return Err(Error::not_an_object_get(name));
        }
        Ok(KeyProxy {
            parent: self,
            via: Vec::new(),
            key: name,
        })
    }
}
