use std::collections::BTreeMap;

use vjson::{
    ContentHandler, ErrorKind, ExtensionPayload, Result, Scalar, Tag, Value, ValueBuilder,
};

use crate::setup;

#[derive(Clone, Debug, PartialEq)]
struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl ExtensionPayload for Matrix {
    fn emit(&self, handler: &mut dyn ContentHandler) -> Result<()> {
        handler.begin_array()?;
        for row in self.data.chunks(self.cols) {
            handler.begin_array()?;
            for &x in row {
                handler.value(Scalar::F64(x))?;
            }
            handler.end_array()?;
        }
        handler.end_array()
    }
}

#[derive(Clone, Debug, Default)]
struct Registry(BTreeMap<String, u32>);

impl ExtensionPayload for Registry {
    fn emit(&self, handler: &mut dyn ContentHandler) -> Result<()> {
        handler.begin_object()?;
        for (k, v) in &self.0 {
            handler.name(k)?;
            handler.value(Scalar::U64(u64::from(*v)))?;
        }
        handler.end_object()
    }
}

#[derive(Clone, Debug)]
struct Opaque;

impl ExtensionPayload for Opaque {}

fn identity() -> Matrix {
    Matrix {
        rows: 2,
        cols: 2,
        data: vec![1.0, 0.0, 0.0, 1.0],
    }
}

#[test]
fn extension_inside_a_document() {
    setup();
    let mut doc = Value::empty_object();
    doc.set("transform", Value::from_extension(identity()))
        .unwrap();
    doc.set("label", "id").unwrap();

    assert_eq!(doc["transform"].tag(), Tag::Extension);
    assert_eq!(
        doc.to_string(),
        r#"{"transform":[[1.0,0.0],[0.0,1.0]],"label":"id"}"#
    );
}

#[test]
fn typed_access() {
    setup();
    let mut v = Value::from_extension(identity());
    assert_eq!(v.extension::<Matrix>().unwrap().rows, 2);

    v.extension_mut::<Matrix>().unwrap().data[1] = 5.0;
    assert_eq!(v.to_string(), "[[1.0,5.0],[0.0,1.0]]");

    let err = v.extension::<Registry>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::BadExtensionCast { .. }));
    assert!(err.to_string().starts_with("Bad any cast"));

    let err = Value::from(1).extension::<Matrix>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotAnExtension));
}

#[test]
fn clones_are_deep() {
    setup();
    let mut registry = Registry::default();
    registry.0.insert("a".into(), 1);
    let original = Value::from_extension(registry);

    let mut copy = original.clone();
    copy.extension_mut::<Registry>()
        .unwrap()
        .0
        .insert("b".into(), 2);

    assert_eq!(original.to_string(), r#"{"a":1}"#);
    assert_eq!(copy.to_string(), r#"{"a":1,"b":2}"#);
}

#[test]
fn extensions_never_compare_equal() {
    setup();
    let a = Value::from_extension(identity());
    let b = a.clone();
    assert_ne!(a, b);
    assert_ne!(a, Value::parse("[[1.0,0.0],[0.0,1.0]]").unwrap());
}

#[test]
fn default_emit_is_null() {
    setup();
    let v = Value::from(vec![Value::from_extension(Opaque)]);
    assert_eq!(v.to_string(), "[null]");
    assert_eq!(
        v[0].extension_value().unwrap().type_name(),
        std::any::type_name::<Opaque>()
    );
}

#[test]
fn rebuilding_materializes_extensions() {
    setup();
    let doc = Value::from(vec![Value::from_extension(identity())]);
    let mut builder = ValueBuilder::new();
    doc.emit(&mut builder).unwrap();
    let plain = builder.finish().unwrap();

    assert_eq!(plain[0].tag(), Tag::Array);
    assert_eq!(plain, Value::parse("[[[1.0,0.0],[0.0,1.0]]]").unwrap());
}
