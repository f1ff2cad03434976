use vjson::{JsonWriter, Value, WriteOptions, pretty_print, print};

use crate::setup;

fn config() -> Value {
    let mut root = Value::empty_object();
    root.set("name", "service").unwrap();
    root.set("replicas", 3).unwrap();
    root.set("ratio", 0.75).unwrap();
    root.set("tags", vec!["a", "b"]).unwrap();
    root.set("limits", Value::empty_object()).unwrap();
    root.set("owner", Value::NULL).unwrap();
    root
}

#[test]
fn compact() {
    setup();
    insta::assert_snapshot!(
        config().to_string(),
        @r#"{"name":"service","replicas":3,"ratio":0.75,"tags":["a","b"],"limits":{},"owner":null}"#
    );
}

#[test]
fn pretty() {
    setup();
    insta::assert_snapshot!(config().to_string_pretty(), @r#"
    {
      "name": "service",
      "replicas": 3,
      "ratio": 0.75,
      "tags": [
        "a",
        "b"
      ],
      "limits": {},
      "owner": null
    }
    "#);
}

#[test]
fn custom_indent() {
    setup();
    let options = WriteOptions::new().pretty().indent("\t");
    let v = Value::parse(r#"{"a":[1]}"#).unwrap();
    assert_eq!(v.to_string_with(&options), "{\n\t\"a\": [\n\t\t1\n\t]\n}");
}

#[test]
fn parse_of_output_is_equal() {
    setup();
    let v = config();
    assert_eq!(Value::parse(&v.to_string()).unwrap(), v);
    assert_eq!(Value::parse(&v.to_string_pretty()).unwrap(), v);
}

#[test]
fn display_adapters() {
    setup();
    let v = Value::parse("[true,{}]").unwrap();
    assert_eq!(format!("{v}"), "[true,{}]");
    assert_eq!(print(&v).to_string(), "[true,{}]");
    assert_eq!(pretty_print(&v).to_string(), "[\n  true,\n  {}\n]");
}

#[test]
fn as_string_renders_non_strings() {
    setup();
    assert_eq!(Value::from("raw").as_string(), "raw");
    assert_eq!(Value::from(-4).as_string(), "-4");
    assert_eq!(Value::parse("[1,2]").unwrap().as_string(), "[1,2]");
    assert_eq!(
        Value::parse("[1]")
            .unwrap()
            .as_string_with(&WriteOptions::new().pretty()),
        "[\n  1\n]"
    );
}

#[test]
fn writer_is_a_handler() {
    setup();
    let v = config();
    let mut writer = JsonWriter::new();
    v.emit(&mut writer).unwrap();
    assert_eq!(writer.finish(), v.to_string());
}

#[test]
fn to_writer_streams_bytes() {
    setup();
    let mut out = Vec::new();
    config().to_writer(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), config().to_string());
}
