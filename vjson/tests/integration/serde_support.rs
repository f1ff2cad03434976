use vjson::{Tag, Value};

use crate::setup;

#[test]
fn serde_json_round_trip() {
    setup();
    let text = r#"{"id":7,"delta":-3,"score":0.5,"tags":["x","y"],"meta":{},"gone":null}"#;
    let ours = Value::parse(text).unwrap();

    let theirs: serde_json::Value = serde_json::to_value(&ours).unwrap();
    assert_eq!(theirs, serde_json::from_str::<serde_json::Value>(text).unwrap());

    let back: Value = serde_json::from_value(theirs).unwrap();
    assert_eq!(back, ours);
    assert_eq!(back["delta"].tag(), Tag::Int64);
    assert_eq!(back["id"].tag(), Tag::UInt64);
}

#[test]
fn serde_output_matches_writer() {
    setup();
    let v = Value::parse(r#"[1,"two",{"k":true}]"#).unwrap();
    assert_eq!(serde_json::to_string(&v).unwrap(), v.to_string());
}
