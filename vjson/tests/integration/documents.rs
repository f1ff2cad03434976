use vjson::{Tag, VObject, Value};

use crate::setup;

#[test]
fn mixed_array_round_trip() {
    setup();
    let doc = Value::parse(r#"[1, "two", {"k": true}]"#).unwrap();

    assert_eq!(doc.tag(), Tag::Array);
    assert_eq!(doc.size(), 3);
    assert_eq!(doc[0].as_u64().unwrap(), 1);
    assert_eq!(doc[1].as_str().unwrap(), "two");
    assert_eq!(doc[2]["k"], Value::TRUE);

    let text = doc.to_string();
    assert_eq!(text, r#"[1,"two",{"k":true}]"#);
    assert_eq!(Value::parse(&text).unwrap(), doc);
}

#[test]
fn copies_are_independent() {
    setup();
    let original = Value::parse(r#"{"list":[1,2,{"deep":"value that is long"}]}"#).unwrap();
    let mut copy = original.clone();

    copy.at_mut("list").unwrap()[2]
        .set("deep", "changed")
        .unwrap();
    copy.at_mut("list").unwrap().push(4).unwrap();

    assert_eq!(original["list"].size(), 3);
    assert_eq!(
        original["list"][2]["deep"].as_str().unwrap(),
        "value that is long"
    );
    assert_eq!(copy["list"][2]["deep"].as_str().unwrap(), "changed");
    assert_ne!(original, copy);
}

#[test]
fn empty_object_reads_never_allocate_members() {
    setup();
    let mut v = Value::empty_object();

    assert_eq!(v.size(), 0);
    assert!(v.is_empty());
    assert!(!v.contains_key("a"));
    assert_eq!(v.find("a").unwrap(), None);
    assert!(v.get("a").unwrap().is_null());
    assert!(v.at("a").unwrap_err().is_key_not_found());
    assert_eq!(v.members().unwrap().count(), 0);
    assert_eq!(v.erase("a").unwrap(), None);
    assert_eq!(v.tag(), Tag::EmptyObject);

    v.set("a", 1).unwrap();
    assert_eq!(v.tag(), Tag::Object);
}

#[test]
fn numbers_compare_across_representations() {
    setup();
    assert_eq!(Value::from(1i64), Value::from(1u64));
    assert_eq!(Value::from(1u64), Value::from(1.0));
    assert_ne!(Value::from(-1i64), Value::from(u64::MAX));
    assert_ne!(Value::from(1), Value::from("1"));
    assert_ne!(Value::from(1), Value::TRUE);

    let parsed = Value::parse("[-3, 3, 3.0]").unwrap();
    assert!(parsed[0].is_i64());
    assert!(parsed[1].is_u64());
    assert!(parsed[2].is_f64());
    assert_eq!(parsed[1], parsed[2]);
}

#[test]
fn empty_object_equals_materialized_empty_object() {
    setup();
    let lazy = Value::empty_object();
    let mut materialized = Value::object();
    assert_eq!(materialized.tag(), Tag::Object);
    assert_eq!(lazy, materialized);

    materialized.set("x", 1).unwrap();
    materialized.erase("x").unwrap();
    assert_eq!(lazy, materialized);
}

#[test]
fn path_assignment_through_proxies() {
    setup();
    let mut root = Value::empty_object();
    root.key("server")
        .unwrap()
        .key("http")
        .unwrap()
        .key("port")
        .unwrap()
        .set(8080)
        .unwrap();
    root.key("server")
        .unwrap()
        .key("http")
        .unwrap()
        .key("host")
        .unwrap()
        .set("localhost")
        .unwrap();

    assert_eq!(
        root.to_string(),
        r#"{"server":{"http":{"port":8080,"host":"localhost"}}}"#
    );
}

#[test]
fn members_keep_insertion_order() {
    setup();
    let mut v = Value::empty_object();
    for key in ["zeta", "alpha", "mid"] {
        v.set(key, key.len()).unwrap();
    }
    v.set("alpha", 0).unwrap();

    let keys: Vec<&str> = v.members().unwrap().map(|(k, _)| k).collect();
    assert_eq!(keys, ["zeta", "alpha", "mid"]);

    let reversed: Vec<&str> = v.members().unwrap().rev().map(|(k, _)| k).collect();
    assert_eq!(reversed, ["mid", "alpha", "zeta"]);
}

#[test]
fn in_place_updates() {
    setup();
    let mut v = Value::parse(r#"{"counts":[1,2,3]}"#).unwrap();

    for n in v.at_mut("counts").unwrap().elements_mut().unwrap() {
        let next = n.as_u64().unwrap() * 10;
        n.assign(next);
    }
    for (_, member) in v.members_mut().unwrap() {
        member.push(40).unwrap();
    }

    assert_eq!(v.to_string(), r#"{"counts":[10,20,30,40]}"#);
}

#[test]
fn type_mismatches_leave_values_untouched() {
    setup();
    let mut s = Value::from("text");

    let err = s.set("k", 1).unwrap_err();
    assert!(err.is_type_mismatch());
    assert_eq!(
        err.to_string(),
        "Attempting to set k on a value that is not an object"
    );

    let err = s.push(1).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Attempting to insert into a value that is not an array"
    );
    assert_eq!(s, Value::from("text"));

    let arr = Value::array();
    let err = arr.at("k").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Attempting to get k from a value that is not an object"
    );
}

#[test]
fn multi_dimensional_arrays() {
    setup();
    let grid = Value::make_2d_array_with(2, 3, 0);
    assert_eq!(grid.to_string(), "[[0,0,0],[0,0,0]]");

    let cube = Value::make_multi_array(&[2, 1, 2], "x");
    assert_eq!(cube.to_string(), r#"[[["x","x"]],[["x","x"]]]"#);

    let nulls = Value::make_array(2);
    assert_eq!(nulls.to_string(), "[null,null]");
}

#[test]
fn building_from_collections() {
    setup();
    let arr: Value = (1..=3).map(Value::from).collect();
    assert_eq!(arr.to_string(), "[1,2,3]");

    let obj: Value = [("a", 1), ("b", 2)].into_iter().collect();
    assert_eq!(obj.to_string(), r#"{"a":1,"b":2}"#);

    let mut members = VObject::new();
    members.insert("opt", Option::<i32>::None);
    members.insert("unit", ());
    assert_eq!(Value::from(members).to_string(), r#"{"opt":null,"unit":null}"#);
}

#[test]
fn swap_and_take() {
    setup();
    let mut a = Value::from(vec![1, 2]);
    let mut b = Value::from("b");
    a.swap(&mut b);
    assert_eq!(a, Value::from("b"));
    assert_eq!(b.size(), 2);

    let taken = b.take();
    assert!(b.is_null());
    assert_eq!(taken.to_string(), "[1,2]");
}

#[test]
fn values_cross_threads() {
    setup();
    let doc = std::sync::Arc::new(Value::parse(r#"{"shared":[1,2,3]}"#).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let doc = doc.clone();
            std::thread::spawn(move || doc["shared"].size())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 3);
    }
}
