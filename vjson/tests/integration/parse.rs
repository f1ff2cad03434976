use vjson::{
    ContentHandler, ErrorKind, LenientErrorHandler, ParseErrorHandler, ParseErrorKind,
    ParseOptions, Position, Result, Scalar, Tag, Value, parse_into,
};

use crate::setup;

/// Converts through `serde_json` for cross-checking.
fn reference(input: &str) -> serde_json::Value {
    serde_json::from_str(input).unwrap()
}

fn to_reference(v: &Value) -> serde_json::Value {
    serde_json::from_str(&v.to_string()).unwrap()
}

#[test]
fn agrees_with_serde_json() {
    setup();
    let inputs = [
        "null",
        "true",
        "0",
        "12345678901234567890",
        "-9223372036854775808",
        "1.5e3",
        "-0.25",
        r#""plain""#,
        r#""esc\"aped\\ \/ \b\f\n\r\t""#,
        "[]",
        "{}",
        r#"{"a":[1,{"b":null}],"c":"d"}"#,
        " \n\t[ 1 , 2 ]\r\n",
    ];
    for input in inputs {
        let ours = Value::parse(input).unwrap();
        assert_eq!(to_reference(&ours), reference(input), "input: {input}");
    }
}

#[test]
fn integer_representations() {
    setup();
    assert_eq!(Value::parse("0").unwrap().tag(), Tag::UInt64);
    assert_eq!(Value::parse("-1").unwrap().tag(), Tag::Int64);
    assert_eq!(
        Value::parse("18446744073709551615").unwrap(),
        Value::from(u64::MAX)
    );
    // Past u64 falls back to a double
    let big = Value::parse("18446744073709551616").unwrap();
    assert_eq!(big.tag(), Tag::Double);
    assert_eq!(big.as_f64().unwrap(), 18446744073709551616.0);
}

#[test]
fn short_and_long_strings() {
    setup();
    let v = Value::parse(r#"["short","a string well past inline"]"#).unwrap();
    assert_eq!(v[0].tag(), Tag::SmallString);
    assert_eq!(v[1].tag(), Tag::String);
    assert_eq!(v[1].as_str().unwrap(), "a string well past inline");
}

#[test]
fn errors_report_line_and_column() {
    setup();
    let err = Value::parse("{\n  \"a\": tru\n}").unwrap_err();
    assert!(err.is_parse());
    let position = err.position.unwrap();
    assert_eq!(position.line, 2);
    assert_eq!(position.column, 11);
}

#[test]
fn malformed_inputs() {
    setup();
    let cases = [
        ("", "empty"),
        ("[1,", "eof in array"),
        ("{\"a\" 1}", "missing colon"),
        ("{1:2}", "non-string key"),
        ("01", "leading zero"),
        ("1.", "bare fraction"),
        ("[1] 2", "trailing value"),
        ("\"abc", "unterminated string"),
        ("\"\\x\"", "bad escape"),
        ("nul", "truncated literal"),
        ("[1 2]", "missing comma"),
    ];
    for (input, what) in cases {
        let err = Value::parse(input).unwrap_err();
        assert!(err.is_parse(), "{what}: {err}");
    }
}

#[test]
fn trailing_content_is_rejected() {
    setup();
    let err = Value::parse("{} x").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::Parse(ParseErrorKind::TrailingCharacters)
    ));
}

#[test]
fn extra_commas_need_a_lenient_handler() {
    setup();
    let input = r#"{"a":[1,2,],}"#;
    let err = Value::parse(input).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::Parse(ParseErrorKind::ExtraComma)
    ));

    let v = Value::parse_with(input, &ParseOptions::default(), &mut LenientErrorHandler).unwrap();
    assert_eq!(v.to_string(), r#"{"a":[1,2]}"#);
}

#[derive(Default)]
struct Recorder {
    seen: Vec<(ParseErrorKind, Position)>,
}

impl ParseErrorHandler for Recorder {
    fn error(&mut self, kind: &ParseErrorKind, position: Position) -> Result<()> {
        self.seen.push((kind.clone(), position));
        Ok(())
    }
}

#[test]
fn error_handler_sees_every_recovery() {
    setup();
    let mut recorder = Recorder::default();
    let v = Value::parse_with("[[1,],[2,],]", &ParseOptions::default(), &mut recorder).unwrap();
    assert_eq!(v.to_string(), "[[1],[2]]");

    let offsets: Vec<usize> = recorder.seen.iter().map(|(_, p)| p.offset).collect();
    // Reported at the closing bracket
    assert_eq!(offsets, [4, 9, 11]);
    assert!(
        recorder
            .seen
            .iter()
            .all(|(kind, _)| *kind == ParseErrorKind::ExtraComma)
    );
}

#[test]
fn depth_limit() {
    setup();
    let nested = format!("{}{}", "[".repeat(10), "]".repeat(10));

    let shallow = ParseOptions::new().max_depth(9);
    let err = Value::parse_with(&nested, &shallow, &mut LenientErrorHandler).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::Parse(ParseErrorKind::DepthLimitExceeded(9))
    ));

    let enough = ParseOptions::new().max_depth(10);
    assert!(Value::parse_with(&nested, &enough, &mut LenientErrorHandler).is_ok());
}

#[test]
fn invalid_utf8_in_bytes() {
    setup();
    let err = Value::parse_slice(b"[\"ok\", \"\xff\"]").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::Parse(ParseErrorKind::InvalidUtf8)
    ));
    assert_eq!(err.position.unwrap().offset, 8);
}

#[test]
fn reader_and_from_str() {
    setup();
    let from_reader = Value::parse_reader(&b"{\"r\": [true]}"[..]).unwrap();
    let from_str: Value = "{\"r\": [true]}".parse().unwrap();
    assert_eq!(from_reader, from_str);
}

#[test]
fn missing_file() {
    setup();
    let path = std::env::temp_dir().join("vjson-integration-no-such-file.json");
    let err = Value::parse_file(&path).unwrap_err();
    match &err.kind {
        ErrorKind::Io { opening, path: p, .. } => {
            assert!(*opening);
            assert_eq!(p.as_deref(), Some(path.as_path()));
        }
        other => panic!("expected an I/O error, got {other:?}"),
    }
    assert!(err.to_string().starts_with("Cannot open file"));
}

/// Counts events without building anything.
#[derive(Default)]
struct Census {
    objects: usize,
    arrays: usize,
    names: usize,
    leaves: usize,
}

impl ContentHandler for Census {
    fn begin_object(&mut self) -> Result<()> {
        self.objects += 1;
        Ok(())
    }

    fn name(&mut self, _name: &str) -> Result<()> {
        self.names += 1;
        Ok(())
    }

    fn end_object(&mut self) -> Result<()> {
        Ok(())
    }

    fn begin_array(&mut self) -> Result<()> {
        self.arrays += 1;
        Ok(())
    }

    fn end_array(&mut self) -> Result<()> {
        Ok(())
    }

    fn value(&mut self, _value: Scalar<'_>) -> Result<()> {
        self.leaves += 1;
        Ok(())
    }
}

#[test]
fn parse_into_streams_events() {
    setup();
    let mut census = Census::default();
    parse_into(
        r#"{"a":[1,2,{"b":null}],"c":"d"}"#,
        &mut census,
        &ParseOptions::default(),
        &mut vjson::StrictErrorHandler,
    )
    .unwrap();
    assert_eq!(census.objects, 2);
    assert_eq!(census.arrays, 1);
    assert_eq!(census.names, 3);
    assert_eq!(census.leaves, 4);
}
