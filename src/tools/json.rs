// src/tools/json.rs
use serde_json::Value;

use crate::core::error::{Result, ToolError};

fn parse(input: &str) -> Result<Value> {
    serde_json::from_str(input).map_err(|e| ToolError::MalformedInput(format!("JSON error: {}", e)))
}

/// Re-serializes with two-space indentation, keeping key order.
pub fn format(input: &str) -> Result<String> {
    let value = parse(input)?;
    serde_json::to_string_pretty(&value).map_err(|e| ToolError::MalformedInput(e.to_string()))
}

/// Re-serializes without insignificant whitespace.
pub fn compress(input: &str) -> Result<String> {
    let value = parse(input)?;
    serde_json::to_string(&value).map_err(|e| ToolError::MalformedInput(e.to_string()))
}

/// Parses and discards, reporting the parser's message on failure.
pub fn validate(input: &str) -> Result<()> {
    parse(input).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = r#"{"name":"toolbox","tags":["a","b"],"nested":{"z":1,"a":null}}"#;

    #[test]
    fn format_uses_two_spaces_and_keeps_order() {
        let formatted = format(SAMPLE).unwrap();
        assert!(formatted.starts_with("{\n  \"name\": \"toolbox\""));
        assert!(formatted.contains("\n    \"z\": 1,\n    \"a\": null\n"));
    }

    #[test]
    fn compress_strips_whitespace() {
        let spaced = "{ \"a\" : [ 1 , 2 ] ,\n \"b\" : { } }";
        assert_eq!(compress(spaced).unwrap(), r#"{"a":[1,2],"b":{}}"#);
    }

    #[test]
    fn format_and_compress_are_idempotent() {
        let once = format(SAMPLE).unwrap();
        assert_eq!(format(&once).unwrap(), once);

        let small = compress(SAMPLE).unwrap();
        assert_eq!(compress(&small).unwrap(), small);
        assert_eq!(small, SAMPLE);
    }

    #[test]
    fn invalid_json_reports_parser_message() {
        match validate("{\"a\": }") {
            Err(ToolError::MalformedInput(msg)) => assert!(msg.contains("line 1")),
            other => panic!("unexpected {:?}", other),
        }
        assert!(format("[1,").is_err());
        assert!(compress("").is_err());
        assert!(validate("  [true, false, null]  ").is_ok());
    }

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            ".{0,12}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 48, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::vec(("[a-z]{1,6}", inner), 0..6)
                    .prop_map(|pairs| Value::Object(pairs.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn format_and_compress_are_idempotent_for_any_document(value in json_value()) {
            let input = serde_json::to_string(&value).unwrap();

            let pretty = format(&input).unwrap();
            prop_assert_eq!(&format(&pretty).unwrap(), &pretty);

            let small = compress(&input).unwrap();
            prop_assert_eq!(&compress(&small).unwrap(), &small);
            prop_assert_eq!(&compress(&pretty).unwrap(), &small);
            prop_assert_eq!(&small, &input);
        }
    }
}
