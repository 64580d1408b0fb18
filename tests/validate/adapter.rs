//! Tests for the JSON adapter and serde seed

use serde::de::DeserializeSeed;
use serde_json::json;
use tokenset_validate::{TokenAdapter, TokenSeed, TokenValidator};

use crate::my_tokens;

#[test]
fn validates_json_strings() {
    let tokens = my_tokens("tests::MyTokens");
    let validator = TokenValidator::for_container(&tokens).unwrap();

    assert_eq!(validator.validate_json(&json!("bar")).unwrap().str("stuff"), Some("World"));
    assert!(validator.validate_json(&json!("bob")).is_err());
    assert!(validator.validate_json(&json!(3)).is_err());
    assert!(validator.validate_json(&json!(null)).is_err());
}

#[test]
fn schema_lists_every_name() {
    let tokens = my_tokens("tests::MyTokens");
    let validator = TokenValidator::for_container(&tokens).unwrap();

    assert_eq!(
        validator.json_schema("MyToken"),
        json!({
            "title": "MyToken",
            "type": "string",
            "pattern": "^foo|bar|baz$",
            "examples": ["foo", "bar", "baz"],
        })
    );
}

#[test]
fn seed_reads_names_from_json() {
    let tokens = my_tokens("tests::MyTokens");
    let validator = TokenValidator::for_container(&tokens).unwrap();

    let mut de = serde_json::Deserializer::from_str("\"foo\"");
    let foo = TokenSeed::new(&validator).deserialize(&mut de).unwrap();
    assert_eq!(foo, tokens["foo"]);

    let mut de = serde_json::Deserializer::from_str("\"bob\"");
    let err = TokenSeed::new(&validator).deserialize(&mut de).unwrap_err();
    assert!(err.to_string().contains("bob"));

    let mut de = serde_json::Deserializer::from_str("12");
    let err = TokenSeed::new(&validator).deserialize(&mut de).unwrap_err();
    assert!(err.to_string().contains("a MyToken name"));
}
