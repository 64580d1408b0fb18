//! Integration tests for field derivation
//!
//! Derivation runs at construction and again when a container binds a
//! token, so fields that depend on the injected name or prefix fill in
//! only once the token is declared.

use std::sync::Arc;

use tokenset_core::{AttributeSpec, Container, ContainerConfig, PREFIX, TokenType, Value};

fn also_type() -> Arc<TokenType> {
    TokenType::define("tests::AlsoToken")
        .attribute(
            "also",
            AttributeSpec::new()
                .derived(|f| Value::from(format!("also {}", f.str("name").unwrap_or_default()))),
        )
        .build()
}

// =============================================================================
// Unconditional derivation
// =============================================================================

#[test]
fn derives_from_the_declared_name() {
    let ty = also_type();
    let tokens = Container::define("tests::Also")
        .token("x", ty.token().build().unwrap())
        .token("y", ty.token().set("also", "kept").build().unwrap())
        .build()
        .unwrap();

    assert_eq!(tokens["x"].str("also"), Some("also x"));
    assert_eq!(tokens["y"].str("also"), Some("kept"));
}

#[test]
fn derives_from_the_injected_prefix() {
    let ty = TokenType::define("tests::Qualified")
        .attribute(PREFIX, AttributeSpec::new())
        .attribute(
            "qualified",
            AttributeSpec::new().derived(|f| {
                Value::from(format!(
                    "{}:{}",
                    f.str(PREFIX).unwrap_or_default(),
                    f.str("name").unwrap_or_default()
                ))
            }),
        )
        .build();

    let tokens = Container::define("tests::QualifiedTokens")
        .config(ContainerConfig::new().with_prefix("ns"))
        .token("item", ty.token().build().unwrap())
        .build()
        .unwrap();

    assert_eq!(tokens["item"].str("qualified"), Some("ns:item"));
}

#[test]
fn explicit_nil_is_still_derived() {
    let ty = also_type();
    let token = ty.token().named("x").set("also", Value::Nil).build().unwrap();
    assert_eq!(token.str("also"), Some("also x"));
}

#[test]
fn rebuilding_keeps_derived_values() {
    let tokens = Container::define("tests::Rebuilt")
        .token("x", also_type().token().build().unwrap())
        .build()
        .unwrap();

    let copy = tokens["x"].to_builder().build().unwrap();
    assert_eq!(copy.str("also"), Some("also x"));
    assert!(!copy.is_bound());
}

// =============================================================================
// Derivation on request
// =============================================================================

fn optional_type() -> Arc<TokenType> {
    TokenType::define("tests::OptionalToken")
        .attribute(
            "foo",
            AttributeSpec::new().derived_if_requested(|f| match f.str("name") {
                Some("decline") | None => None,
                Some(name) => Some(Value::from(name.to_uppercase())),
            }),
        )
        .build()
}

#[test]
fn requested_fields_resolve_at_binding() {
    let ty = optional_type();
    let template = ty.token().request("foo").build().unwrap();
    assert!(template.is_requested("foo"));

    let tokens = Container::define("tests::Requested")
        .token("plain", ty.token().build().unwrap())
        .token("asked", template)
        .token("decline", ty.token().request("foo").build().unwrap())
        .build()
        .unwrap();

    assert_eq!(tokens["plain"].get("foo"), Some(&Value::Nil));
    assert_eq!(tokens["asked"].str("foo"), Some("ASKED"));
    assert!(tokens["decline"].is_requested("foo"));
    assert_eq!(tokens["decline"].get("foo"), None);
}
