//! Tests for resolving names and tokens

use std::sync::Arc;

use tokenset_core::{Container, ErrorKind, TokenType};
use tokenset_validate::{Candidate, TokenValidator};

use crate::{my_token, my_tokens};

// =============================================================================
// Names
// =============================================================================

#[test]
fn known_name_resolves() {
    let tokens = my_tokens("tests::MyTokens");
    let validator = TokenValidator::for_container(&tokens).unwrap();

    let baz = validator.validate("baz").unwrap();
    assert!(Arc::ptr_eq(&baz, &tokens["baz"]));
    assert_eq!(validator.names().collect::<Vec<_>>(), vec!["foo", "bar", "baz"]);
}

#[test]
fn unknown_name_is_rejected() {
    let tokens = my_tokens("tests::MyTokens");
    let validator = TokenValidator::for_container(&tokens).unwrap();

    let err = validator.validate("bob").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidInput(_)));
    assert_eq!(err.to_string(), "invalid token: bob");
}

// =============================================================================
// Tokens
// =============================================================================

#[test]
fn member_token_passes_through() {
    let tokens = my_tokens("tests::MyTokens");
    let validator = TokenValidator::for_container(&tokens).unwrap();

    let foo = validator.validate(&tokens["foo"]).unwrap();
    assert_eq!(foo, tokens["foo"]);
}

#[test]
fn token_from_another_container_is_rejected() {
    let tokens = my_tokens("tests::MyTokens");
    let others = my_tokens("tests::OtherTokens");
    let validator = TokenValidator::for_container(&tokens).unwrap();

    assert!(validator.validate(Candidate::Token(&others["foo"])).is_err());
}

#[test]
fn token_of_another_type_is_rejected() {
    let tokens = my_tokens("tests::MyTokens");
    let other = TokenType::define("tests::Other").build();
    let others = Container::define("tests::MyTokens")
        .token("foo", other.token().build().unwrap())
        .build()
        .unwrap();
    let validator = TokenValidator::for_container(&tokens).unwrap();

    assert!(validator.validate(&others["foo"]).is_err());
}

// =============================================================================
// Several containers
// =============================================================================

#[test]
fn inherited_tokens_are_not_ambiguous() {
    let parent = my_tokens("tests::Parent");
    let child = Container::define("tests::Child")
        .extends(&parent)
        .token("qux", my_token().token().build().unwrap())
        .build()
        .unwrap();

    let validator = TokenValidator::new(&my_token(), &[Arc::clone(&parent), Arc::clone(&child)]).unwrap();
    assert_eq!(validator.names().collect::<Vec<_>>(), vec!["foo", "bar", "baz", "qux"]);
    assert!(Arc::ptr_eq(&validator.validate("foo").unwrap(), &parent["foo"]));
}

#[test]
fn clashing_names_are_a_setup_error() {
    let first = my_tokens("tests::First");
    let second = my_tokens("tests::Second");

    let err = TokenValidator::new(&my_token(), &[first, second]).unwrap_err();
    match err.kind {
        ErrorKind::NonUniqueName { name, containers } => {
            assert_eq!(name, "foo");
            assert_eq!(containers, vec!["tests::First", "tests::Second"]);
        }
        other => panic!("expected NonUniqueName, got {other:?}"),
    }
}

#[test]
fn empty_container_has_no_validator() {
    let empty = Container::define("tests::Empty").build().unwrap();
    let err = TokenValidator::for_container(&empty).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::EmptyContainer(_)));
}
