//! Integration tests for Layer 1: Core
//!
//! Tests for token construction, derivation, container binding,
//! inheritance, and the equality and ordering contract.

mod derivation;
mod properties;

use std::sync::Arc;

use tokenset_core::{AttributeSpec, Container, TokenType};

/// `name` and `stuff`, the shape most tests use.
pub fn my_token() -> Arc<TokenType> {
    TokenType::define("tests::MyToken")
        .attribute("stuff", AttributeSpec::new())
        .build()
}

/// `foo`, `bar`, `baz` with `stuff` of Hello, World, and empty.
pub fn my_tokens() -> Arc<Container> {
    let ty = my_token();
    Container::define("tests::MyTokens")
        .token("foo", ty.token().set("stuff", "Hello").build().unwrap())
        .token("bar", ty.token().set("stuff", "World").build().unwrap())
        .token("baz", ty.token().set("stuff", "").build().unwrap())
        .build()
        .unwrap()
}
