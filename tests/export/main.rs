//! Integration tests for Layer 2: Export
//!
//! Renders one container in every format, with configured and explicit
//! columns and sort keys.

mod formats;
mod tables;

use std::sync::Arc;

use tokenset_core::{AttributeSpec, Container, ContainerConfig, SortKey, Token, TokenType, Value};

/// `foo`, `bar`, `baz` with `stuff` of Hello, World, and empty.
pub fn my_tokens() -> Arc<Container> {
    let ty = TokenType::define("tests::MyToken")
        .attribute("stuff", AttributeSpec::new())
        .build();
    Container::define("tests::MyTokens")
        .token("foo", ty.token().set("stuff", "Hello").build().unwrap())
        .token("bar", ty.token().set("stuff", "World").build().unwrap())
        .token("baz", ty.token().set("stuff", "").build().unwrap())
        .build()
        .unwrap()
}

/// Documents `name` and `stuff`, sorted by `stuff` reversed.
pub fn documented_tokens() -> Arc<Container> {
    let reversed = SortKey::by(|t: &Token| t.str("stuff").unwrap_or("").chars().rev().collect::<String>());
    Container::define("tests::DocumentedTokens")
        .extends(&my_tokens())
        .config(
            ContainerConfig::new()
                .with_documentation_columns(["name", "stuff"])
                .with_sort_key(reversed),
        )
        .build()
        .unwrap()
}

/// Documents `name` and `stuff` in declaration order; `baz` is replaced by a
/// quick token whose `stuff` is nil.
pub fn overridden_tokens() -> Arc<Container> {
    Container::define("tests::OverriddenTokens")
        .extends(&my_tokens())
        .config(ContainerConfig::new().with_documentation_columns(["name", "stuff"]))
        .token("baz", Token::quick().set("stuff", Value::Nil).overriding().build().unwrap())
        .build()
        .unwrap()
}
