//! Property tests for the token contract
//!
//! Sequence indexes, equality, hashing, and ordering over containers
//! declared with generated names.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use proptest::prelude::*;
use tokenset_core::{Container, Token};

use crate::my_token;

fn hash_of(token: &Token) -> u64 {
    let mut hasher = DefaultHasher::new();
    token.hash(&mut hasher);
    hasher.finish()
}

fn names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z][a-z0-9_]{0,7}", 1..16)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

fn declare(path: &str, names: &[String]) -> Arc<Container> {
    let ty = my_token();
    names
        .iter()
        .fold(Container::define(path.to_string()), |b, name| {
            b.token(name.as_str(), ty.token().set("stuff", name.len() as i64).build().unwrap())
        })
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn iteration_matches_declaration(names in names()) {
        let tokens = declare("props::Declared", &names);
        let seen: Vec<&str> = tokens.names().collect();
        prop_assert_eq!(seen, names.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn sequence_indexes_strictly_increase(names in names()) {
        let tokens = declare("props::Indexed", &names);
        let indexes: Vec<u64> = tokens.iter().map(|t| t.sequence_index().unwrap()).collect();
        prop_assert!(indexes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn order_agrees_with_declaration(names in names()) {
        let tokens = declare("props::Ordered", &names);
        let all: Vec<&Arc<Token>> = tokens.iter().collect();
        for pair in all.windows(2) {
            prop_assert!(pair[0] < pair[1]);
            prop_assert_ne!(&pair[0], &pair[1]);
        }
    }

    #[test]
    fn equality_is_reflexive_and_symmetric(names in names()) {
        let left = declare("props::Left", &names);
        let right = declare("props::Right", &names);

        for name in &names {
            prop_assert_eq!(&left[name.as_str()], &left[name.as_str()]);
            prop_assert_ne!(&left[name.as_str()], &right[name.as_str()]);
            prop_assert_ne!(&right[name.as_str()], &left[name.as_str()]);
        }
    }

    #[test]
    fn hash_agrees_with_equality(names in names()) {
        let tokens = declare("props::Hashed", &names);
        let ty = my_token();

        for name in &names {
            let unbound = ty.token().named(name.as_str()).build().unwrap();
            let bound = &tokens[name.as_str()];
            prop_assert_eq!(&**bound, &unbound);
            prop_assert_eq!(hash_of(bound), hash_of(&unbound));
        }
    }

    #[test]
    fn rebinding_draws_fresh_indexes(names in names()) {
        let first = declare("props::First", &names);
        let second = declare("props::Second", &names);
        let last = first.iter().filter_map(|t| t.sequence_index()).max().unwrap();
        prop_assert!(second.iter().all(|t| t.sequence_index().unwrap() > last));
    }
}
