//! External-validation adapter for tokenset.
//!
//! This crate provides:
//! - [`TokenValidator`] - Resolves names to tokens across one or more containers
//! - [`TokenAdapter`] - The pluggable validate-plus-schema interface
//! - [`TokenSeed`] - Deserializes a token name straight into its token
//!
//! Ambiguity is a setup error: two containers that bind different tokens
//! under the same name cannot share a validator.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod adapter;
pub mod seed;
pub mod validator;

pub use adapter::TokenAdapter;
pub use seed::TokenSeed;
pub use validator::{Candidate, TokenValidator};
