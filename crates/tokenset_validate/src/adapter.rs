//! The pluggable interface validation frameworks call into.

use std::sync::Arc;

use serde_json::{Value as Json, json};
use tokenset_core::Token;
use tokenset_foundation::{Error, Result};

use crate::validator::{Candidate, TokenValidator};

/// A validator plus a schema description for one token type.
pub trait TokenAdapter {
    /// Validates a JSON input, returning the token it names.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the input is not a known token name.
    fn validate_json(&self, input: &Json) -> Result<Arc<Token>>;

    /// Describes accepted inputs as a JSON schema fragment.
    fn json_schema(&self, title: &str) -> Json;
}

impl TokenAdapter for TokenValidator {
    fn validate_json(&self, input: &Json) -> Result<Arc<Token>> {
        match input {
            Json::String(name) => self.validate(Candidate::Name(name)),
            other => Err(Error::invalid_input(other.to_string())),
        }
    }

    fn json_schema(&self, title: &str) -> Json {
        let names: Vec<&str> = self.names().collect();
        json!({
            "title": title,
            "type": "string",
            "pattern": format!("^{}$", names.join("|")),
            "examples": names,
        })
    }
}
