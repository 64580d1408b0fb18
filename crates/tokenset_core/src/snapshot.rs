//! Structural snapshots of tokens for encoding and decoding.
//!
//! A snapshot carries exactly what identifies a token outside the process
//! that bound it: its type path, its field values, its owning tag and
//! binding id, and its sequence index. Restoring does not re-run derivation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokenset_foundation::{Error, Result};

use crate::token::{Slot, Token};
use crate::token_type::TokenType;

/// Serializable state of one token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenSnapshot {
    /// Path of the token's type.
    pub token_type: String,
    /// Every field in order.
    pub fields: Vec<(String, Slot)>,
    /// Owning container tag.
    pub container: Option<String>,
    /// Process-wide sequence index.
    pub index: Option<u64>,
    /// Id of the owning container binding.
    #[serde(default)]
    pub binding: Option<u64>,
    /// Whether the token was declared as an override.
    #[serde(default)]
    pub overriding: bool,
}

impl Token {
    /// Captures the token's state.
    #[must_use]
    pub fn snapshot(&self) -> TokenSnapshot {
        TokenSnapshot {
            token_type: self.token_type().path().to_string(),
            fields: self
                .fields()
                .map(|(n, s)| (n.to_string(), s.clone()))
                .collect(),
            container: self.container().map(str::to_string),
            index: self.sequence_index(),
            binding: self.binding_id(),
            overriding: self.is_override(),
        }
    }

    /// Rebuilds a token from a snapshot.
    ///
    /// Declared fields missing from the snapshot take their defaults.
    ///
    /// # Errors
    ///
    /// - `TypeMismatch` if the snapshot names another type.
    /// - `UnexpectedFields` for fields `ty` does not declare, unless `ty` is
    ///   the base type.
    /// - `UnhashableValue` for list or map values.
    pub fn from_snapshot(snapshot: TokenSnapshot, ty: &Arc<TokenType>) -> Result<Token> {
        if snapshot.token_type != ty.path() {
            return Err(Error::type_mismatch(ty.path(), snapshot.token_type));
        }

        let mut supplied = snapshot.fields;
        let mut fields: Vec<(Arc<str>, Slot)> = Vec::with_capacity(supplied.len());
        for (name, spec) in ty.attributes() {
            let slot = match supplied.iter().position(|(n, _)| **n == **name) {
                Some(i) => supplied.remove(i).1,
                None => Slot::Value(spec.default_value()),
            };
            fields.push((Arc::clone(name), slot));
        }

        if ty.is_base() {
            fields.extend(supplied.into_iter().map(|(n, s)| (Arc::from(n), s)));
        } else if !supplied.is_empty() {
            return Err(Error::unexpected_fields(
                supplied.into_iter().map(|(n, _)| n).collect(),
            ));
        }

        let mut token = Token::from_parts(Arc::clone(ty), fields, snapshot.overriding);
        token.restore_identity(
            snapshot.index,
            snapshot.container.map(Arc::from),
            snapshot.binding,
        );
        token.check_hashable()?;
        Ok(token)
    }
}
