//! Token serialization and deserialization using `MessagePack`.
//!
//! A token travels as its [`TokenSnapshot`]: type path, fields, owning tag,
//! and sequence index. Decoding needs the live [`TokenType`] the snapshot
//! names, so that decoded tokens compare equal to the originals.

use std::sync::Arc;

use tokenset_core::{Token, TokenSnapshot, TokenType};
use tokenset_foundation::{Error, ErrorKind, Result};

/// Serializes a token to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(token: &Token) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(&token.snapshot())
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Decodes the snapshot inside `MessagePack` bytes without restoring it.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn snapshot_from_bytes(bytes: &[u8]) -> Result<TokenSnapshot> {
    rmp_serde::from_slice(bytes)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Deserializes a token of `token_type` from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails or the bytes hold a token of
/// another type.
pub fn from_bytes(bytes: &[u8], token_type: &Arc<TokenType>) -> Result<Token> {
    Token::from_snapshot(snapshot_from_bytes(bytes)?, token_type)
}
