//! tokenset - Declarative enumerations of named, attribute-bearing tokens
//!
//! This crate re-exports all layers of the tokenset system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: tokenset_runtime    - Manifest loading, MessagePack codec, documentation CLI
//! Layer 2: tokenset_export     - CSV, RST, and Confluence documentation tables
//!          tokenset_validate   - Name-to-token validation, JSON schema
//! Layer 1: tokenset_core       - Attribute specs, token types, tokens, containers
//! Layer 0: tokenset_foundation - Core types (Value, Error, NameMap)
//! ```

pub use tokenset_core as core;
pub use tokenset_export as export;
pub use tokenset_foundation as foundation;
pub use tokenset_runtime as runtime;
pub use tokenset_validate as validate;
