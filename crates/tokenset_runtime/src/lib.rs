//! Manifest loading, serialization, and the documentation CLI for tokenset.
//!
//! This crate provides:
//! - [`Manifest`] - TOML declarations of token types and containers
//! - [`Registry`] - The bound result of a manifest
//! - Token serialization to and from `MessagePack`
//! - [`Cli`] and [`generate_documentation`] for the `tokenset-doc` tool

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod logging;
pub mod manifest;
pub mod serialize;

pub use cli::{Cli, DocArgs, generate_documentation, generate_documentation_from_args, run};
pub use logging::init_logging;
pub use manifest::{Manifest, Registry};
pub use serialize::{from_bytes, to_bytes};
