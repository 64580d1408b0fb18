//! Core values, errors, and ordered persistent maps for tokenset.
//!
//! This crate provides:
//! - [`Value`] - The value type stored in token fields
//! - [`Error`] - Error types covering every declaration and lookup failure
//! - [`NameMap`] - Insertion-ordered persistent map keyed by name

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod value;

pub use collections::NameMap;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use value::Value;
