//! Token declaration, derivation, and container binding for tokenset.
//!
//! This crate provides:
//! - [`AttributeSpec`] - Per-field declaration (default, derivation rules)
//! - [`TokenType`] - Ordered set of attribute specs shared by a kind of token
//! - [`Token`] - Immutable, named, attribute-bearing constant
//! - [`Container`] - Binds declared tokens, assigns identity, answers lookups
//!
//! Tokens are built unbound, then handed to a [`ContainerBuilder`], which
//! names them, prefixes them, gives them a process-wide sequence index and
//! the container's tag, and freezes them behind an `Arc`.
//!
//! ```
//! use tokenset_core::{AttributeSpec, Container, TokenType};
//!
//! let color = TokenType::define("demo::Color")
//!     .attribute("hex", AttributeSpec::new())
//!     .build();
//!
//! let colors = Container::define("demo::Colors")
//!     .token("red", color.token().set("hex", "#f00").build()?)
//!     .token("green", color.token().set("hex", "#0f0").build()?)
//!     .build()?;
//!
//! assert_eq!(colors.len(), 2);
//! assert_eq!(colors.lookup("red")?.str("hex"), Some("#f00"));
//! assert!(colors["red"] < colors["green"]);
//! # Ok::<(), tokenset_foundation::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod attribute;
pub mod config;
pub mod container;
mod derive;
pub mod sequence;
pub mod snapshot;
pub mod token;
pub mod token_type;

pub use attribute::{AttributeSpec, DeriveFn, Fields, OptionalDeriveFn};
pub use config::{ContainerConfig, SortKey};
pub use container::{Container, ContainerBuilder};
pub use snapshot::TokenSnapshot;
pub use token::{FieldRequest, QuickTokenBuilder, Slot, Token, TokenBuilder};
pub use token_type::{BASE_TYPE_PATH, NAME, PREFIX, TokenType, TokenTypeBuilder};

pub use tokenset_foundation::{Error, ErrorKind, Result, Value};
