//! Error types for tokenset.
//!
//! Uses `thiserror` for ergonomic error definition with rich context. Every
//! kind is a programmer or configuration error: nothing here is transient,
//! and callers are expected to surface it rather than retry.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout tokenset.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for tokenset operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Pushes a frame onto the error's context, creating it if needed.
    #[must_use]
    pub fn in_frame(mut self, frame: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(frame));
        self
    }

    /// Creates an unhashable value error.
    #[must_use]
    pub fn unhashable(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnhashableValue {
            attribute: attribute.into(),
            value: value.into(),
        })
    }

    /// Creates an unexpected fields error; the field names are sorted.
    #[must_use]
    pub fn unexpected_fields(mut fields: Vec<String>) -> Self {
        fields.sort();
        Self::new(ErrorKind::UnexpectedFields(fields))
    }

    /// Creates an illegal override error.
    #[must_use]
    pub fn illegal_override(container: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ErrorKind::IllegalOverride {
            container: container.into(),
            name: name.into(),
        })
    }

    /// Creates a missing prefix attribute error.
    #[must_use]
    pub fn missing_prefix(container: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingPrefixAttribute {
            container: container.into(),
            token_type: token_type.into(),
        })
    }

    /// Creates a name mismatch error.
    #[must_use]
    pub fn name_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(ErrorKind::NameMismatch {
            expected: expected.into(),
            actual: actual.into(),
        })
    }

    /// Creates a token not found error.
    #[must_use]
    pub fn token_not_found(container: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenNotFound {
            container: container.into(),
            name: name.into(),
        })
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput(message.into()))
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A field value cannot be hashed (lists, maps).
    #[error("attribute {attribute} has unhashable value: {value}")]
    UnhashableValue {
        /// The offending field.
        attribute: String,
        /// Rendering of the offending value.
        value: String,
    },

    /// Field names that the token type does not declare.
    #[error("unexpected constructor arguments: {}", .0.join(", "))]
    UnexpectedFields(Vec<String>),

    /// A field was both given a value and requested for derivation.
    #[error("{0} used as a requested field and an explicit value at the same time")]
    ConflictingField(String),

    /// A container redeclared an inherited token without opting in.
    #[error(
        "illegal token override of {name} in {container}; mark the token as overriding to override"
    )]
    IllegalOverride {
        /// The container being defined.
        container: String,
        /// The redeclared token name.
        name: String,
    },

    /// A prefixed container holds tokens whose type has no `prefix` attribute.
    #[error(
        "container {container} requires a prefix, you must define a token attribute called \"prefix\" on {token_type}"
    )]
    MissingPrefixAttribute {
        /// The container being defined.
        container: String,
        /// The token type lacking the attribute.
        token_type: String,
    },

    /// A pre-named token was declared under a different name.
    #[error("token named {actual} declared as {expected}")]
    NameMismatch {
        /// Declaration-site name.
        expected: String,
        /// Name carried by the token.
        actual: String,
    },

    /// Lookup of an unknown token name.
    #[error("token not found: {name} in {container}")]
    TokenNotFound {
        /// The container searched.
        container: String,
        /// The missing name.
        name: String,
    },

    /// The container has no tokens to derive a token type from.
    #[error("{0} has no tokens defined so token_type cannot be used")]
    EmptyContainer(String),

    /// The same name resolves to different tokens in several containers.
    #[error("token name {name} is not unique across {}", .containers.join(", "))]
    NonUniqueName {
        /// The ambiguous name.
        name: String,
        /// The containers that define it.
        containers: Vec<String>,
    },

    /// Input that cannot be resolved to a known token.
    #[error("invalid token: {0}")]
    InvalidInput(String),

    /// Ordering between tokens that have no common order.
    #[error("comparison not supported between {left} and {right}")]
    UnsupportedComparison {
        /// Description of the left operand.
        left: String,
        /// Description of the right operand.
        right: String,
    },

    /// A snapshot or value has a different token type than expected.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type path.
        expected: String,
        /// The actual type path.
        actual: String,
    },

    /// Encoding or decoding failure.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// File system failure.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Malformed declaration manifest.
    #[error("manifest error: {0}")]
    ManifestError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file or container path.
    pub source: Option<String>,
    /// Chain of declarations being processed, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
