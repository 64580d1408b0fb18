//! Serde integration: parse a token name directly into its token.

use std::fmt;
use std::sync::Arc;

use serde::de::{self, DeserializeSeed, Deserializer, Visitor};
use tokenset_core::Token;

use crate::validator::{Candidate, TokenValidator};

/// Deserializes a string into the token it names.
///
/// ```
/// # use tokenset_core::{Container, TokenType};
/// # use tokenset_validate::{TokenSeed, TokenValidator};
/// # use serde::de::DeserializeSeed;
/// let ty = TokenType::define("demo::Level").build();
/// let levels = Container::define("demo::Levels")
///     .token("low", ty.token().build()?)
///     .token("high", ty.token().build()?)
///     .build()?;
/// let validator = TokenValidator::for_container(&levels)?;
///
/// let mut de = serde_json::Deserializer::from_str("\"high\"");
/// let high = TokenSeed::new(&validator).deserialize(&mut de).unwrap();
/// assert_eq!(high.name(), Some("high"));
/// # Ok::<(), tokenset_foundation::Error>(())
/// ```
#[derive(Clone, Copy)]
pub struct TokenSeed<'v> {
    validator: &'v TokenValidator,
}

impl<'v> TokenSeed<'v> {
    /// Creates a seed resolving names through `validator`.
    #[must_use]
    pub fn new(validator: &'v TokenValidator) -> Self {
        Self { validator }
    }
}

impl<'de> DeserializeSeed<'de> for TokenSeed<'_> {
    type Value = Arc<Token>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(self)
    }
}

impl<'de> Visitor<'de> for TokenSeed<'_> {
    type Value = Arc<Token>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a {} name", self.validator.token_type().short_name())
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.validator
            .validate(Candidate::Name(v))
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}
