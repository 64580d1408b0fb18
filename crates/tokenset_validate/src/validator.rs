//! Name-to-token resolution over a set of containers.

use std::collections::HashMap;
use std::sync::Arc;

use tokenset_core::{Container, Token, TokenType};
use tokenset_foundation::{Error, ErrorKind, NameMap, Result};

/// Input to [`TokenValidator::validate`].
#[derive(Clone, Copy, Debug)]
pub enum Candidate<'a> {
    /// A token name to resolve.
    Name(&'a str),
    /// A token that should already belong to the validator's set.
    Token(&'a Arc<Token>),
}

impl<'a> From<&'a str> for Candidate<'a> {
    fn from(name: &'a str) -> Self {
        Candidate::Name(name)
    }
}

impl<'a> From<&'a Arc<Token>> for Candidate<'a> {
    fn from(token: &'a Arc<Token>) -> Self {
        Candidate::Token(token)
    }
}

/// Resolves names to the tokens of one type across several containers.
#[derive(Debug)]
pub struct TokenValidator {
    token_type: Arc<TokenType>,
    tokens: NameMap<Arc<Token>>,
}

impl TokenValidator {
    /// Indexes every token of `token_type` in `containers`.
    ///
    /// # Errors
    ///
    /// Returns `NonUniqueName` if two containers bind different tokens under
    /// the same name. A token inherited by several containers is shared and
    /// not ambiguous.
    pub fn new(token_type: &Arc<TokenType>, containers: &[Arc<Container>]) -> Result<Self> {
        let mut tokens: NameMap<Arc<Token>> = NameMap::new();
        let mut owners: HashMap<Arc<str>, Vec<String>> = HashMap::new();

        for container in containers {
            for token in container.iter().filter(|t| t.token_type().is_subtype_of(token_type)) {
                let Some(name) = token.name() else {
                    continue;
                };
                let seen = owners.entry(Arc::from(name)).or_default();
                seen.push(container.path().to_string());

                match tokens.get(name) {
                    Some(existing) if Arc::ptr_eq(existing, token) || existing == token => {}
                    Some(_) => {
                        return Err(Error::new(ErrorKind::NonUniqueName {
                            name: name.to_string(),
                            containers: seen.clone(),
                        }));
                    }
                    None => {
                        tokens.insert(name, Arc::clone(token));
                    }
                }
            }
        }

        tracing::debug!(
            token_type = %token_type,
            containers = containers.len(),
            tokens = tokens.len(),
            "validator ready"
        );

        Ok(Self {
            token_type: Arc::clone(token_type),
            tokens,
        })
    }

    /// Builds a validator over a single container, using its token type.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainer` if the container has no tokens.
    pub fn for_container(container: &Arc<Container>) -> Result<Self> {
        let token_type = container.token_type()?;
        Self::new(&token_type, std::slice::from_ref(container))
    }

    /// Returns the type this validator accepts.
    #[must_use]
    pub fn token_type(&self) -> &Arc<TokenType> {
        &self.token_type
    }

    /// Returns the accepted names in index order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tokens.keys().map(AsRef::as_ref)
    }

    /// Resolves a candidate to a known token.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for unknown names and for tokens of another
    /// type or outside the indexed containers.
    pub fn validate<'a>(&self, candidate: impl Into<Candidate<'a>>) -> Result<Arc<Token>> {
        match candidate.into() {
            Candidate::Name(name) => self
                .tokens
                .get(name)
                .cloned()
                .ok_or_else(|| Error::invalid_input(name)),
            Candidate::Token(token) => {
                let known = token.token_type().is_subtype_of(&self.token_type)
                    && token
                        .name()
                        .and_then(|name| self.tokens.get(name))
                        .is_some_and(|t| Arc::ptr_eq(t, token) || t == token);
                if known {
                    Ok(Arc::clone(token))
                } else {
                    Err(Error::invalid_input(format!("{token:?}")))
                }
            }
        }
    }
}
