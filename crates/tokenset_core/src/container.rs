//! Containers: ordered, named groups of bound tokens.
//!
//! A container is defined once through a [`ContainerBuilder`]. Building it
//! merges the parents' tokens, then binds each own declaration in order:
//!
//! 1. override guard (inherited names need [`TokenBuilder::overriding`])
//! 2. name injection, or a check that a pre-named token matches
//! 3. prefix requirement and injection
//! 4. sequence index, owning tag, and binding id
//! 5. second derivation pass, now that identity fields are final
//! 6. insertion: overrides keep the parent's position, new names append
//!
//! Parents are never modified; inherited tokens are shared by `Arc`.
//!
//! [`TokenBuilder::overriding`]: crate::TokenBuilder::overriding

use std::collections::HashSet;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use tokenset_foundation::{Error, ErrorKind, NameMap, Result, Value};

use crate::config::{ContainerConfig, ResolvedConfig, SortKey};
use crate::sequence;
use crate::token::{Slot, Token};
use crate::token_type::{NAME, PREFIX, TokenType};

/// A bound, immutable group of tokens.
pub struct Container {
    path: Arc<str>,
    binding: u64,
    config: ResolvedConfig,
    tokens: NameMap<Arc<Token>>,
    declared: Vec<Arc<str>>,
    parents: Vec<Arc<Container>>,
}

impl Container {
    /// Starts defining a container identified by `path`.
    #[must_use]
    pub fn define(path: impl Into<Arc<str>>) -> ContainerBuilder {
        ContainerBuilder {
            path: path.into(),
            parents: Vec::new(),
            config: ContainerConfig::default(),
            declarations: Vec::new(),
        }
    }

    /// Returns the container's path, which is also the owning tag of the
    /// tokens it bound.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the id of this binding; unique even between containers that
    /// share a path.
    #[must_use]
    pub fn binding_id(&self) -> u64 {
        self.binding
    }

    /// Returns the last `::` segment of the path.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.path.rsplit("::").next().unwrap_or(&self.path)
    }

    /// Returns the resolved prefix; empty when none is required.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.config.prefix
    }

    /// Returns the resolved documentation columns.
    #[must_use]
    pub fn documentation_columns(&self) -> Vec<&str> {
        self.config.columns.iter().map(AsRef::as_ref).collect()
    }

    /// Returns the configured documentation sort key.
    #[must_use]
    pub fn documentation_sort_key(&self) -> Option<&SortKey> {
        self.config.sort_key.as_ref()
    }

    /// Returns the containers this one extends.
    #[must_use]
    pub fn parents(&self) -> &[Arc<Container>] {
        &self.parents
    }

    /// Returns the names this container declared itself, in order.
    pub fn declared(&self) -> impl Iterator<Item = &str> {
        self.declared.iter().map(AsRef::as_ref)
    }

    /// Looks up a token by name.
    ///
    /// # Errors
    ///
    /// Returns `TokenNotFound` if no token has that name.
    pub fn lookup(&self, name: &str) -> Result<&Arc<Token>> {
        self.tokens
            .get(name)
            .ok_or_else(|| Error::token_not_found(self.path.to_string(), name))
    }

    /// Looks up a token by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<Token>> {
        self.tokens.get(name)
    }

    /// Returns the tokens in final declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Token>> {
        self.tokens.values()
    }

    /// Returns the token names in final declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tokens.keys().map(AsRef::as_ref)
    }

    /// Returns true if an equal token is in the container.
    #[must_use]
    pub fn contains(&self, token: &Token) -> bool {
        self.tokens.values().any(|t| **t == *token)
    }

    /// Returns the number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the container holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the tokens in the order documentation should list them.
    ///
    /// Uses `sort_key` if given, else the configured key, else declaration
    /// order. The sort is stable.
    #[must_use]
    pub fn documentation_order(&self, sort_key: Option<&SortKey>) -> Vec<&Arc<Token>> {
        let mut tokens: Vec<&Arc<Token>> = self.iter().collect();
        if let Some(key) = sort_key.or(self.config.sort_key.as_ref()) {
            tokens.sort_by(|a, b| key.compare(a, b));
        }
        tokens
    }

    /// Returns the type shared by the container's tokens.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainer` if there are no tokens to take it from.
    pub fn token_type(&self) -> Result<Arc<TokenType>> {
        self.iter()
            .next()
            .map(|t| Arc::clone(t.token_type()))
            .ok_or_else(|| Error::new(ErrorKind::EmptyContainer(self.short_name().to_string())))
    }
}

impl Index<&str> for Container {
    type Output = Arc<Token>;

    fn index(&self, name: &str) -> &Arc<Token> {
        match self.tokens.get(name) {
            Some(token) => token,
            None => panic!("token not found: {name} in {}", self.path),
        }
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = &'a Arc<Token>;
    type IntoIter = Box<dyn Iterator<Item = &'a Arc<Token>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("path", &self.path)
            .field("prefix", &self.config.prefix)
            .field("tokens", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`Container`].
#[must_use]
pub struct ContainerBuilder {
    path: Arc<str>,
    parents: Vec<Arc<Container>>,
    config: ContainerConfig,
    declarations: Vec<(Arc<str>, Token)>,
}

impl ContainerBuilder {
    /// Inherits the tokens and configuration of `parent`.
    ///
    /// With several parents, tokens merge left to right and the first parent
    /// providing a name wins; configuration comes from the first parent.
    pub fn extends(mut self, parent: &Arc<Container>) -> Self {
        self.parents.push(Arc::clone(parent));
        self
    }

    /// Sets the configuration; unset options inherit.
    pub fn config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// Declares a token under `field_name`.
    pub fn token(mut self, field_name: impl Into<Arc<str>>, token: Token) -> Self {
        self.declarations.push((field_name.into(), token));
        self
    }

    /// Binds every declaration and finalizes the container.
    ///
    /// # Errors
    ///
    /// - `IllegalOverride` when an inherited or repeated name is redeclared
    ///   without the override flag.
    /// - `NameMismatch` when a pre-named token disagrees with its field name.
    /// - `MissingPrefixAttribute` when a prefix is required but a token's
    ///   type cannot hold one.
    /// - `UnhashableValue` when a derivation produced a list or map.
    pub fn build(self) -> Result<Arc<Container>> {
        let ContainerBuilder {
            path,
            parents,
            config,
            declarations,
        } = self;

        let binding = sequence::next_binding();
        let config = config.resolve(parents.first().map(|p| &p.config));
        let mut tokens = merge_parents(&parents);

        if !config.prefix.is_empty() {
            for token in tokens.values() {
                if !token.has_field(PREFIX) {
                    return Err(Error::missing_prefix(
                        path.to_string(),
                        token.token_type().path(),
                    ));
                }
            }
        }

        let mut seen = HashSet::new();
        let mut declared = Vec::with_capacity(declarations.len());
        for (field_name, token) in declarations {
            let inherited = tokens.contains_key(&field_name);
            if !seen.insert(Arc::clone(&field_name)) || (inherited && !token.is_override()) {
                return Err(Error::illegal_override(path.to_string(), field_name.to_string()));
            }

            let token = bind(token, &field_name, &config.prefix, &path, binding)
                .map_err(|e| e.in_frame(format!("token {field_name} in {path}")))?;
            tracing::trace!(
                container = %path,
                token = %field_name,
                index = token.sequence_index(),
                inherited,
                "bound token"
            );

            tokens.insert(Arc::clone(&field_name), Arc::new(token));
            declared.push(field_name);
        }

        tracing::debug!(
            container = %path,
            binding,
            parents = parents.len(),
            tokens = tokens.len(),
            "container defined"
        );

        Ok(Arc::new(Container {
            path,
            binding,
            config,
            tokens,
            declared,
            parents,
        }))
    }
}

fn merge_parents(parents: &[Arc<Container>]) -> NameMap<Arc<Token>> {
    let Some((first, rest)) = parents.split_first() else {
        return NameMap::new();
    };
    let mut tokens = first.tokens.clone();
    for parent in rest {
        for (name, token) in parent.tokens.iter() {
            if !tokens.contains_key(name) {
                tokens.insert(Arc::clone(name), Arc::clone(token));
            }
        }
    }
    tokens
}

fn bind(
    mut token: Token,
    field_name: &Arc<str>,
    prefix: &Arc<str>,
    path: &Arc<str>,
    binding: u64,
) -> Result<Token> {
    match token.name().map(str::to_owned) {
        None => token.set_field(NAME, Value::String(Arc::clone(field_name))),
        Some(name) if *name == **field_name => {}
        Some(name) => return Err(Error::name_mismatch(field_name.to_string(), name)),
    }

    if !prefix.is_empty() {
        match token.slot(PREFIX).map(Slot::is_nil) {
            None => {
                return Err(Error::missing_prefix(
                    path.to_string(),
                    token.token_type().path(),
                ));
            }
            Some(true) => token.set_field(PREFIX, Value::String(Arc::clone(prefix))),
            Some(false) => {}
        }
    }

    let index = token.sequence_index().unwrap_or_else(sequence::next);
    token.set_identity(index, Arc::clone(path), binding);
    token.rederive();
    token.check_hashable()?;
    Ok(token)
}
