//! Token types: the ordered attribute declarations shared by a kind of token.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};

use crate::attribute::AttributeSpec;
use crate::token::TokenBuilder;

/// Path of the process-wide base type.
pub const BASE_TYPE_PATH: &str = "Token";

/// The distinguished field every token type declares first.
pub const NAME: &str = "name";

/// The field a prefixed container injects its prefix into.
pub const PREFIX: &str = "prefix";

static BASE: LazyLock<Arc<TokenType>> = LazyLock::new(|| {
    Arc::new(TokenType {
        path: BASE_TYPE_PATH.into(),
        attributes: vec![(NAME.into(), AttributeSpec::new())],
        parents: Vec::new(),
        ad_hoc: true,
    })
});

/// Descriptor of a concrete kind of token.
///
/// A token type is identified by its path (for example `app::Color`); two
/// descriptors with the same path are the same type. Attributes are kept in
/// declaration order with inherited ones first, and `name` is always the
/// first attribute.
pub struct TokenType {
    path: Arc<str>,
    attributes: Vec<(Arc<str>, AttributeSpec)>,
    parents: Vec<Arc<TokenType>>,
    ad_hoc: bool,
}

impl TokenType {
    /// Returns the base type.
    ///
    /// Tokens of the base type accept ad-hoc fields; see [`crate::Token::quick`].
    #[must_use]
    pub fn base() -> Arc<TokenType> {
        Arc::clone(&BASE)
    }

    /// Starts declaring a new token type that extends the base type.
    #[must_use]
    pub fn define(path: impl Into<Arc<str>>) -> TokenTypeBuilder {
        TokenTypeBuilder {
            path: path.into(),
            attributes: BASE.attributes.clone(),
            parents: Vec::new(),
        }
    }

    /// Starts building a token of this type.
    #[must_use]
    pub fn token(self: &Arc<Self>) -> TokenBuilder {
        TokenBuilder::new(Arc::clone(self))
    }

    /// Returns the full path identifying this type.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the last `::` segment of the path.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.path.rsplit("::").next().unwrap_or(&self.path)
    }

    /// Returns the declared attribute names in order.
    #[must_use]
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|(n, _)| n.as_ref()).collect()
    }

    /// Returns the declared attributes in order.
    pub fn attributes(&self) -> impl Iterator<Item = (&Arc<str>, &AttributeSpec)> {
        self.attributes.iter().map(|(n, spec)| (n, spec))
    }

    /// Returns the declaration of an attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes
            .iter()
            .find(|(n, _)| n.as_ref() == name)
            .map(|(_, spec)| spec)
    }

    /// Returns true if the type declares the attribute.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Returns true for the base type, whose tokens accept ad-hoc fields.
    #[must_use]
    pub fn is_base(&self) -> bool {
        self.ad_hoc
    }

    /// Returns the types this one was declared to extend.
    #[must_use]
    pub fn parents(&self) -> &[Arc<TokenType>] {
        &self.parents
    }

    /// Returns true if this type is `other` or inherits from it.
    #[must_use]
    pub fn is_subtype_of(&self, other: &TokenType) -> bool {
        other.is_base() || self == other || self.parents.iter().any(|p| p.is_subtype_of(other))
    }
}

impl PartialEq for TokenType {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for TokenType {}

impl Hash for TokenType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl fmt::Debug for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<type {}>", self.path)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

/// Builder for [`TokenType`].
///
/// Parents' attributes are merged in the order the parents are given; the
/// first declaration of a name fixes its position. Declaring an attribute
/// that already exists replaces its spec in place.
#[must_use]
pub struct TokenTypeBuilder {
    path: Arc<str>,
    attributes: Vec<(Arc<str>, AttributeSpec)>,
    parents: Vec<Arc<TokenType>>,
}

impl TokenTypeBuilder {
    /// Inherits every attribute of `parent`.
    pub fn extends(mut self, parent: &Arc<TokenType>) -> Self {
        for (name, spec) in &parent.attributes {
            if !self.attributes.iter().any(|(n, _)| n == name) {
                self.attributes.push((Arc::clone(name), spec.clone()));
            }
        }
        self.parents.push(Arc::clone(parent));
        self
    }

    /// Declares an attribute.
    pub fn attribute(mut self, name: impl Into<Arc<str>>, spec: AttributeSpec) -> Self {
        let name = name.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = spec,
            None => self.attributes.push((name, spec)),
        }
        self
    }

    /// Finishes the declaration.
    #[must_use]
    pub fn build(self) -> Arc<TokenType> {
        Arc::new(TokenType {
            path: self.path,
            attributes: self.attributes,
            parents: self.parents,
            ad_hoc: false,
        })
    }
}
