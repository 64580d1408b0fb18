//! Tokens: immutable, named, attribute-bearing constants.
//!
//! A [`Token`] is constructed unbound through a [`TokenBuilder`] (strongly
//! typed, declared fields only) or a [`QuickTokenBuilder`] (base type,
//! ad-hoc fields). Binding into a [`crate::Container`] assigns the
//! remaining identity: name, prefix, sequence index, and owning tag.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use tokenset_foundation::{Error, ErrorKind, Result, Value};

use crate::attribute::Fields;
use crate::derive;
use crate::token_type::{NAME, PREFIX, TokenType};

/// Resolved state of one field.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// A concrete value (possibly nil).
    Value(Value),
    /// The caller asked for a derived value that has not been produced.
    Requested,
}

impl Slot {
    /// Returns the value, or `None` for the deferred marker.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Requested => None,
        }
    }

    /// Returns true if the slot holds nil.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Value(Value::Nil))
    }

    /// Returns true if the slot carries the deferred marker.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        matches!(self, Self::Requested)
    }
}

impl Default for Slot {
    fn default() -> Self {
        Self::Value(Value::Nil)
    }
}

/// Construction input for one field.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FieldRequest {
    /// Not supplied; the attribute default applies.
    #[default]
    Unset,
    /// Supplied by the caller.
    Explicit(Value),
    /// Deferred: fill in through `derive_if_requested`.
    Requested,
}

/// An immutable, named, attribute-bearing constant.
#[derive(Clone)]
pub struct Token {
    ty: Arc<TokenType>,
    fields: Vec<(Arc<str>, Slot)>,
    overriding: bool,
    index: Option<u64>,
    container: Option<Arc<str>>,
    binding: Option<u64>,
    content_hash: OnceLock<u64>,
}

impl Token {
    /// Starts a weakly-typed token of the base type.
    #[must_use]
    pub fn quick() -> QuickTokenBuilder {
        QuickTokenBuilder {
            inner: TokenBuilder::new(TokenType::base()),
        }
    }

    /// Builds a base-type token from name/value pairs.
    ///
    /// # Errors
    ///
    /// Fails if a value is unhashable or `name` is not a string.
    pub fn from_map<K, V, I>(pairs: I) -> Result<Token>
    where
        K: Into<Arc<str>>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        pairs
            .into_iter()
            .fold(Token::quick(), |builder, (k, v)| builder.set(k, v))
            .build()
    }

    /// Returns the token's type.
    #[must_use]
    pub fn token_type(&self) -> &Arc<TokenType> {
        &self.ty
    }

    /// Returns a field's slot.
    #[must_use]
    pub fn slot(&self, field: &str) -> Option<&Slot> {
        self.fields
            .iter()
            .find(|(n, _)| n.as_ref() == field)
            .map(|(_, slot)| slot)
    }

    /// Returns a field's value; `None` if absent or still requested.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.slot(field).and_then(Slot::value)
    }

    /// Returns a field's string value.
    #[must_use]
    pub fn str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Returns true if the field carries the deferred marker.
    #[must_use]
    pub fn is_requested(&self, field: &str) -> bool {
        self.slot(field).is_some_and(Slot::is_requested)
    }

    /// Returns true if the token has the field, declared or ad-hoc.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.slot(field).is_some()
    }

    /// Returns the name, if assigned.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str(NAME)
    }

    /// Returns the prefix, if the type declares one and it is set.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.str(PREFIX)
    }

    /// Returns all fields in order: declared first, then ad-hoc.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.fields.iter().map(|(n, s)| (n.as_ref(), s))
    }

    /// Returns all field names in order, including ad-hoc ones.
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(n, _)| n.as_ref()).collect()
    }

    /// Returns the names declared by the token's type.
    #[must_use]
    pub fn attribute_names(&self) -> Vec<&str> {
        self.ty.attribute_names()
    }

    /// Returns a read-only view of the fields.
    #[must_use]
    pub fn view(&self) -> Fields<'_> {
        Fields::new(&self.fields)
    }

    /// Returns the process-wide sequence index assigned at binding.
    #[must_use]
    pub fn sequence_index(&self) -> Option<u64> {
        self.index
    }

    /// Returns the path of the container that bound this token.
    #[must_use]
    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    /// Returns the id of the container binding that owns this token.
    ///
    /// Two containers built under the same path still get different ids.
    #[must_use]
    pub fn binding_id(&self) -> Option<u64> {
        self.binding
    }

    /// Returns true once a container has bound the token.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.container.is_some()
    }

    /// Returns true if the token may replace an inherited one.
    #[must_use]
    pub fn is_override(&self) -> bool {
        self.overriding
    }

    /// Returns a builder pre-filled with this token's fields.
    ///
    /// The result is unbound: building it yields a fresh token that a
    /// container will index and tag again.
    #[must_use]
    pub fn to_builder(&self) -> TokenBuilder {
        let mut builder = TokenBuilder::new(Arc::clone(&self.ty));
        for (name, slot) in &self.fields {
            let request = match slot {
                Slot::Value(v) => FieldRequest::Explicit(v.clone()),
                Slot::Requested => FieldRequest::Requested,
            };
            builder.requests.push((Arc::clone(name), request));
        }
        builder.overriding = self.overriding;
        builder
    }

    /// Hash over every field, sorted by field name.
    ///
    /// Computed once and cached; binding happens before the token is shared,
    /// so the cached value always reflects the final fields.
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        *self.content_hash.get_or_init(|| {
            let mut sorted: Vec<&(Arc<str>, Slot)> = self.fields.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(&b.0));
            let mut hasher = DefaultHasher::new();
            sorted.hash(&mut hasher);
            hasher.finish()
        })
    }

    /// Orders two tokens, failing where no order is defined.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedComparison` for tokens of different types, or
    /// for an unbound token compared with a token it does not equal.
    pub fn try_cmp(&self, other: &Token) -> Result<Ordering> {
        self.partial_cmp(other).ok_or_else(|| {
            Error::new(ErrorKind::UnsupportedComparison {
                left: format!("{self:?}"),
                right: format!("{other:?}"),
            })
        })
    }

    // Binding primitives, used by the container.

    pub(crate) fn set_field(&mut self, field: &str, value: Value) {
        if let Some((_, slot)) = self.fields.iter_mut().find(|(n, _)| n.as_ref() == field) {
            *slot = Slot::Value(value);
            self.content_hash = OnceLock::new();
        }
    }

    pub(crate) fn set_identity(&mut self, index: u64, container: Arc<str>, binding: u64) {
        self.index.get_or_insert(index);
        if self.container.is_none() {
            self.container = Some(container);
            self.binding = Some(binding);
        }
    }

    pub(crate) fn restore_identity(
        &mut self,
        index: Option<u64>,
        container: Option<Arc<str>>,
        binding: Option<u64>,
    ) {
        self.index = index;
        self.container = container;
        self.binding = binding;
    }

    pub(crate) fn rederive(&mut self) {
        if self.name().is_some() {
            derive::run(&self.ty, &mut self.fields);
            self.content_hash = OnceLock::new();
        }
    }

    pub(crate) fn check_hashable(&self) -> Result<()> {
        check_hashable(&self.fields)
    }

    pub(crate) fn from_parts(
        ty: Arc<TokenType>,
        fields: Vec<(Arc<str>, Slot)>,
        overriding: bool,
    ) -> Token {
        Token {
            ty,
            fields,
            overriding,
            index: None,
            container: None,
            binding: None,
            content_hash: OnceLock::new(),
        }
    }
}

fn check_hashable(fields: &[(Arc<str>, Slot)]) -> Result<()> {
    for (name, slot) in fields {
        match slot {
            Slot::Value(value) if !value.is_hashable() => {
                return Err(Error::unhashable(name.to_string(), format!("{value:?}")));
            }
            _ => {}
        }
    }
    Ok(())
}

// `name` and `prefix` feed Display and container identity, so they must be text.
fn check_text(fields: &[(Arc<str>, Slot)], field: &str) -> Result<()> {
    match fields.iter().find(|(n, _)| n.as_ref() == field) {
        None | Some((_, Slot::Value(Value::Nil | Value::String(_)))) => Ok(()),
        Some((_, Slot::Value(other))) => {
            Err(Error::type_mismatch("string", other.type_name()).in_frame(format!("field {field}")))
        }
        Some((_, Slot::Requested)) => {
            Err(Error::type_mismatch("string", "requested").in_frame(format!("field {field}")))
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        if self.ty != other.ty || self.name() != other.name() {
            return false;
        }
        match (self.binding, other.binding) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.path().hash(state);
        self.name().hash(state);
    }
}

/// Bound tokens of one type order by sequence index. A token that is not
/// indexed only compares with tokens it equals, as `Equal`.
impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.ty != other.ty {
            return None;
        }
        match (self.index, other.index) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ if self == other => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = self.prefix().filter(|p| !p.is_empty()) {
            write!(f, "{prefix}.")?;
        }
        match self.name().filter(|n| !n.is_empty()) {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "(unnamed)"),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: {self}>", self.ty.short_name())
    }
}

/// Strongly-typed token constructor.
///
/// Only fields declared on the type are accepted; anything else fails at
/// [`TokenBuilder::build`] with `UnexpectedFields`.
#[must_use]
pub struct TokenBuilder {
    ty: Arc<TokenType>,
    requests: Vec<(Arc<str>, FieldRequest)>,
    conflicts: Vec<String>,
    overriding: bool,
}

impl TokenBuilder {
    pub(crate) fn new(ty: Arc<TokenType>) -> Self {
        Self {
            ty,
            requests: Vec::new(),
            conflicts: Vec::new(),
            overriding: false,
        }
    }

    /// Supplies a field value.
    pub fn set(self, field: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        self.field(field, FieldRequest::Explicit(value.into()))
    }

    /// Supplies the name.
    pub fn named(self, name: impl Into<Arc<str>>) -> Self {
        self.set(NAME, Value::String(name.into()))
    }

    /// Asks for a field to be filled by its `derive_if_requested` function.
    pub fn request(self, field: impl Into<Arc<str>>) -> Self {
        self.field(field, FieldRequest::Requested)
    }

    /// Sets the construction input for a field.
    ///
    /// A later explicit value replaces an earlier one; mixing an explicit
    /// value with a request for the same field is a conflict.
    pub fn field(mut self, field: impl Into<Arc<str>>, request: FieldRequest) -> Self {
        let field = field.into();
        let existing = self.requests.iter().position(|(n, _)| *n == field);
        match (existing, request) {
            (Some(i), FieldRequest::Unset) => {
                self.requests.remove(i);
            }
            (None, FieldRequest::Unset) => {}
            (Some(i), request) => {
                let previous = &self.requests[i].1;
                let clash = matches!(
                    (previous, &request),
                    (FieldRequest::Requested, FieldRequest::Explicit(_))
                        | (FieldRequest::Explicit(_), FieldRequest::Requested)
                );
                if clash {
                    self.conflicts.push(field.to_string());
                }
                self.requests[i].1 = request;
            }
            (None, request) => self.requests.push((field, request)),
        }
        self
    }

    /// Marks the token as allowed to replace an inherited one.
    pub fn overriding(mut self) -> Self {
        self.overriding = true;
        self
    }

    /// Resolves every field and runs the derivation pass.
    ///
    /// # Errors
    ///
    /// - `ConflictingField` if a field was both set and requested.
    /// - `UnexpectedFields` for names the type does not declare.
    /// - `TypeMismatch` if `name` or `prefix` is not a string.
    /// - `UnhashableValue` if any resolved value is a list or map.
    pub fn build(self) -> Result<Token> {
        let TokenBuilder {
            ty,
            mut requests,
            conflicts,
            overriding,
        } = self;

        if let Some(field) = conflicts.into_iter().next() {
            return Err(Error::new(ErrorKind::ConflictingField(field)));
        }

        let mut fields = Vec::new();
        for (name, spec) in ty.attributes() {
            let slot = match requests.iter().position(|(n, _)| n == name) {
                Some(i) => match requests.remove(i).1 {
                    FieldRequest::Explicit(v) => Slot::Value(v),
                    FieldRequest::Requested => Slot::Requested,
                    FieldRequest::Unset => Slot::Value(spec.default_value()),
                },
                None => Slot::Value(spec.default_value()),
            };
            fields.push((Arc::clone(name), slot));
        }

        if ty.is_base() {
            for (name, request) in requests {
                let slot = match request {
                    FieldRequest::Explicit(v) => Slot::Value(v),
                    FieldRequest::Requested => Slot::Requested,
                    FieldRequest::Unset => Slot::default(),
                };
                fields.push((name, slot));
            }
        } else if !requests.is_empty() {
            return Err(Error::unexpected_fields(
                requests.into_iter().map(|(n, _)| n.to_string()).collect(),
            ));
        }

        check_text(&fields, NAME)?;
        check_text(&fields, PREFIX)?;

        let mut token = Token::from_parts(ty, fields, overriding);
        token.rederive();
        check_hashable(&token.fields)?;
        Ok(token)
    }
}

/// Weakly-typed constructor for base-type tokens.
///
/// Every field name is accepted; names other than `name` become ad-hoc
/// fields in the order they were first supplied.
#[must_use]
pub struct QuickTokenBuilder {
    inner: TokenBuilder,
}

impl QuickTokenBuilder {
    /// Supplies a field value.
    pub fn set(self, field: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        Self {
            inner: self.inner.set(field, value),
        }
    }

    /// Supplies the name.
    pub fn named(self, name: impl Into<Arc<str>>) -> Self {
        Self {
            inner: self.inner.named(name),
        }
    }

    /// Marks the token as allowed to replace an inherited one.
    pub fn overriding(self) -> Self {
        Self {
            inner: self.inner.overriding(),
        }
    }

    /// Builds the token.
    ///
    /// # Errors
    ///
    /// See [`TokenBuilder::build`]; unknown fields are never an error here.
    pub fn build(self) -> Result<Token> {
        self.inner.build()
    }
}
