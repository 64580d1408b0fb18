//! Per-field declarations shared by every token of a type.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tokenset_foundation::Value;

use crate::token::Slot;

/// Unconditional derivation: computes a field from its already-resolved siblings.
pub type DeriveFn = Arc<dyn Fn(&Fields<'_>) -> Value + Send + Sync>;

/// Derivation that only runs when the field was requested; `None` declines.
pub type OptionalDeriveFn = Arc<dyn Fn(&Fields<'_>) -> Option<Value> + Send + Sync>;

/// Declaration of one attribute slot.
///
/// `default` distinguishes "no default" (`None`) from "the default is
/// explicitly nil" (`Some(Value::Nil)`); both resolve to nil when the
/// field is not supplied.
#[derive(Clone, Default)]
pub struct AttributeSpec {
    /// Human-readable description, used by documentation exports.
    pub description: Option<Arc<str>>,
    /// Value used when the field is not supplied.
    pub default: Option<Value>,
    /// Fills the field when it is still nil after construction.
    pub derive: Option<DeriveFn>,
    /// Fills the field when the caller requested it.
    pub derive_if_requested: Option<OptionalDeriveFn>,
}

impl AttributeSpec {
    /// Creates a spec with no description, no default, and no derivation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the description.
    #[must_use]
    pub fn describe(mut self, description: impl Into<Arc<str>>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Derives the field from its siblings whenever it resolves to nil.
    #[must_use]
    pub fn derived<F>(mut self, derive: F) -> Self
    where
        F: Fn(&Fields<'_>) -> Value + Send + Sync + 'static,
    {
        self.derive = Some(Arc::new(derive));
        self
    }

    /// Derives the field only when the caller requested it.
    #[must_use]
    pub fn derived_if_requested<F>(mut self, derive: F) -> Self
    where
        F: Fn(&Fields<'_>) -> Option<Value> + Send + Sync + 'static,
    {
        self.derive_if_requested = Some(Arc::new(derive));
        self
    }

    /// Returns the value a field takes when it is not supplied.
    #[must_use]
    pub fn default_value(&self) -> Value {
        self.default.clone().unwrap_or_default()
    }
}

fn same_fn<T: ?Sized>(a: Option<&Arc<T>>, b: Option<&Arc<T>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}

fn fn_addr<T: ?Sized>(f: Option<&Arc<T>>) -> usize {
    f.map_or(0, |f| Arc::as_ptr(f).cast::<()>() as usize)
}

impl PartialEq for AttributeSpec {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
            && self.default == other.default
            && same_fn(self.derive.as_ref(), other.derive.as_ref())
            && same_fn(
                self.derive_if_requested.as_ref(),
                other.derive_if_requested.as_ref(),
            )
    }
}

impl Eq for AttributeSpec {}

impl Hash for AttributeSpec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.description.hash(state);
        self.default.hash(state);
        fn_addr(self.derive.as_ref()).hash(state);
        fn_addr(self.derive_if_requested.as_ref()).hash(state);
    }
}

impl fmt::Debug for AttributeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeSpec")
            .field("description", &self.description)
            .field("default", &self.default)
            .field("derive", &self.derive.is_some())
            .field("derive_if_requested", &self.derive_if_requested.is_some())
            .finish()
    }
}

/// Read-only view of a token's fields, handed to derivation functions.
#[derive(Clone, Copy)]
pub struct Fields<'a> {
    slots: &'a [(Arc<str>, Slot)],
}

impl<'a> Fields<'a> {
    pub(crate) fn new(slots: &'a [(Arc<str>, Slot)]) -> Self {
        Self { slots }
    }

    /// Returns the slot for a field.
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<&'a Slot> {
        self.slots
            .iter()
            .find(|(n, _)| n.as_ref() == name)
            .map(|(_, slot)| slot)
    }

    /// Returns a field's value; `None` if the field is absent or requested.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.slot(name).and_then(Slot::value)
    }

    /// Returns a field's string value.
    #[must_use]
    pub fn str(&self, name: &str) -> Option<&'a str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Returns true if the field carries the deferred marker.
    #[must_use]
    pub fn is_requested(&self, name: &str) -> bool {
        matches!(self.slot(name), Some(Slot::Requested))
    }

    /// Returns the field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.slots.iter().map(|(n, _)| n.as_ref())
    }
}

impl fmt::Debug for Fields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().map(|(n, s)| (n, s)))
            .finish()
    }
}
