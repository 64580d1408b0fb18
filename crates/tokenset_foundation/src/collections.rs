//! Insertion-ordered persistent map keyed by name.
//!
//! A thin layer over the `im` crate's persistent structures: an
//! `im::Vector` keeps entries in insertion order and an `im::HashMap`
//! indexes them by name. Cloning is O(1), so a derived map shares structure
//! with the map it was built from and never disturbs it.

use std::fmt;
use std::iter::FromIterator;
use std::sync::Arc;

/// Persistent map from name to value that remembers insertion order.
///
/// Inserting an existing name replaces the value in place, keeping its
/// original position; inserting a new name appends it.
#[derive(Clone)]
pub struct NameMap<V>
where
    V: Clone,
{
    entries: im::Vector<(Arc<str>, V)>,
    index: im::HashMap<Arc<str>, usize>,
}

impl<V: Clone> NameMap<V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: im::Vector::new(),
            index: im::HashMap::new(),
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gets a value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&V> {
        let &position = self.index.get(name)?;
        self.entries.get(position).map(|(_, v)| v)
    }

    /// Returns the position of a name in insertion order.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns true if the map contains the name.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Inserts a value, replacing in place or appending.
    ///
    /// Returns the previous value if the name was present.
    pub fn insert(&mut self, name: impl Into<Arc<str>>, value: V) -> Option<V> {
        let name = name.into();
        if let Some(&position) = self.index.get(&name) {
            let (_, old) = self.entries.set(position, (name, value));
            return Some(old);
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push_back((name, value));
        None
    }

    /// Returns a new map with the value inserted.
    #[must_use]
    pub fn with(&self, name: impl Into<Arc<str>>, value: V) -> Self {
        let mut new = self.clone();
        new.insert(name, value);
        new
    }

    /// Returns an iterator over name-value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Returns an iterator over names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Arc<str>> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Returns an iterator over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<V: Clone> Default for NameMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + fmt::Debug> fmt::Debug for NameMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: Clone + PartialEq> PartialEq for NameMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Into<Arc<str>>, V: Clone> FromIterator<(K, V)> for NameMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
