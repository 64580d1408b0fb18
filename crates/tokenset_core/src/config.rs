//! Container configuration: prefix and documentation settings.
//!
//! Every option is inheritable: a container leaves an option unset to take
//! the value its first parent resolved.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::token::Token;

type Comparator = Arc<dyn Fn(&Token, &Token) -> Ordering + Send + Sync>;

/// Ordering used by documentation exports.
#[derive(Clone)]
pub struct SortKey(Comparator);

impl SortKey {
    /// Sorts by a key extracted from each token.
    pub fn by<K, F>(key: F) -> Self
    where
        K: Ord,
        F: Fn(&Token) -> K + Send + Sync + 'static,
    {
        Self(Arc::new(move |a: &Token, b: &Token| key(a).cmp(&key(b))))
    }

    /// Sorts by a field's value; missing fields sort first.
    pub fn by_field(field: impl Into<Arc<str>>) -> Self {
        let field = field.into();
        Self(Arc::new(move |a: &Token, b: &Token| match (a.get(&field), b.get(&field)) {
            (Some(x), Some(y)) => x.total_cmp(y),
            (x, y) => x.is_some().cmp(&y.is_some()),
        }))
    }

    /// Compares two tokens.
    #[must_use]
    pub fn compare(&self, a: &Token, b: &Token) -> Ordering {
        (self.0)(a, b)
    }
}

impl fmt::Debug for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SortKey(..)")
    }
}

/// Declared configuration of a container.
#[derive(Clone, Debug, Default)]
pub struct ContainerConfig {
    /// Prefix injected into every token; empty means none.
    pub prefix: Option<String>,
    /// Fields exported by documentation tools.
    pub documentation_columns: Option<Vec<String>>,
    /// Default order for documentation exports.
    pub documentation_sort_key: Option<SortKey>,
}

impl ContainerConfig {
    /// Creates a config that inherits everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Sets the documentation columns.
    #[must_use]
    pub fn with_documentation_columns<S: Into<String>>(
        mut self,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        self.documentation_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the documentation sort key.
    #[must_use]
    pub fn with_sort_key(mut self, key: SortKey) -> Self {
        self.documentation_sort_key = Some(key);
        self
    }

    pub(crate) fn resolve(self, parent: Option<&ResolvedConfig>) -> ResolvedConfig {
        let fallback = parent.cloned().unwrap_or_default();
        ResolvedConfig {
            prefix: self.prefix.map_or(fallback.prefix, Into::into),
            columns: self
                .documentation_columns
                .map_or(fallback.columns, |c| c.into_iter().map(Into::into).collect()),
            sort_key: self.documentation_sort_key.or(fallback.sort_key),
        }
    }
}

/// Configuration after inheritance, as a bound container holds it.
#[derive(Clone, Debug)]
pub(crate) struct ResolvedConfig {
    pub(crate) prefix: Arc<str>,
    pub(crate) columns: Vec<Arc<str>>,
    pub(crate) sort_key: Option<SortKey>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            prefix: "".into(),
            columns: vec!["name".into()],
            sort_key: None,
        }
    }
}
