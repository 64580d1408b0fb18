//! The table every exporter renders.

use tokenset_core::{Container, SortKey, Token, Value};

/// Header and rows of a documentation export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    /// Column names.
    pub header: Vec<String>,
    /// One row per token, one cell per column.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Collects the table for `container`.
    ///
    /// `columns` and `sort_key` fall back to the container's configuration.
    ///
    /// A cell is blank only when the token's value is nil, missing, or still
    /// requested. Falsy values are rendered: `0` as `0`, `false` as `false`,
    /// and the empty string as itself.
    #[must_use]
    pub fn collect(container: &Container, columns: Option<&[&str]>, sort_key: Option<&SortKey>) -> Self {
        let header: Vec<String> = match columns {
            Some(columns) => columns.iter().map(|c| (*c).to_string()).collect(),
            None => container
                .documentation_columns()
                .into_iter()
                .map(str::to_string)
                .collect(),
        };
        let rows = container
            .documentation_order(sort_key)
            .into_iter()
            .map(|token| header.iter().map(|column| cell(token, column)).collect())
            .collect();
        Self { header, rows }
    }
}

// Blank for nil and absent values; `get` hides requested fields.
fn cell(token: &Token, column: &str) -> String {
    match token.get(column) {
        None | Some(Value::Nil) => String::new(),
        Some(Value::String(s)) => s.to_string(),
        Some(other) => other.to_string(),
    }
}
