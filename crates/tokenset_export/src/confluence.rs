use tokenset_core::{Container, SortKey};

use crate::table::Table;

/// Renders a container as Confluence wiki table markup.
///
/// Empty cells become a single space, which the wiki needs to keep the
/// cell.
#[must_use]
pub fn to_confluence(container: &Container, columns: Option<&[&str]>, sort_key: Option<&SortKey>) -> String {
    let table = Table::collect(container, columns, sort_key);
    let mut out = format!("||{}||\n", table.header.join("||"));
    for row in &table.rows {
        let cells: Vec<&str> = row
            .iter()
            .map(|c| if c.is_empty() { " " } else { c.as_str() })
            .collect();
        out.push('|');
        out.push_str(&cells.join("|"));
        out.push_str("|\n");
    }
    out
}
