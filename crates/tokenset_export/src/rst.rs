use tokenset_core::{Container, SortKey};

use crate::table::Table;

/// Renders a container as a reStructuredText grid table.
///
/// Cells are centred in columns as wide as their widest cell, with one
/// space of margin; the header is separated by `=`. No trailing newline.
#[must_use]
pub fn to_rst(container: &Container, columns: Option<&[&str]>, sort_key: Option<&SortKey>) -> String {
    let table = Table::collect(container, columns, sort_key);
    let widths: Vec<usize> = table
        .header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            table
                .rows
                .iter()
                .map(|row| width(&row[i]))
                .chain(std::iter::once(width(h)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule = |fill: char| {
        let mut line = String::from("+");
        for w in &widths {
            line.extend(std::iter::repeat_n(fill, w + 2));
            line.push('+');
        }
        line
    };
    let line = |cells: &[String]| {
        let mut line = String::from("|");
        for (cell, w) in cells.iter().zip(&widths) {
            line.push(' ');
            line.push_str(&center(cell, *w));
            line.push_str(" |");
        }
        line
    };

    let mut lines = vec![rule('-'), line(&table.header), rule('=')];
    for row in &table.rows {
        lines.push(line(row));
        lines.push(rule('-'));
    }
    lines.join("\n")
}

fn width(s: &str) -> usize {
    s.chars().count()
}

// With odd padding, odd-length text gets the extra space on the right and
// even-length text on the left.
fn center(text: &str, w: usize) -> String {
    let excess = w.saturating_sub(width(text));
    let (left, right) = if excess % 2 == 0 {
        (excess / 2, excess / 2)
    } else if width(text) % 2 == 1 {
        (excess / 2, excess / 2 + 1)
    } else {
        (excess / 2 + 1, excess / 2)
    };
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}
