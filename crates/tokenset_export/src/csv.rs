use tokenset_core::{Container, SortKey};

use crate::table::Table;

/// Renders a container as CSV.
///
/// Fields containing a comma, quote, or line break are quoted, with quotes
/// doubled. Every record ends in `\r\n`.
#[must_use]
pub fn to_csv(container: &Container, columns: Option<&[&str]>, sort_key: Option<&SortKey>) -> String {
    let table = Table::collect(container, columns, sort_key);
    let mut out = String::new();
    write_record(&mut out, &table.header);
    for row in &table.rows {
        write_record(&mut out, row);
    }
    out
}

fn write_record(out: &mut String, fields: &[String]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\r', '\n']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push_str("\r\n");
}
