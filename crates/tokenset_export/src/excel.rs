use std::io::Cursor;

use tokenset_core::{Container, SortKey};
use tokenset_foundation::{Error, ErrorKind, Result};

use crate::table::Table;

/// Name of the worksheet holding the table.
pub const SHEET: &str = "Attributes";

/// Renders a container as an xlsx workbook.
///
/// The workbook has a single `Attributes` sheet: the header in row 1 and one
/// row per token below it. Empty cells are left unset.
///
/// # Errors
///
/// Returns `SerializationError` if the workbook cannot be written.
pub fn to_excel(container: &Container, columns: Option<&[&str]>, sort_key: Option<&SortKey>) -> Result<Vec<u8>> {
    let table = Table::collect(container, columns, sort_key);

    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let sheet = book.new_sheet(SHEET).map_err(|e| serialization(e.to_string()))?;

    for (row, values) in (1u32..).zip(std::iter::once(&table.header).chain(&table.rows)) {
        for (col, value) in (1u32..).zip(values) {
            if !value.is_empty() {
                sheet.get_cell_mut((col, row)).set_value(value.as_str());
            }
        }
    }

    let mut out = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut out).map_err(|e| serialization(e.to_string()))?;
    Ok(out.into_inner())
}

fn serialization(message: String) -> Error {
    Error::new(ErrorKind::SerializationError(message)).in_frame(format!("excel sheet {SHEET}"))
}
