//! Tests for the rendered formats

use tokenset_core::SortKey;
use std::io::Cursor;

use tokenset_export::{Format, SHEET, render, to_confluence, to_csv, to_excel, to_rst};

use crate::{documented_tokens, my_tokens, overridden_tokens};

// =============================================================================
// CSV
// =============================================================================

#[test]
fn csv_defaults_to_the_name_column() {
    assert_eq!(to_csv(&my_tokens(), None, None), "name\r\nfoo\r\nbar\r\nbaz\r\n");
}

#[test]
fn csv_uses_configured_columns_and_order() {
    assert_eq!(
        to_csv(&documented_tokens(), None, None),
        "name,stuff\r\nbaz,\r\nbar,World\r\nfoo,Hello\r\n"
    );
}

#[test]
fn csv_renders_nil_as_empty() {
    assert_eq!(
        to_csv(&overridden_tokens(), None, None),
        "name,stuff\r\nfoo,Hello\r\nbar,World\r\nbaz,\r\n"
    );
}

#[test]
fn csv_with_explicit_columns() {
    assert_eq!(
        to_csv(&my_tokens(), Some(&["stuff"]), Some(&SortKey::by_field("name"))),
        "stuff\r\nWorld\r\n\r\nHello\r\n"
    );
}

// =============================================================================
// Confluence
// =============================================================================

#[test]
fn confluence_table() {
    assert_eq!(
        to_confluence(&overridden_tokens(), None, None),
        "||name||stuff||\n|foo|Hello|\n|bar|World|\n|baz| |\n"
    );
}

// =============================================================================
// reStructuredText
// =============================================================================

#[test]
fn rst_grid_table() {
    let expected = "\
+------+-------+
| name | stuff |
+======+=======+
| bar  | World |
+------+-------+
| baz  |       |
+------+-------+
| foo  | Hello |
+------+-------+";

    assert_eq!(
        to_rst(&documented_tokens(), None, Some(&SortKey::by_field("name"))),
        expected
    );
}

#[test]
fn rst_single_column() {
    let expected = "\
+------+
| name |
+======+
| foo  |
+------+
| bar  |
+------+
| baz  |
+------+";

    assert_eq!(to_rst(&my_tokens(), None, None), expected);
}

// =============================================================================
// Excel
// =============================================================================

fn sheet_rows(bytes: Vec<u8>) -> Vec<Vec<String>> {
    let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true).unwrap();
    let sheet = book.get_sheet_by_name(SHEET).unwrap();
    (1u32..=4)
        .map(|row| {
            (1u32..=2)
                .map(|col| sheet.get_cell((col, row)).map(|c| c.get_value().to_string()).unwrap_or_default())
                .collect()
        })
        .collect()
}

#[test]
fn excel_uses_configured_columns_and_order() {
    let rows = sheet_rows(to_excel(&documented_tokens(), None, None).unwrap());
    assert_eq!(
        rows,
        vec![
            vec!["name", "stuff"],
            vec!["baz", ""],
            vec!["bar", "World"],
            vec!["foo", "Hello"],
        ]
    );
}

#[test]
fn excel_leaves_nil_cells_blank() {
    let bytes = to_excel(&overridden_tokens(), None, None).unwrap();
    let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true).unwrap();
    let sheet = book.get_sheet_by_name(SHEET).unwrap();

    assert_eq!(sheet.get_cell((1u32, 4u32)).map(|c| c.get_value().to_string()).as_deref(), Some("baz"));
    assert!(sheet.get_cell((2u32, 4u32)).is_none_or(|c| c.get_value().is_empty()));
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn render_dispatches_on_format() {
    let tokens = overridden_tokens();
    assert_eq!(render(&tokens, Format::Csv).unwrap(), to_csv(&tokens, None, None).into_bytes());
    assert_eq!(
        render(&tokens, Format::Confluence).unwrap(),
        to_confluence(&tokens, None, None).into_bytes()
    );
    assert_eq!(render(&tokens, Format::Rst).unwrap(), to_rst(&tokens, None, None).into_bytes());
    assert!(render(&tokens, Format::Excel).unwrap().starts_with(b"PK"));
}

#[test]
fn formats_parse_by_name() {
    assert_eq!("csv".parse::<Format>().unwrap(), Format::Csv);
    assert_eq!("wiki".parse::<Format>().unwrap(), Format::Confluence);
    assert_eq!("rst".parse::<Format>().unwrap(), Format::Rst);
    assert_eq!("xlsx".parse::<Format>().unwrap(), Format::Excel);
    assert!("pdf".parse::<Format>().is_err());
}
