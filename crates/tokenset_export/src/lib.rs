//! Tabular documentation exports for tokenset containers.
//!
//! Every exporter reads the same table: the container's tokens in
//! documentation order, one row each, one cell per documentation column.
//! Nil, missing, and still-requested values render as empty cells.
//!
//! - [`to_csv`] - RFC 4180 CSV with `\r\n` line endings
//! - [`to_confluence`] - Confluence wiki table markup
//! - [`to_rst`] - reStructuredText grid table
//! - [`to_excel`] - xlsx workbook with an `Attributes` sheet

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod confluence;
mod csv;
mod excel;
mod rst;
mod table;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokenset_core::Container;
use tokenset_foundation::{Error, Result};

pub use confluence::to_confluence;
pub use csv::to_csv;
pub use excel::{SHEET, to_excel};
pub use rst::to_rst;
pub use table::Table;

/// Output format of a documentation export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Comma-separated values.
    Csv,
    /// Confluence wiki markup.
    Confluence,
    /// reStructuredText grid table.
    Rst,
    /// xlsx workbook.
    Excel,
}

impl Format {
    /// All supported formats.
    pub const ALL: [Format; 4] = [Format::Csv, Format::Confluence, Format::Rst, Format::Excel];

    /// Returns the format's short name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Confluence => "confluence",
            Format::Rst => "rst",
            Format::Excel => "excel",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "csv" => Ok(Format::Csv),
            "confluence" | "wiki" => Ok(Format::Confluence),
            "rst" => Ok(Format::Rst),
            "excel" | "xlsx" => Ok(Format::Excel),
            other => Err(Error::invalid_input(format!("unknown format: {other}"))),
        }
    }
}

/// Renders a container with its configured columns and sort key.
///
/// Text formats come back as UTF-8.
///
/// # Errors
///
/// Returns `SerializationError` if an Excel workbook cannot be written.
pub fn render(container: &Container, format: Format) -> Result<Vec<u8>> {
    match format {
        Format::Csv => Ok(to_csv(container, None, None).into_bytes()),
        Format::Confluence => Ok(to_confluence(container, None, None).into_bytes()),
        Format::Rst => Ok(to_rst(container, None, None).into_bytes()),
        Format::Excel => to_excel(container, None, None),
    }
}
