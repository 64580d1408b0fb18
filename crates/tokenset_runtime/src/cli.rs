//! The `tokenset-doc` command line.
//!
//! `tokenset-doc --manifest tokens.toml --container app::Fields --csv`
//! prints one container's documentation table; `--excel --output fields.xlsx`
//! writes it as a workbook instead. Programs that define their
//! containers in code can reuse the same flags through
//! [`generate_documentation_from_args`].

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser};
use tokenset_core::Container;
use tokenset_export::{Format, render};
use tokenset_foundation::{Error, ErrorKind, Result};

use crate::manifest::Manifest;

/// Exactly one output format.
#[derive(Args, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[group(required = true, multiple = false)]
pub struct DocArgs {
    /// Generate a csv description of all fields
    #[arg(short, long)]
    pub csv: bool,

    /// Generate a confluence wiki markup description of all fields
    #[arg(short, long)]
    pub wiki: bool,

    /// Generate a RST table of all fields
    #[arg(short, long)]
    pub rst: bool,

    /// Generate an excel workbook of all fields
    #[arg(short, long)]
    pub excel: bool,
}

impl DocArgs {
    /// Returns the selected format; CSV if none is set.
    #[must_use]
    pub fn format(&self) -> Format {
        if self.wiki {
            Format::Confluence
        } else if self.rst {
            Format::Rst
        } else if self.excel {
            Format::Excel
        } else {
            Format::Csv
        }
    }
}

impl From<Format> for DocArgs {
    fn from(format: Format) -> Self {
        Self {
            csv: format == Format::Csv,
            wiki: format == Format::Confluence,
            rst: format == Format::Rst,
            excel: format == Format::Excel,
        }
    }
}

/// Arguments of the `tokenset-doc` binary.
#[derive(Parser, Debug)]
#[command(name = "tokenset-doc", version)]
#[command(about = "Generate documentation of fields.", long_about = None)]
pub struct Cli {
    /// TOML manifest declaring token types and containers
    #[arg(short, long, value_name = "PATH")]
    pub manifest: PathBuf,

    /// Container to document, by path or short name; required when the
    /// manifest declares more than one
    #[arg(long, value_name = "NAME")]
    pub container: Option<String>,

    #[command(flatten)]
    pub format: DocArgs,

    /// Write the documentation to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Parser, Debug)]
#[command(about = "Generate documentation of fields.", long_about = None)]
struct EmbeddedCli {
    #[command(flatten)]
    format: DocArgs,
}

/// Renders `container` in the format `args` selects.
///
/// # Errors
///
/// Returns `SerializationError` if an Excel workbook cannot be written.
pub fn generate_documentation(container: &Container, args: DocArgs) -> Result<Vec<u8>> {
    render(container, args.format())
}

/// Parses command-line style arguments and renders `container`.
///
/// The first item is the program name, as with [`std::env::args_os`].
///
/// # Errors
///
/// Returns `InvalidInput` carrying clap's message when the arguments do not
/// select exactly one format.
pub fn generate_documentation_from_args<I, T>(container: &Container, args: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = EmbeddedCli::try_parse_from(args).map_err(|e| Error::invalid_input(e.to_string()))?;
    generate_documentation(container, cli.format)
}

/// Loads the manifest and renders the selected container.
///
/// With `--output` the rendering goes to that file and nothing is returned.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded or bound, the
/// container cannot be determined, or the output file cannot be written.
pub fn run(cli: &Cli) -> Result<Vec<u8>> {
    let registry = Manifest::load(&cli.manifest)?.build()?;

    let container = match &cli.container {
        Some(name) => registry.container(name)?,
        None => {
            let mut all = registry.containers();
            match (all.next(), all.next()) {
                (Some(only), None) => only,
                (None, _) => {
                    return Err(Error::new(ErrorKind::ManifestError(
                        "manifest declares no containers".to_string(),
                    )));
                }
                (Some(_), Some(_)) => {
                    let names: Vec<&str> = registry.containers().map(|c| c.path()).collect();
                    return Err(Error::new(ErrorKind::ManifestError(format!(
                        "several containers declared, choose one with --container: {}",
                        names.join(", ")
                    ))));
                }
            }
        }
    };

    tracing::info!(container = container.path(), format = %cli.format.format(), "rendering documentation");
    let rendered = generate_documentation(container, cli.format)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &rendered).map_err(|e| {
                Error::new(ErrorKind::IoError(e.to_string())).in_frame(format!("writing {}", path.display()))
            })?;
            tracing::info!(path = %path.display(), bytes = rendered.len(), "documentation written");
            Ok(Vec::new())
        }
        None => Ok(rendered),
    }
}
