//! tokenset-doc: print a container's documentation table.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tokenset_runtime::{Cli, init_logging, run};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("warning: {e}");
    }

    match run(&cli) {
        Ok(output) => match std::io::stdout().write_all(&output) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("\x1b[31mError: {e}\x1b[0m");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            if let Some(context) = &e.context {
                eprint!("{context}");
            }
            ExitCode::FAILURE
        }
    }
}
