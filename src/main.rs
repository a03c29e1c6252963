//! Duplicut - Duplicate File Finder
//!
//! Entry point for the Duplicut CLI application.

use clap::Parser;
use duplicut::{cli::Cli, error::ExitCode};

fn main() {
    let cli = Cli::parse();

    match duplicut::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    }
}
