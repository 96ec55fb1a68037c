//! envcheck - validate a process environment against a declarative schema.
//!
//! Responsibilities:
//! - Parse command-line arguments.
//! - Initialize logging to stderr.
//! - Dispatch to a command and translate failures into structured exit codes.
//!
//! Does NOT handle:
//! - Parsing or validation logic (see the `envcheck` library crate).

mod args;
mod commands;
mod error;

use args::Cli;
use clap::Parser;
use error::{ExitCodeExt, render};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::from_default_env(),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match commands::dispatch(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}", render(&e));
            std::process::exit(e.exit_code().as_i32());
        }
    }
}
