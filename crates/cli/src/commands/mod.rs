//! CLI command implementations.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the command handlers.
//!
//! Invariants:
//! - Commands validate against a snapshot of the process environment
//!   (`MemoryEnv::from_process`), so the CLI never mutates its own environment.

pub mod check;
pub mod run;
pub mod schema;

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::error::ExitCode;

/// Dispatch CLI commands to their handlers. Returns the process exit code.
pub fn dispatch(cli: Cli) -> Result<i32> {
    let loader = cli.loader();
    match cli.command {
        Commands::Check => {
            check::run(&loader)?;
            Ok(ExitCode::Success.as_i32())
        }
        Commands::Schema => {
            schema::run(&loader)?;
            Ok(ExitCode::Success.as_i32())
        }
        Commands::Run { command } => run::run(&loader, &command),
    }
}
