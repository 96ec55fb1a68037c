//! `envcheck run`: validate, then run a command with the resulting environment.

use anyhow::{Context, Result};
use envcheck::{EnvLoader, MemoryEnv};
use std::process::Command;
use tracing::debug;

use crate::error::ExitCode;

/// Returns the child's exit code, or `GeneralError` if it was killed by a signal.
///
/// The child inherits this process's environment unchanged; only variables the
/// pipeline added or changed are layered on top.
pub fn run(loader: &EnvLoader, command: &[String]) -> Result<i32> {
    let (program, args) = command.split_first().context("no command given")?;

    let inherited = MemoryEnv::from_process();
    let mut env = inherited.clone();
    loader.load_into(&mut env)?;

    let written: Vec<(&str, &str)> = env.changed_since(&inherited).collect();
    debug!(program = %program, vars = written.len(), "spawning command");
    let status = Command::new(program)
        .args(args)
        .envs(written)
        .status()
        .with_context(|| format!("failed to run {}", program))?;

    Ok(status.code().unwrap_or(ExitCode::GeneralError.as_i32()))
}
