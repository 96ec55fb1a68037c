//! `envcheck check`: validate and report.

use anyhow::Result;
use envcheck::{EnvLoader, MemoryEnv};
use tracing::info;

pub fn run(loader: &EnvLoader) -> Result<()> {
    let mut env = MemoryEnv::from_process();
    let schema = loader.load_into(&mut env)?;

    info!(schema = %loader.schema_path().display(), "check passed");
    println!("OK: {} variables validated", schema.len());
    Ok(())
}
