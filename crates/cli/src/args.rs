//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Turn global options into an `EnvLoader`.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `commands` module).

use clap::{ArgAction, Parser, Subcommand};
use envcheck::EnvLoader;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "envcheck")]
#[command(about = "Load a .env file and validate the environment against a schema", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  envcheck check\n  envcheck --env-file config/app.env --schema config/app.yaml check\n  envcheck schema\n  envcheck run -- ./server --port 8080\n"
)]
pub struct Cli {
    /// Path to the .env file (default: .env, or ENVCHECK_DOTENV_PATH)
    #[arg(long, global = true, value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Path to the schema file (default: .env.yaml, or ENVCHECK_SCHEMA_PATH)
    #[arg(long, global = true, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Do not read the .env file; validate the inherited environment only
    #[arg(long, global = true)]
    pub no_dotenv: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). Overrides RUST_LOG.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the .env file and validate the environment against the schema
    Check,

    /// Print the variables declared in the schema
    Schema,

    /// Validate the environment, then run a command with it
    Run {
        /// Command and arguments to run
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

impl Cli {
    /// Build the loader: CLI flags > environment overrides > defaults.
    pub fn loader(&self) -> EnvLoader {
        let mut loader = EnvLoader::new().from_env();
        if let Some(path) = &self.env_file {
            loader = loader.with_dotenv_path(path.clone());
        }
        if let Some(path) = &self.schema {
            loader = loader.with_schema_path(path.clone());
        }
        if self.no_dotenv {
            loader = loader.with_skip_dotenv(true);
        }
        loader
    }
}
