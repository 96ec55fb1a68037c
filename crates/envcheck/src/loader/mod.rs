//! Pipeline orchestration for loading and validating the environment.
//!
//! Responsibilities:
//! - Provide the builder-pattern `EnvLoader` that sequences the stages.
//! - Resolve file locations from defaults, environment overrides, and builder calls.
//! - Wrap each stage's failure in a stage-labelled `LoadError`.
//!
//! Does NOT handle:
//! - Parsing or validation logic (see `dotenv.rs`, `schema.rs`, `populate.rs`, `validate/`).
//!
//! Invariants / Assumptions:
//! - Stages run in a fixed order and the first failing stage stops the pipeline.
//! - Builder methods take precedence over environment overrides.
//! - The `DOTENV_DISABLED` variable is only consulted by `from_env()`.

mod builder;
mod env;
mod error;

pub use builder::{DEFAULT_DOTENV_PATH, DEFAULT_SCHEMA_PATH, EnvLoader};
pub use env::env_var_or_none;
pub use error::{LoadError, Stage};

#[cfg(test)]
mod tests;
