//! Startup-time environment loading and validation.
//!
//! This crate reads a `.env` file into the environment, then checks the
//! environment against a declarative `.env.yaml` schema: unset variables are
//! filled from defaults, and required-ness, types, and patterns are validated.
//!
//! ```no_run
//! fn main() {
//!     if let Err(e) = envcheck::load() {
//!         eprintln!("invalid environment: {e}");
//!         std::process::exit(1);
//!     }
//! }
//! ```

pub mod dotenv;
mod error;
mod loader;
mod populate;
pub mod schema;
pub mod store;
pub mod validate;

pub use dotenv::{DotenvEntry, DotenvError, apply_dotenv_str, load_dotenv_into, parse_dotenv_str};
pub use error::{Violation, Violations};
pub use loader::{
    DEFAULT_DOTENV_PATH, DEFAULT_SCHEMA_PATH, EnvLoader, LoadError, Stage, env_var_or_none,
};
pub use populate::populate_defaults;
pub use schema::{DefaultValue, Schema, SchemaError, VarType, VariableSpec};
pub use store::{EnvStore, EnvWriteError, MemoryEnv, ProcessEnv};

/// Load `.env` and validate the process environment against `.env.yaml`,
/// both in the current working directory.
///
/// Mutates the process environment, so call it once at startup before
/// spawning threads.
///
/// # Errors
///
/// Returns a `LoadError` naming the first stage that failed.
pub fn load() -> Result<(), LoadError> {
    EnvLoader::new().load().map(|_| ())
}
