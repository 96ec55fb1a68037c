//! Environment overrides for loader configuration.
//!
//! Responsibilities:
//! - Read `ENVCHECK_DOTENV_PATH`, `ENVCHECK_SCHEMA_PATH`, and `DOTENV_DISABLED`.
//! - Apply them to an `EnvLoader`.
//!
//! Invariants:
//! - Empty or whitespace-only variables are treated as unset.
//! - Returned values are trimmed.
//! - `DOTENV_DISABLED` disables the dotenv stage only for `1` or `true`.

use std::path::PathBuf;

use tracing::debug;

use super::builder::EnvLoader;
use crate::store::{EnvStore, ProcessEnv};

pub(crate) const DOTENV_PATH_VAR: &str = "ENVCHECK_DOTENV_PATH";
pub(crate) const SCHEMA_PATH_VAR: &str = "ENVCHECK_SCHEMA_PATH";
pub(crate) const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    ProcessEnv.get(key).and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub(crate) fn dotenv_disabled() -> bool {
    matches!(
        env_var_or_none(DOTENV_DISABLED_VAR).as_deref(),
        Some("true") | Some("1")
    )
}

/// Apply environment overrides to the loader.
pub(crate) fn apply_env(loader: &mut EnvLoader) {
    if let Some(path) = env_var_or_none(DOTENV_PATH_VAR) {
        debug!(path = %path, "dotenv path overridden from environment");
        loader.set_dotenv_path(PathBuf::from(path));
    }
    if let Some(path) = env_var_or_none(SCHEMA_PATH_VAR) {
        debug!(path = %path, "schema path overridden from environment");
        loader.set_schema_path(PathBuf::from(path));
    }
    if dotenv_disabled() {
        loader.set_skip_dotenv(true);
    }
}
