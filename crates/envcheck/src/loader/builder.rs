//! Loader builder implementation.
//!
//! Responsibilities:
//! - Hold the dotenv path, schema path, and dotenv gate.
//! - Run the stages in order against an `EnvStore` and label the first failure.
//!
//! Does NOT handle:
//! - Reading override variables (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Stages run as: dotenv, schema, defaults, required, types, patterns.
//! - A failing stage stops the pipeline; later stages never run.
//! - Relative paths resolve against the current working directory.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::env::apply_env;
use super::error::{LoadError, Stage};
use crate::dotenv::{DotenvError, load_dotenv_into};
use crate::error::Violations;
use crate::populate::populate_defaults;
use crate::schema::Schema;
use crate::store::{EnvStore, ProcessEnv};
use crate::validate::{validate_patterns, validate_required, validate_types};

/// Default dotenv file name, relative to the working directory.
pub const DEFAULT_DOTENV_PATH: &str = ".env";

/// Default schema file name, relative to the working directory.
pub const DEFAULT_SCHEMA_PATH: &str = ".env.yaml";

/// Loads a `.env` file and validates the environment against a schema.
#[derive(Debug, Clone)]
pub struct EnvLoader {
    dotenv_path: PathBuf,
    schema_path: PathBuf,
    skip_dotenv: bool,
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn log_violations(stage: Stage, violations: &Violations) {
    warn!(%stage, count = violations.len(), "stage reported violations");
    for violation in violations {
        debug!(%stage, %violation, "violation");
    }
}

impl EnvLoader {
    /// Create a loader using `.env` and `.env.yaml` in the working directory.
    pub fn new() -> Self {
        Self {
            dotenv_path: PathBuf::from(DEFAULT_DOTENV_PATH),
            schema_path: PathBuf::from(DEFAULT_SCHEMA_PATH),
            skip_dotenv: false,
        }
    }

    /// Apply `ENVCHECK_DOTENV_PATH`, `ENVCHECK_SCHEMA_PATH`, and `DOTENV_DISABLED`.
    ///
    /// Call this before the `with_*` methods so explicit settings win.
    pub fn from_env(mut self) -> Self {
        apply_env(&mut self);
        self
    }

    /// Set the dotenv file path.
    pub fn with_dotenv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv_path = path.into();
        self
    }

    /// Set the schema file path.
    pub fn with_schema_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema_path = path.into();
        self
    }

    /// Skip the dotenv stage entirely.
    pub fn with_skip_dotenv(mut self, skip: bool) -> Self {
        self.skip_dotenv = skip;
        self
    }

    pub(crate) fn set_dotenv_path(&mut self, path: PathBuf) {
        self.dotenv_path = path;
    }

    pub(crate) fn set_schema_path(&mut self, path: PathBuf) {
        self.schema_path = path;
    }

    pub(crate) fn set_skip_dotenv(&mut self, skip: bool) {
        self.skip_dotenv = skip;
    }

    pub fn dotenv_path(&self) -> &Path {
        &self.dotenv_path
    }

    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    pub fn skips_dotenv(&self) -> bool {
        self.skip_dotenv
    }

    /// Run the pipeline against the process environment.
    ///
    /// # Errors
    ///
    /// Returns a `LoadError` naming the first stage that failed.
    pub fn load(&self) -> Result<Schema, LoadError> {
        self.load_into(&mut ProcessEnv)
    }

    /// Run the pipeline against `store`.
    ///
    /// Returns the loaded schema on success.
    pub fn load_into<S: EnvStore + ?Sized>(&self, store: &mut S) -> Result<Schema, LoadError> {
        if self.skip_dotenv {
            debug!(stage = %Stage::Dotenv, "dotenv loading disabled");
        } else {
            debug!(stage = %Stage::Dotenv, path = %self.dotenv_path.display(), "running stage");
            load_dotenv_into(&self.dotenv_path, &mut *store).map_err(|e| {
                match &e {
                    DotenvError::Lines(v) => log_violations(Stage::Dotenv, v),
                    DotenvError::Read { .. } => warn!(stage = %Stage::Dotenv, error = %e, "stage failed"),
                }
                LoadError::Dotenv(e)
            })?;
        }

        debug!(stage = %Stage::Schema, path = %self.schema_path.display(), "running stage");
        let schema = Schema::load(&self.schema_path).map_err(|e| {
            warn!(stage = %Stage::Schema, error = %e, "stage failed");
            LoadError::Schema(e)
        })?;

        debug!(stage = %Stage::Defaults, "running stage");
        let populated = populate_defaults(&schema, &mut *store).map_err(|v| {
            log_violations(Stage::Defaults, &v);
            LoadError::Defaults(v)
        })?;
        for name in &populated {
            debug!(name = %name, "populated from default");
        }

        debug!(stage = %Stage::Required, "running stage");
        validate_required(&schema, &*store).map_err(|v| {
            log_violations(Stage::Required, &v);
            LoadError::Required(v)
        })?;

        debug!(stage = %Stage::Types, "running stage");
        validate_types(&schema, &*store).map_err(|v| {
            log_violations(Stage::Types, &v);
            LoadError::Types(v)
        })?;

        debug!(stage = %Stage::Patterns, "running stage");
        validate_patterns(&schema, &*store).map_err(|v| {
            log_violations(Stage::Patterns, &v);
            LoadError::Patterns(v)
        })?;

        info!(
            vars = schema.len(),
            populated = populated.len(),
            "environment validated"
        );
        Ok(schema)
    }
}
