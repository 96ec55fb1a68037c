//! Stage-labelled errors returned by the loader.
//!
//! Responsibilities:
//! - Name the stage that failed, using the labels callers match on.
//! - Keep the underlying cause reachable through `source()`.
//!
//! Invariants:
//! - `Display` of a `LoadError` is exactly the stage label; details live in the
//!   source chain (render with `{:#}` through anyhow, or walk `source()`).

use std::fmt;

use thiserror::Error;

use crate::dotenv::DotenvError;
use crate::error::Violations;
use crate::schema::SchemaError;

/// One step of the loading pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Dotenv,
    Schema,
    Defaults,
    Required,
    Types,
    Patterns,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Dotenv,
        Stage::Schema,
        Stage::Defaults,
        Stage::Required,
        Stage::Types,
        Stage::Patterns,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Stage::Dotenv => "dotenv",
            Stage::Schema => "schema",
            Stage::Defaults => "defaults",
            Stage::Required => "required",
            Stage::Types => "types",
            Stage::Patterns => "patterns",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while loading the environment.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to load .env")]
    Dotenv(#[source] DotenvError),

    #[error("failed to get config")]
    Schema(#[source] SchemaError),

    #[error("failed to populate unset vars with defaults")]
    Defaults(#[source] Violations),

    #[error("failed to validate required vars")]
    Required(#[source] Violations),

    #[error("failed to validate var types")]
    Types(#[source] Violations),

    #[error("failed to validate var patterns")]
    Patterns(#[source] Violations),
}

impl LoadError {
    pub fn stage(&self) -> Stage {
        match self {
            LoadError::Dotenv(_) => Stage::Dotenv,
            LoadError::Schema(_) => Stage::Schema,
            LoadError::Defaults(_) => Stage::Defaults,
            LoadError::Required(_) => Stage::Required,
            LoadError::Types(_) => Stage::Types,
            LoadError::Patterns(_) => Stage::Patterns,
        }
    }

    /// The per-variable violations behind this error, if the stage reports any.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            LoadError::Dotenv(DotenvError::Lines(v))
            | LoadError::Defaults(v)
            | LoadError::Required(v)
            | LoadError::Types(v)
            | LoadError::Patterns(v) => Some(v),
            LoadError::Dotenv(DotenvError::Read { .. }) | LoadError::Schema(_) => None,
        }
    }
}
