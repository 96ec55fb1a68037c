//! Per-variable violations and their aggregate.
//!
//! Responsibilities:
//! - Define `Violation`, one problem found by a stage for one variable or line.
//! - Define `Violations`, the non-empty list a stage reports when it fails.
//!
//! Does NOT handle:
//! - Stage labelling (see `loader/error.rs`).
//! - File-level failures (see `DotenvError` and `SchemaError`).
//!
//! Invariants:
//! - A `Violations` value is never empty.
//! - Violations keep the order in which the stage found them.
//! - Messages name variables and line numbers, never values read from `.env`.

use std::fmt;

use thiserror::Error;

use crate::schema::VarType;
use crate::store::EnvWriteError;

/// A single problem found while loading or validating the environment.
#[derive(Error, Debug, Clone)]
pub enum Violation {
    /// A `.env` line that does not split into exactly one key and one value.
    #[error("invalid line {line} in .env file: expected exactly one '='")]
    MalformedLine { line: usize },

    #[error("failed to set env var {name:?}: {reason}")]
    EnvWrite { name: String, reason: EnvWriteError },

    #[error("required var {name} is not set")]
    RequiredMissing { name: String },

    #[error("var {name} is not a valid {expected}")]
    TypeMismatch { name: String, expected: VarType },

    #[error("var {name} has an unsupported type {declared:?}")]
    UnsupportedType { name: String, declared: String },

    #[error("variable {name:?} has type {declared}, pattern is supported only for type string")]
    PatternType { name: String, declared: VarType },

    #[error("failed to compile regex for variable {name}: {reason}")]
    PatternCompile { name: String, reason: regex::Error },

    #[error("variable {name} does not match pattern {pattern}")]
    PatternMismatch { name: String, pattern: String },
}

impl Violation {
    /// The variable this violation is about, if it concerns a declared variable.
    pub fn name(&self) -> Option<&str> {
        match self {
            Violation::MalformedLine { .. } => None,
            Violation::EnvWrite { name, .. }
            | Violation::RequiredMissing { name }
            | Violation::TypeMismatch { name, .. }
            | Violation::UnsupportedType { name, .. }
            | Violation::PatternType { name, .. }
            | Violation::PatternCompile { name, .. }
            | Violation::PatternMismatch { name, .. } => Some(name),
        }
    }
}

/// Every violation one stage found, reported together.
#[derive(Debug, Clone)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// `Ok(())` when nothing was found, otherwise the aggregate.
    pub(crate) fn check(found: Vec<Violation>) -> Result<(), Violations> {
        if found.is_empty() {
            Ok(())
        } else {
            Err(Violations(found))
        }
    }

    pub(crate) fn single(violation: Violation) -> Self {
        Violations(vec![violation])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Names of the variables involved, in report order.
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().filter_map(Violation::name).collect()
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.0
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
