//! CLI exit codes and error rendering.
//!
//! Responsibilities:
//! - Define structured exit codes so scripts can tell which stage failed.
//! - Map `LoadError` stages and `SchemaError` to exit codes.
//! - Render errors for stderr, one violation per line.
//!
//! Invariants:
//! - Exit codes 2-7 follow pipeline stage order.
//! - A command run through `envcheck run` exits with the child's own code.

use envcheck::{LoadError, SchemaError, Stage};

/// Structured exit codes for envcheck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - environment is valid.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// The .env file could not be read or has malformed lines.
    DotenvError = 2,

    /// The schema file could not be read, parsed, or has a nameless entry.
    SchemaError = 3,

    /// A default value could not be written.
    DefaultsError = 4,

    /// One or more required variables are unset.
    MissingRequired = 5,

    /// One or more values do not parse as their declared type.
    TypeMismatch = 6,

    /// One or more values do not match their declared pattern.
    PatternMismatch = 7,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<Stage> for ExitCode {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Dotenv => ExitCode::DotenvError,
            Stage::Schema => ExitCode::SchemaError,
            Stage::Defaults => ExitCode::DefaultsError,
            Stage::Required => ExitCode::MissingRequired,
            Stage::Types => ExitCode::TypeMismatch,
            Stage::Patterns => ExitCode::PatternMismatch,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(load_err) = cause.downcast_ref::<LoadError>() {
                return ExitCode::from(load_err.stage());
            }
            if cause.downcast_ref::<SchemaError>().is_some() {
                return ExitCode::SchemaError;
            }
        }
        ExitCode::GeneralError
    }
}

/// Render an error for stderr.
///
/// Stage failures print the stage label followed by one violation per line;
/// anything else prints the full cause chain.
pub fn render(err: &anyhow::Error) -> String {
    let Some(load_err) = err.chain().find_map(|c| c.downcast_ref::<LoadError>()) else {
        return format!("Error: {:#}", err);
    };
    let Some(violations) = load_err.violations() else {
        return format!("Error: {:#}", err);
    };

    let mut out = format!("Error: {}", load_err);
    for violation in violations {
        out.push_str(&format!("\n  - {}", violation));
    }
    out
}
