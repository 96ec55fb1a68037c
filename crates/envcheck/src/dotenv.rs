//! `.env` file parsing.
//!
//! Responsibilities:
//! - Parse the line-oriented `KEY=VALUE` format.
//! - Write every valid entry into an `EnvStore`, overwriting existing values.
//!
//! Does NOT handle:
//! - Variable interpolation, multi-line values, or `export` prefixes.
//! - Locating the file (see `EnvLoader`).
//!
//! Invariants:
//! - Blank lines and lines whose first non-whitespace character is `#` are skipped.
//! - A line must contain exactly one `=`. `A=b=c` is malformed.
//! - Keys and values are trimmed; one pair of matching `"` or `'` around the
//!   value is stripped.
//! - Valid lines are applied even when other lines fail; nothing is rolled back.
//! - Errors identify lines by number only, so `.env` contents never reach logs.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::error::{Violation, Violations};
use crate::store::EnvStore;

/// Errors that can occur while loading a `.env` file.
#[derive(Error, Debug)]
pub enum DotenvError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// One or more lines were malformed or could not be written.
    #[error(transparent)]
    Lines(Violations),
}

/// One parsed `KEY=VALUE` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotenvEntry {
    /// 1-based line number.
    pub line: usize,
    pub key: String,
    pub value: String,
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Parse one line. `None` for blank and comment lines.
fn parse_line(number: usize, line: &str) -> Option<Result<DotenvEntry, Violation>> {
    let content = line.trim_start();
    if content.is_empty() || content.starts_with('#') {
        return None;
    }

    let mut parts = line.split('=');
    let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
        return Some(Err(Violation::MalformedLine { line: number }));
    };

    Some(Ok(DotenvEntry {
        line: number,
        key: key.trim().to_string(),
        value: strip_quotes(value.trim()).to_string(),
    }))
}

fn parse_lines(content: &str) -> impl Iterator<Item = Result<DotenvEntry, Violation>> + '_ {
    content
        .lines()
        .enumerate()
        .filter_map(|(i, line)| parse_line(i + 1, line))
}

/// Parse `.env` content without touching any environment.
///
/// # Errors
///
/// Returns every malformed line if any are found.
pub fn parse_dotenv_str(content: &str) -> Result<Vec<DotenvEntry>, Violations> {
    let mut entries = Vec::new();
    let mut violations = Vec::new();
    for parsed in parse_lines(content) {
        match parsed {
            Ok(entry) => entries.push(entry),
            Err(v) => violations.push(v),
        }
    }
    Violations::check(violations)?;
    Ok(entries)
}

/// Apply `.env` content to `store`. Returns the number of variables written.
pub fn apply_dotenv_str<S: EnvStore + ?Sized>(content: &str, store: &mut S) -> Result<usize, Violations> {
    let mut written = 0;
    let mut violations = Vec::new();

    for parsed in parse_lines(content) {
        let entry = match parsed {
            Ok(entry) => entry,
            Err(v) => {
                violations.push(v);
                continue;
            }
        };
        match store.set(&entry.key, &entry.value) {
            Ok(()) => written += 1,
            Err(reason) => violations.push(Violation::EnvWrite {
                name: entry.key,
                reason,
            }),
        }
    }

    Violations::check(violations)?;
    Ok(written)
}

/// Read the `.env` file at `path` and apply it to `store`.
///
/// Returns the number of variables written.
pub fn load_dotenv_into<S: EnvStore + ?Sized>(path: &Path, store: &mut S) -> Result<usize, DotenvError> {
    let content = std::fs::read_to_string(path).map_err(|source| DotenvError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let written = apply_dotenv_str(&content, store).map_err(DotenvError::Lines)?;
    debug!(path = %path.display(), written, "applied .env file");
    Ok(written)
}
