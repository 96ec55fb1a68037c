//! Regular-expression checks on string variables.
//!
//! Matching uses `Regex::is_match`, so a pattern matches anywhere in the
//! value unless it is anchored with `^` and `$`.

use regex::Regex;

use crate::error::{Violation, Violations};
use crate::schema::{Schema, VarType};
use crate::store::EnvStore;

/// Ensure every present variable with a pattern matches it.
///
/// A pattern declared on a non-string variable fails the whole check at that
/// variable; compile failures and mismatches are collected.
pub fn validate_patterns<S: EnvStore + ?Sized>(schema: &Schema, store: &S) -> Result<(), Violations> {
    let mut violations = Vec::new();

    for spec in schema {
        let Some(pattern) = spec.pattern() else {
            continue;
        };
        let Some(value) = store.get(spec.name()) else {
            continue;
        };

        if spec.var_type() != &VarType::String {
            return Err(Violations::single(Violation::PatternType {
                name: spec.name().to_string(),
                declared: spec.var_type().clone(),
            }));
        }

        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(reason) => {
                violations.push(Violation::PatternCompile {
                    name: spec.name().to_string(),
                    reason,
                });
                continue;
            }
        };

        if !regex.is_match(&value) {
            violations.push(Violation::PatternMismatch {
                name: spec.name().to_string(),
                pattern: pattern.to_string(),
            });
        }
    }

    Violations::check(violations)
}
