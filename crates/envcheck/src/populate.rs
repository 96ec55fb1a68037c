//! Filling unset variables from schema defaults.
//!
//! Invariants:
//! - A variable that is already present, even as an empty string, is never overwritten.
//! - A write failure does not stop population of the remaining variables.

use crate::error::{Violation, Violations};
use crate::schema::Schema;
use crate::store::EnvStore;

/// Set every unset declared variable that has a default.
///
/// Returns the names that were populated, in schema order.
pub fn populate_defaults<S: EnvStore + ?Sized>(
    schema: &Schema,
    store: &mut S,
) -> Result<Vec<String>, Violations> {
    let mut populated = Vec::new();
    let mut violations = Vec::new();

    for spec in schema {
        let Some(default) = spec.default_value() else {
            continue;
        };
        if store.contains(spec.name()) {
            continue;
        }
        match store.set(spec.name(), &default.to_string()) {
            Ok(()) => populated.push(spec.name().to_string()),
            Err(reason) => violations.push(Violation::EnvWrite {
                name: spec.name().to_string(),
                reason,
            }),
        }
    }

    Violations::check(violations)?;
    Ok(populated)
}
