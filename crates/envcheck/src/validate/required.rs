//! Presence check for required variables.

use crate::error::{Violation, Violations};
use crate::schema::Schema;
use crate::store::EnvStore;

/// Ensure every variable marked `required` is present.
pub fn validate_required<S: EnvStore + ?Sized>(schema: &Schema, store: &S) -> Result<(), Violations> {
    let violations = schema
        .iter()
        .filter(|spec| spec.is_required() && !store.contains(spec.name()))
        .map(|spec| Violation::RequiredMissing {
            name: spec.name().to_string(),
        })
        .collect();

    Violations::check(violations)
}
