//! Type conformance of present values.
//!
//! Parsing follows Rust's standard `FromStr` implementations: `i64` for
//! `int`, `f64` for `float`, and `bool` (exactly `true` or `false`) for `bool`.

use crate::error::{Violation, Violations};
use crate::schema::{Schema, VarType};
use crate::store::EnvStore;

/// Whether `value` parses as `var_type`.
///
/// `None` when the type itself is unsupported.
pub fn value_matches_type(var_type: &VarType, value: &str) -> Option<bool> {
    let ok = match var_type {
        VarType::String | VarType::Any => true,
        VarType::Int => value.parse::<i64>().is_ok(),
        VarType::Float => value.parse::<f64>().is_ok(),
        VarType::Bool => value.parse::<bool>().is_ok(),
        VarType::Unsupported(_) => return None,
    };
    Some(ok)
}

/// Ensure every present variable's value parses as its declared type.
pub fn validate_types<S: EnvStore + ?Sized>(schema: &Schema, store: &S) -> Result<(), Violations> {
    let mut violations = Vec::new();

    for spec in schema {
        let Some(value) = store.get(spec.name()) else {
            continue;
        };

        match value_matches_type(spec.var_type(), &value) {
            Some(true) => {}
            Some(false) => violations.push(Violation::TypeMismatch {
                name: spec.name().to_string(),
                expected: spec.var_type().clone(),
            }),
            None => violations.push(Violation::UnsupportedType {
                name: spec.name().to_string(),
                declared: spec.var_type().to_string(),
            }),
        }
    }

    Violations::check(violations)
}
