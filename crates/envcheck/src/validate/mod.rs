//! Validation stages run after defaults are populated.
//!
//! Responsibilities:
//! - Check required variables are present (`required.rs`).
//! - Check present values parse as their declared type (`types.rs`).
//! - Check present string values match their declared pattern (`patterns.rs`).
//!
//! Does NOT handle:
//! - Writing to the environment; every validator only reads the store.
//! - Ordering the stages (see `EnvLoader`).
//!
//! Invariants:
//! - Each validator reports every violation it finds, in schema order,
//!   except the pattern validator, which stops at a pattern declared on a
//!   non-string variable.
//! - Absent variables are only a concern of the required check.

mod patterns;
mod required;
mod types;

pub use patterns::validate_patterns;
pub use required::validate_required;
pub use types::{validate_types, value_matches_type};
