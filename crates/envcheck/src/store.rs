//! Key/value stores the loading pipeline reads from and writes to.
//!
//! Responsibilities:
//! - Define the `EnvStore` interface (get / contains / set) used by every stage.
//! - Provide `ProcessEnv`, backed by the real process environment.
//! - Provide `MemoryEnv`, an ordered in-memory store for tests and snapshots.
//!
//! Does NOT handle:
//! - Deciding what to write (see `dotenv.rs` and `populate.rs`).
//!
//! Invariants:
//! - This is the only module that touches the process environment directly.
//! - A variable set to the empty string is present.
//! - `set` rejects keys and values the platform cannot store instead of panicking,
//!   and both stores apply the same rules.

use std::collections::BTreeMap;

use thiserror::Error;

/// Failure to write a variable into a store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvWriteError {
    #[error("variable name is empty")]
    EmptyKey,

    #[error("variable name {key:?} contains '=' or a NUL character")]
    InvalidKey { key: String },

    #[error("value for {key} contains a NUL character")]
    InvalidValue { key: String },
}

/// A mutable mapping of environment variable names to string values.
pub trait EnvStore {
    /// Look up a variable, returning `None` if it is unset.
    fn get(&self, key: &str) -> Option<String>;

    /// Set a variable, overwriting any existing value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), EnvWriteError>;

    /// Whether the variable is set (possibly to the empty string).
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

fn check_assignable(key: &str, value: &str) -> Result<(), EnvWriteError> {
    if key.is_empty() {
        return Err(EnvWriteError::EmptyKey);
    }
    if key.contains(['=', '\0']) {
        return Err(EnvWriteError::InvalidKey {
            key: key.to_string(),
        });
    }
    if value.contains('\0') {
        return Err(EnvWriteError::InvalidValue {
            key: key.to_string(),
        });
    }
    Ok(())
}

/// The environment of the current process.
///
/// Writes go straight to the process environment, which is shared global
/// state. Only use this during single-threaded startup.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        if key.is_empty() {
            return None;
        }
        std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EnvWriteError> {
        check_assignable(key, value)?;
        // SAFETY: the loader runs once at process startup before other threads
        // exist; key and value were checked for '=' and NUL above.
        unsafe {
            std::env::set_var(key, value);
        }
        Ok(())
    }
}

/// An in-memory environment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: BTreeMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    ///
    /// Non-UTF-8 names and values are converted lossily.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    v.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate over variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Variables that are new or hold a different value than in `base`.
    pub fn changed_since<'a>(
        &'a self,
        base: &'a MemoryEnv,
    ) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.iter()
            .filter(move |(k, v)| base.vars.get(*k).map(String::as_str) != Some(*v))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvStore for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EnvWriteError> {
        check_assignable(key, value)?;
        self.vars.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_memory_env_set_overwrites() {
        let mut env = MemoryEnv::new();
        env.set("KEY", "first").unwrap();
        env.set("KEY", "second").unwrap();

        assert_eq!(env.get("KEY").as_deref(), Some("second"));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_empty_value_is_present() {
        let mut env = MemoryEnv::new();
        env.set("EMPTY", "").unwrap();

        assert!(env.contains("EMPTY"));
        assert_eq!(env.get("EMPTY").as_deref(), Some(""));
        assert!(!env.contains("MISSING"));
    }

    #[test]
    fn test_set_rejects_unstorable_keys_and_values() {
        let mut env = MemoryEnv::new();

        assert_eq!(env.set("", "v"), Err(EnvWriteError::EmptyKey));
        assert_eq!(
            env.set("A=B", "v"),
            Err(EnvWriteError::InvalidKey {
                key: "A=B".to_string()
            })
        );
        assert_eq!(
            env.set("KEY", "a\0b"),
            Err(EnvWriteError::InvalidValue {
                key: "KEY".to_string()
            })
        );
        assert!(env.is_empty(), "rejected writes must not be stored");
    }

    #[test]
    fn test_from_iter_orders_by_name() {
        let env: MemoryEnv = [("B", "2"), ("A", "1")].into_iter().collect();
        let names: Vec<_> = env.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn test_changed_since_lists_only_new_and_modified() {
        let base: MemoryEnv = [("KEEP", "1"), ("EDIT", "old")].into_iter().collect();
        let mut env = base.clone();
        env.set("EDIT", "new").unwrap();
        env.set("ADDED", "x").unwrap();
        env.set("KEEP", "1").unwrap();

        let changed: Vec<_> = env.changed_since(&base).collect();
        assert_eq!(changed, [("ADDED", "x"), ("EDIT", "new")]);
    }

    #[test]
    #[serial]
    fn test_process_env_round_trip() {
        let key = "_ENVCHECK_TEST_PROCESS_STORE";
        temp_env::with_vars_unset([key], || {
            let mut env = ProcessEnv;
            assert!(!env.contains(key));

            env.set(key, "value").unwrap();
            assert_eq!(env.get(key).as_deref(), Some("value"));
        });
    }

    #[test]
    #[serial]
    fn test_process_env_rejects_empty_key_without_panicking() {
        let mut env = ProcessEnv;
        assert_eq!(env.set("", "value"), Err(EnvWriteError::EmptyKey));
        assert_eq!(env.get(""), None);
    }

    #[test]
    #[serial]
    fn test_from_process_snapshots_environment() {
        let key = "_ENVCHECK_TEST_SNAPSHOT";
        temp_env::with_var(key, Some("snap"), || {
            let env = MemoryEnv::from_process();
            assert_eq!(env.get(key).as_deref(), Some("snap"));
        });
    }
}
