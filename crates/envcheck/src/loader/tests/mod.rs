//! Tests for the loader pipeline.
//!
//! Responsibilities:
//! - Test stage ordering and stage-labelled errors against `MemoryEnv`.
//! - Test the zero-argument `load()` against the real process environment.
//! - Test environment overrides of loader configuration.
//!
//! Invariants:
//! - Tests touching cwd or the process environment use `serial_test` and
//!   `global_test_lock()`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tempfile::TempDir;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// A temp directory holding a `.env` and `.env.yaml`.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new(schema: &str, dotenv: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".env.yaml"), schema).unwrap();
        fs::write(dir.path().join(".env"), dotenv).unwrap();
        Self { dir }
    }

    pub fn dotenv_path(&self) -> PathBuf {
        self.dir.path().join(".env")
    }

    pub fn schema_path(&self) -> PathBuf {
        self.dir.path().join(".env.yaml")
    }

    pub fn loader(&self) -> crate::EnvLoader {
        crate::EnvLoader::new()
            .with_dotenv_path(self.dotenv_path())
            .with_schema_path(self.schema_path())
    }
}
