//! Store location configuration.
//!
//! # Responsibility
//! - Resolve where the member store container lives on disk.
//!
//! # Invariants
//! - An explicit `MEMBER_DB_PATH` wins when it is set and non-blank.
//! - Otherwise the container falls back to the process temp directory.

use std::path::{Path, PathBuf};

/// Environment variable overriding the store file location.
pub const DB_PATH_ENV: &str = "MEMBER_DB_PATH";
/// Default container file name inside the fallback directory.
pub const DEFAULT_DB_FILE_NAME: &str = "MemberDicoding.sqlite3";

/// Resolved configuration for opening a `MemberStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Resolves configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(DB_PATH_ENV).ok().as_deref(), &std::env::temp_dir())
    }

    fn from_env_value(raw: Option<&str>, fallback_dir: &Path) -> Self {
        match raw.map(str::trim) {
            Some(trimmed) if !trimmed.is_empty() => Self::new(trimmed),
            _ => Self::new(fallback_dir.join(DEFAULT_DB_FILE_NAME)),
        }
    }
}
