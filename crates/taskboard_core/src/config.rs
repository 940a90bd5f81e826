//! Store configuration resolved from the environment.
//!
//! # Responsibility
//! - Decide where the board database lives and which storage key to use.
//!
//! # Invariants
//! - Blank environment values fall back to defaults.
//! - Resolved storage keys are never blank.
//! - Relative database paths are resolved against the working directory.

use crate::repo::snapshot_repo::DEFAULT_STORAGE_KEY;
use std::path::{Path, PathBuf};

/// Environment variable overriding the board database path.
pub const DB_PATH_ENV: &str = "TASKBOARD_DB_PATH";
/// Environment variable overriding the snapshot storage key.
pub const STORAGE_KEY_ENV: &str = "TASKBOARD_STORAGE_KEY";
/// Environment variable overriding the log level used by executables.
pub const LOG_LEVEL_ENV: &str = "TASKBOARD_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "taskboard.sqlite3";
const LOG_DIR_NAME: &str = "taskboard-logs";

/// Where and under which key the board is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Resolves config from `TASKBOARD_DB_PATH` and `TASKBOARD_STORAGE_KEY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves config through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            db_path: non_blank(lookup(DB_PATH_ENV))
                .map(|raw| absolutize(Path::new(&raw)))
                .unwrap_or(defaults.db_path),
            storage_key: non_blank(lookup(STORAGE_KEY_ENV)).unwrap_or(defaults.storage_key),
        }
    }

    /// Directory for rolling log files, next to the database file.
    pub fn log_dir(&self) -> Option<PathBuf> {
        self.db_path.parent().map(|parent| parent.join(LOG_DIR_NAME))
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}
