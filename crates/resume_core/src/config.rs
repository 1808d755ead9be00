//! Store and logging configuration.
//!
//! # Responsibility
//! - Resolve database location and log settings from explicit values or
//!   process environment.
//! - Open the configured store.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - `db_path = ":memory:"` selects an isolated in-memory database.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, init_logging, LoggingError};
use rusqlite::Connection;
use serde::Deserialize;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "RESUME_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "RESUME_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "RESUME_LOG_DIR";

pub const DEFAULT_DB_FILE_NAME: &str = "resume_core.sqlite3";
pub const IN_MEMORY_DB_PATH: &str = ":memory:";

/// Runtime configuration for the resume core.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Database file. Falls back to `<temp_dir>/resume_core.sqlite3`.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// Absolute directory for rolling logs. Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads `RESUME_DB_PATH`, `RESUME_LOG_LEVEL` and `RESUME_LOG_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: read(DB_PATH_ENV).map(PathBuf::from),
            log_level: read(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }

    pub fn resolved_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
    }

    pub fn is_in_memory(&self) -> bool {
        self.db_path
            .as_deref()
            .is_some_and(|path| path.as_os_str() == IN_MEMORY_DB_PATH)
    }

    /// Starts file logging when `log_dir` is set.
    ///
    /// Returns whether logging was (or already is) active for this config.
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        match &self.log_dir {
            Some(dir) => init_logging(&self.log_level, dir).map(|()| true),
            None => Ok(false),
        }
    }
}

/// Opens the database selected by `config`, with migrations applied.
pub fn open_store(config: &CoreConfig) -> DbResult<Connection> {
    if config.is_in_memory() {
        open_db_in_memory()
    } else {
        open_db(config.resolved_db_path())
    }
}

#[cfg(test)]
mod tests {
    use super::{open_store, CoreConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn from_lookup_reads_all_keys() {
        let config = CoreConfig::from_lookup(lookup(&[
            (DB_PATH_ENV, "/var/lib/resume/db.sqlite3"),
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, "/var/log/resume"),
        ]));

        assert_eq!(
            config.db_path,
            Some(PathBuf::from("/var/lib/resume/db.sqlite3"))
        );
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/resume")));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[(DB_PATH_ENV, "  "), (LOG_LEVEL_ENV, "")]));

        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.log_level, default_log_level());
        assert!(config
            .resolved_db_path()
            .ends_with(super::DEFAULT_DB_FILE_NAME));
    }

    #[test]
    fn init_logging_without_dir_is_a_no_op() {
        assert!(!CoreConfig::default().init_logging().unwrap());
    }

    #[test]
    fn deserializes_partial_config_with_defaults() {
        let config: CoreConfig =
            serde_json::from_str(r#"{ "db_path": ":memory:" }"#).unwrap();
        assert!(config.is_in_memory());
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn open_store_honors_memory_and_file_paths() {
        let memory = CoreConfig {
            db_path: Some(PathBuf::from(":memory:")),
            ..CoreConfig::default()
        };
        open_store(&memory).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let file = CoreConfig {
            db_path: Some(dir.path().join("store.sqlite3")),
            ..CoreConfig::default()
        };
        open_store(&file).unwrap();
        assert!(dir.path().join("store.sqlite3").exists());
    }
}
