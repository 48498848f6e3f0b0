//! Runtime configuration.

use crate::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Environment variable naming the database file.
pub const DB_ENV_VAR: &str = "RAPPORT_DB";

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct RapportConfig {
    /// Where the SQLite record store lives.
    pub db_path: PathBuf,
}

impl RapportConfig {
    /// Resolves configuration from the environment.
    ///
    /// `RAPPORT_DB` wins when set; otherwise the platform data directory is
    /// used (created if missing).
    ///
    /// # Errors
    ///
    /// Returns an error when no home directory can be determined or the data
    /// directory cannot be created.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = std::env::var(DB_ENV_VAR) {
            return Ok(Self {
                db_path: PathBuf::from(path),
            });
        }

        let dirs = ProjectDirs::from("io", "rapport", "rapport").ok_or_else(|| {
            Error::OperationFailed {
                operation: "resolve_data_dir".to_string(),
                cause: "no home directory available".to_string(),
            }
        })?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir).map_err(|e| Error::OperationFailed {
            operation: "create_data_dir".to_string(),
            cause: e.to_string(),
        })?;

        Ok(Self {
            db_path: data_dir.join("rapport.db"),
        })
    }

    /// Builds a configuration pointing at an explicit database path.
    #[must_use]
    pub fn with_db_path(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}
