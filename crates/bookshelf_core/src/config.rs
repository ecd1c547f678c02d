//! Startup configuration loaded from a JSON file.
//!
//! # Responsibility
//! - Deserialize the storage path and optional logging settings once at
//!   process startup.
//! - Keep configuration an explicit value handed to the storage layer, not
//!   global state.
//!
//! # Invariants
//! - A present-but-invalid file is an error; only a missing file at the
//!   default path falls back to `Config::default()`.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "bookshelf.json";

const DEFAULT_DATABASE_FILE: &str = "bookshelf.db";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config file `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config file `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Top-level startup configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub storage: StorageConfig,
    /// File logging is skipped entirely when this section is absent.
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

/// Location of the SQLite database file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    pub database: PathBuf,
}

/// File logging settings; both fields required once the section exists.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                database: PathBuf::from(DEFAULT_DATABASE_FILE),
            },
            logging: None,
        }
    }
}

impl Config {
    /// Reads and deserializes the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` when the file exists, otherwise returns defaults.
    ///
    /// Read and parse failures on an existing file still propagate.
    pub fn load_or_default(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, DEFAULT_DATABASE_FILE};
    use std::path::Path;

    #[test]
    fn default_config_uses_local_database_and_no_logging() {
        let config = Config::default();
        assert_eq!(config.storage.database, Path::new(DEFAULT_DATABASE_FILE));
        assert!(config.logging.is_none());
    }
}
