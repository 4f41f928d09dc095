//! Application configuration file.
//!
//! # Responsibility
//! - Describe where the database and logs live and how verbose logging is.
//! - Load from / save to a JSON file with defaults for absent fields.
//!
//! # Invariants
//! - A missing file is not an error; defaults are used.
//! - A corrupt file is reported and replaced by defaults, never partially used.
//! - Saving goes through a temp file and a rename.

use crate::logging::default_log_level;
use log::warn;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

pub const DB_FILE_NAME: &str = "bookmarks.sqlite3";
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file holding the key-value table.
    pub db_path: PathBuf,
    /// Absolute directory for rolling logs; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Prefix every route is mounted under.
    pub base_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_data_dir().join(DB_FILE_NAME),
            log_dir: None,
            log_level: default_log_level().to_string(),
            base_path: "/".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "config file i/o failed: {err}"),
            Self::Serialize(err) => write!(f, "config encoding failed: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

impl AppConfig {
    /// Reads `path`, falling back to defaults when absent or unreadable.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                warn!(
                    "event=config_load module=config status=error error_code=parse_failed error={err}"
                );
                Self::default()
            }),
            Err(err) => {
                warn!(
                    "event=config_load module=config status=error error_code=read_failed error={err}"
                );
                Self::default()
            }
        }
    }

    /// Writes the config as pretty JSON, atomically replacing `path`.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }
}

/// Per-user data directory: `$XDG_DATA_HOME/bookmarks`, `$HOME/.local/share/bookmarks`,
/// or the temp directory as a last resort.
pub fn default_data_dir() -> PathBuf {
    let non_empty = |key: &str| {
        std::env::var_os(key)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    };
    non_empty("XDG_DATA_HOME")
        .or_else(|| non_empty("HOME").map(|home| home.join(".local").join("share")))
        .unwrap_or_else(std::env::temp_dir)
        .join("bookmarks")
}

/// Default config file location inside `default_data_dir()`.
pub fn default_config_path() -> PathBuf {
    default_data_dir().join(CONFIG_FILE_NAME)
}
