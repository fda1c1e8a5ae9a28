//! User preferences for the equipment manager.
//!
//! # Responsibility
//! - Hold the data file location and logging settings.
//! - Load/save preferences as a JSON file with per-field defaults.
//!
//! # Invariants
//! - A missing preferences file yields `Ok(None)`; callers fall back to
//!   `UserPrefs::default()`.
//! - Absent keys take their default value; unknown keys are ignored.

use crate::logging::default_log_level;
use crate::repo::json_file::{read_json_file, write_json_file, JsonFileError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

const DEFAULT_EQUIPMENT_FILE: &str = "data/equipment.json";

/// Preferences loading/saving failure.
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Malformed(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "preferences i/o failed: {err}"),
            Self::Malformed(err) => write!(f, "malformed preferences file: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Malformed(err) => Some(err),
        }
    }
}

impl From<JsonFileError> for ConfigError {
    fn from(value: JsonFileError) -> Self {
        match value {
            JsonFileError::Io(err) => Self::Io(err),
            JsonFileError::Parse(err) => Self::Malformed(err),
        }
    }
}

/// Persistent user preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPrefs {
    /// Equipment data document location.
    pub equipment_file_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files. Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for UserPrefs {
    fn default() -> Self {
        Self {
            equipment_file_path: PathBuf::from(DEFAULT_EQUIPMENT_FILE),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl UserPrefs {
    /// Reads preferences from `path`. Returns `Ok(None)` when the file is absent.
    pub fn load(path: &Path) -> Result<Option<UserPrefs>, ConfigError> {
        Ok(read_json_file(path)?)
    }

    /// Like `load`, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<UserPrefs, ConfigError> {
        Ok(Self::load(path)?.unwrap_or_default())
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        write_json_file(path, self).map_err(ConfigError::Io)
    }
}
