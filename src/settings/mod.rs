//! Library settings, loaded from a TOML file.
//!
//! Every field has a default, so an empty or partial file is valid and a
//! missing file simply yields `Settings::default()`.

pub mod config_dirs;
pub mod read_settings;
pub mod write_settings;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use config_dirs::default_settings_path;
pub use read_settings::load_settings;
pub use write_settings::save_settings;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Worker threads for parallel `delete_many`. `0` uses rayon's global pool.
    pub delete_parallelism: usize,
    pub log: LogSettings,
}

/// Consumed by `crate::logging::init_tracing`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `FILE_OPS_LOG` is not set.
    pub filter: String,
    /// Directory for a daily rolling log file. Logs go to stderr when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    /// Emit JSON lines instead of the human-readable format.
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "file_ops=info".to_string(),
            directory: None,
            json: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("could not serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl Settings {
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(s)?)
    }
}
