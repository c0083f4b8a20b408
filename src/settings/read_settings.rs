use std::fs;
use std::io;
use std::path::Path;

use super::{Settings, SettingsError};

/// Read settings from `path`. A missing file is not an error.
pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings, SettingsError> {
    match fs::read_to_string(path.as_ref()) {
        Ok(text) => Settings::from_toml_str(&text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(e) => Err(e.into()),
    }
}
