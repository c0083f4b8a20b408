use std::fs;
use std::path::Path;

use super::{Settings, SettingsError};

/// Write `settings` to `path` as TOML, creating parent directories.
pub fn save_settings(path: impl AsRef<Path>, settings: &Settings) -> Result<(), SettingsError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(settings)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{load_settings, LogSettings};
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn saved_settings_load_back() {
        let td = tempdir().unwrap();
        let p = td.path().join("nested/dir/settings.toml");
        let settings = Settings {
            delete_parallelism: 3,
            log: LogSettings {
                filter: "file_ops=debug".into(),
                directory: Some(PathBuf::from("/var/log/file_ops")),
                json: true,
            },
        };
        save_settings(&p, &settings).unwrap();
        assert_eq!(load_settings(&p).unwrap(), settings);
    }
}
