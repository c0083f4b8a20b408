use std::path::PathBuf;

use directories_next::ProjectDirs;

const SETTINGS_FILE: &str = "settings.toml";

/// Per-user configuration directory for the library, if the platform has one.
pub fn project_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "file_ops").map(|d| d.config_dir().to_path_buf())
}

/// `<config dir>/settings.toml`.
pub fn default_settings_path() -> Option<PathBuf> {
    project_config_dir().map(|d| d.join(SETTINGS_FILE))
}
