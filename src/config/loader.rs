//! Settings file discovery and loading.

use crate::config::schema::Settings;
use crate::error::{OdsError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Location of the user's settings file: `~/.offlinedatasci/config.yml`.
pub fn user_settings_path() -> Option<PathBuf> {
    Some(dirs::home_dir()?.join(".offlinedatasci").join("config.yml"))
}

/// Parse YAML content into [`Settings`].
///
/// An empty document yields the defaults.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_settings(content: &str, source_path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    serde_yaml::from_str(content).map_err(|e| OdsError::SettingsParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load settings from `path`, falling back to defaults if it does not exist.
///
/// # Errors
///
/// Returns `SettingsParseError` if the YAML is invalid.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No settings at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(e) => return Err(OdsError::Io(e)),
    };

    parse_settings(&content, path)
}

/// Load settings with optional path override.
///
/// Without an override the user settings file is used (defaults if the home
/// directory is unknown).
pub fn load_user_settings(settings_override: Option<&Path>) -> Result<Settings> {
    match settings_override {
        Some(path) => load_settings(path),
        None => match user_settings_path() {
            Some(path) => load_settings(&path),
            None => Ok(Settings::default()),
        },
    }
}
