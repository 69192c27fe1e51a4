//! Error types for offlinedatasci operations.
//!
//! This module defines [`OdsError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Toggling a mirror config file either completes or returns an error;
//!   nothing is retried and callers propagate errors to the process boundary
//! - Download tasks are run as a batch, where each task's error is recorded
//!   in an [`InstallReport`](crate::install::InstallReport) and the batch
//!   continues
//! - Use `anyhow::Error` (via `OdsError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for offlinedatasci operations.
#[derive(Debug, Error)]
pub enum OdsError {
    /// A config file that must exist (e.g. for deactivation) is missing.
    #[error("Config file not found: {path}")]
    ConfigFileNotFound { path: PathBuf },

    /// Failed to parse the user settings file.
    #[error("Failed to parse settings at {path}: {message}")]
    SettingsParseError { path: PathBuf, message: String },

    /// The home directory could not be determined.
    #[error("Could not determine the home directory")]
    HomeDirNotFound,

    /// An HTTP request failed.
    #[error("Failed to fetch {url}: {message}")]
    Http { url: String, message: String },

    /// No R version could be found on a CRAN page.
    #[error("Could not find an R version at {url}")]
    VersionNotFound { url: String },

    /// Unknown package language.
    #[error("Unknown language '{name}' (expected 'r' or 'python')")]
    UnknownLanguage { name: String },

    /// External command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for offlinedatasci operations.
pub type Result<T> = std::result::Result<T, OdsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_not_found_displays_path() {
        let err = OdsError::ConfigFileNotFound {
            path: PathBuf::from("/home/me/.Rprofile"),
        };
        assert!(err.to_string().contains("/home/me/.Rprofile"));
    }

    #[test]
    fn settings_parse_error_displays_path_and_message() {
        let err = OdsError::SettingsParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn http_error_displays_url_and_message() {
        let err = OdsError::Http {
            url: "https://cloud.r-project.org/".into(),
            message: "HTTP 404".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("cloud.r-project.org"));
        assert!(msg.contains("404"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = OdsError::CommandFailed {
            command: "wget -r".into(),
            code: Some(8),
        };
        let msg = err.to_string();
        assert!(msg.contains("wget -r"));
        assert!(msg.contains('8'));
    }

    #[test]
    fn unknown_language_displays_name() {
        let err = OdsError::UnknownLanguage {
            name: "julia".into(),
        };
        assert!(err.to_string().contains("julia"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: OdsError = io_err.into();
        assert!(matches!(err, OdsError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(OdsError::HomeDirNotFound)
        }
        assert!(returns_error().is_err());
    }
}
