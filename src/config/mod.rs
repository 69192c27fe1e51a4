//! User settings.
//!
//! Settings are optional: every value has a default, and command-line flags
//! override whatever the settings file provides.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use offlinedatasci::config::load_settings;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(&path, "python_version: \"3.12\"").unwrap();
//!
//! let settings = load_settings(&path).unwrap();
//! assert_eq!(settings.python_version, "3.12");
//! assert_eq!(settings.r_packages, vec!["data-carpentry"]);
//! ```
//!
//! # Settings File Location
//!
//! `~/.offlinedatasci/config.yml`

pub mod loader;
pub mod schema;

pub use loader::{load_settings, load_user_settings, parse_settings, user_settings_path};
pub use schema::Settings;
