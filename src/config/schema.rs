//! Settings schema.
//!
//! This module contains the struct that maps to the YAML settings file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{OdsError, Result};

/// Directory name used under the home directory when no ods directory is given.
pub const DEFAULT_ODS_DIR_NAME: &str = "offlinedatasci";

/// Root structure of `config.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where mirrors are built and read from. `~` expands to the home directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ods_dir: Option<PathBuf>,

    /// R release to build the miniCRAN mirror for (e.g. `R-4.4.1`).
    /// Discovered from CRAN when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r_version: Option<String>,

    /// Python version wheels are downloaded for.
    #[serde(default = "default_python_version")]
    pub python_version: String,

    /// Wheel platform tags downloaded into the PyPI mirror.
    #[serde(default = "default_python_platforms")]
    pub python_platforms: Vec<String>,

    /// R package collections or names for the miniCRAN mirror.
    #[serde(default = "default_r_packages")]
    pub r_packages: Vec<String>,

    /// Python package collections or names for the PyPI mirror.
    #[serde(default = "default_python_packages")]
    pub python_packages: Vec<String>,
}

fn default_python_version() -> String {
    "3.11".to_string()
}

fn default_python_platforms() -> Vec<String> {
    ["manylinux_2_17_x86_64", "macosx_10_12_x86_64", "win_amd64"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_r_packages() -> Vec<String> {
    vec!["data-carpentry".to_string()]
}

fn default_python_packages() -> Vec<String> {
    vec!["software-carpentry".to_string()]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ods_dir: None,
            r_version: None,
            python_version: default_python_version(),
            python_platforms: default_python_platforms(),
            r_packages: default_r_packages(),
            python_packages: default_python_packages(),
        }
    }
}

/// Expand a leading `~` to `home`.
fn expand_home(path: &Path, home: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

impl Settings {
    /// Pick the ods directory: `explicit`, then the settings value, then
    /// `~/offlinedatasci`.
    pub fn resolve_ods_dir(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = explicit {
            return Ok(dir.to_path_buf());
        }

        let home = dirs::home_dir().ok_or(OdsError::HomeDirNotFound)?;
        Ok(match &self.ods_dir {
            Some(dir) => expand_home(dir, &home),
            None => home.join(DEFAULT_ODS_DIR_NAME),
        })
    }
}
