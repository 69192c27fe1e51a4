//! Switching R and Python package installation to the local mirrors.
//!
//! Two user config files are managed:
//!
//! - `~/.Rprofile` gets one line pointing the `CRAN` repository at
//!   `<ods_dir>/miniCRAN`
//! - `~/.config/pip/pip.conf` gets a `[global]` block pointing `index-url`
//!   at `<ods_dir>/pypi`
//!
//! Paths are resolved through [`MirrorPaths`] so callers (and tests) can
//! point them at any home directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{OdsError, Result};
use crate::toggle::{self, ManagedEntry, ToggleOutcome};

/// Locations of the managed config files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorPaths {
    /// R startup file holding the CRAN repository option.
    pub rprofile: PathBuf,
    /// pip configuration file holding the package index URL.
    pub pip_conf: PathBuf,
}

impl MirrorPaths {
    /// Paths under the given home directory.
    pub fn from_home(home: &Path) -> Self {
        Self {
            rprofile: home.join(".Rprofile"),
            pip_conf: home.join(".config").join("pip").join("pip.conf"),
        }
    }

    /// Paths under the current user's home directory.
    pub fn discover() -> Result<Self> {
        let home = dirs::home_dir().ok_or(OdsError::HomeDirNotFound)?;
        Ok(Self::from_home(&home))
    }
}

/// Build a `file://` URL for a directory inside the ods directory.
fn file_url(ods_dir: &Path, child: &str) -> Result<String> {
    let absolute = std::path::absolute(ods_dir)?;
    let path = absolute.join(child);
    let display = path.to_string_lossy().replace('\\', "/");
    if display.starts_with('/') {
        Ok(format!("file://{}", display))
    } else {
        Ok(format!("file:///{}", display))
    }
}

/// The `.Rprofile` line selecting the local miniCRAN repository.
pub fn cran_entry(ods_dir: &Path) -> Result<ManagedEntry> {
    let url = file_url(ods_dir, "miniCRAN")?;
    Ok(ManagedEntry::line(format!(
        r#"local({{r <- getOption("repos"); r["CRAN"] <- "{}"; options(repos=r)}}) #{}"#,
        url,
        toggle::MARKER
    )))
}

/// The `pip.conf` block selecting the local PyPI mirror.
pub fn pypi_entry(ods_dir: &Path) -> Result<ManagedEntry> {
    let url = file_url(ods_dir, "pypi")?;
    Ok(ManagedEntry::block([
        "[global]".to_string(),
        format!("index-url = {}", url),
    ]))
}

/// Outcome of activating both mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationReport {
    pub cran: ToggleOutcome,
    pub pypi: ToggleOutcome,
}

/// Use the local CRAN and PyPI mirrors found in `ods_dir`.
///
/// # Errors
///
/// Returns an error if either config file cannot be created or written.
/// The `.Rprofile` is written first and stays updated when `pip.conf` fails.
pub fn activate(paths: &MirrorPaths, ods_dir: &Path) -> Result<ActivationReport> {
    let cran = activate_cran(paths, ods_dir)?;
    let pypi = activate_pypi(paths, ods_dir)?;
    Ok(ActivationReport { cran, pypi })
}

/// Use the local CRAN mirror.
pub fn activate_cran(paths: &MirrorPaths, ods_dir: &Path) -> Result<ToggleOutcome> {
    toggle::activate(&paths.rprofile, &cran_entry(ods_dir)?)
}

/// Use the local PyPI mirror.
pub fn activate_pypi(paths: &MirrorPaths, ods_dir: &Path) -> Result<ToggleOutcome> {
    if !paths.pip_conf.exists() {
        tracing::info!("Creating {}", paths.pip_conf.display());
    }
    toggle::activate(&paths.pip_conf, &pypi_entry(ods_dir)?)
}

/// Number of lines removed from each config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeactivationReport {
    pub cran: usize,
    pub pypi: usize,
}

/// Stop using the local mirrors.
///
/// Removal only looks for the marker, so the entries are built against a
/// placeholder directory to give the block length.
///
/// # Errors
///
/// Returns `OdsError::ConfigFileNotFound` if a config file is missing; the
/// `.Rprofile` is handled first, so a missing `.Rprofile` leaves `pip.conf`
/// untouched.
pub fn deactivate(paths: &MirrorPaths) -> Result<DeactivationReport> {
    let cran = deactivate_cran(paths)?;
    let pypi = deactivate_pypi(paths)?;
    Ok(DeactivationReport { cran, pypi })
}

/// Stop using the local CRAN mirror.
pub fn deactivate_cran(paths: &MirrorPaths) -> Result<usize> {
    toggle::deactivate(&paths.rprofile, &cran_entry(Path::new("/"))?)
}

/// Stop using the local PyPI mirror.
pub fn deactivate_pypi(paths: &MirrorPaths) -> Result<usize> {
    toggle::deactivate(&paths.pip_conf, &pypi_entry(Path::new("/"))?)
}

/// State of one managed config file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TargetStatus {
    pub name: String,
    pub path: PathBuf,
    pub exists: bool,
    pub active: bool,
}

/// Report whether each mirror is currently active. Read-only.
pub fn status(paths: &MirrorPaths) -> Result<Vec<TargetStatus>> {
    [("cran", &paths.rprofile), ("pypi", &paths.pip_conf)]
        .into_iter()
        .map(|(name, path)| {
            let content = match fs::read_to_string(path) {
                Ok(content) => Some(content),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                Err(e) => return Err(OdsError::Io(e)),
            };
            Ok(TargetStatus {
                name: name.to_string(),
                path: path.clone(),
                exists: content.is_some(),
                active: content.as_deref().is_some_and(toggle::has_managed_lines),
            })
        })
        .collect()
}
