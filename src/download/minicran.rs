//! Partial CRAN mirror built with the miniCRAN R package.

use std::fs;
use std::path::{Path, PathBuf};

use include_dir::{include_dir, Dir};

use super::r::{find_r_current_version, r_major_minor};
use super::Sources;
use crate::error::{OdsError, Result};
use crate::fetch::HttpFetcher;
use crate::sys::{self, OutputPolicy};

/// Embedded R scripts.
static ASSETS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

const SCRIPT_NAME: &str = "miniCran.R";

/// Contents of the mirror-building script.
pub fn script() -> Result<&'static str> {
    ASSETS_DIR
        .get_file(SCRIPT_NAME)
        .and_then(|f| f.contents_utf8())
        .ok_or_else(|| OdsError::Other(anyhow::anyhow!("Embedded {} is missing", SCRIPT_NAME)))
}

/// Arguments passed to `Rscript`.
pub fn rscript_args(script: &Path, ods_dir: &Path, packages: &[String], r_version: &str) -> Vec<String> {
    vec![
        script.to_string_lossy().into_owned(),
        ods_dir.to_string_lossy().into_owned(),
        packages.join(" "),
        r_version.to_string(),
    ]
}

/// The R version to mirror for, as `major.minor`.
///
/// Uses `configured` when set, otherwise the current release listed on the
/// CRAN Windows page.
pub fn resolve_r_version(
    fetcher: &HttpFetcher,
    sources: &Sources,
    configured: Option<&str>,
) -> Result<String> {
    let full = match configured {
        Some(version) => version.to_string(),
        None => {
            let page = format!("{}/bin/windows/base/", sources.cran.trim_end_matches('/'));
            find_r_current_version(fetcher, &page)?
        }
    };
    r_major_minor(&full).ok_or_else(|| {
        OdsError::Other(anyhow::anyhow!("Cannot read major.minor from R version '{}'", full))
    })
}

/// Build `<ods_dir>/miniCRAN` for `packages` with the `Rscript` binary at
/// `rscript`. Returns the mirror directory.
pub fn download_minicran(
    rscript: &Path,
    ods_dir: &Path,
    packages: &[String],
    r_version: &str,
    output: OutputPolicy,
) -> Result<PathBuf> {
    let script_path = std::env::temp_dir().join(format!(
        "offlinedatasci-{}-{}",
        std::process::id(),
        SCRIPT_NAME
    ));
    fs::write(&script_path, script()?)?;

    tracing::info!(
        "Building miniCRAN for R {} with {} packages",
        r_version,
        packages.len()
    );
    let result = sys::run(
        &rscript.to_string_lossy(),
        rscript_args(&script_path, ods_dir, packages, r_version),
        output,
    );

    if let Err(e) = fs::remove_file(&script_path) {
        tracing::debug!("Could not remove {}: {}", script_path.display(), e);
    }
    result?;
    Ok(ods_dir.join("miniCRAN"))
}
