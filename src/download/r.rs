//! R installers from CRAN.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::{ensure_dir, Sources};
use crate::error::{OdsError, Result};
use crate::fetch::{download_and_save, HttpFetcher};

/// Matches installer file names such as `R-4.4.1-arm64.pkg` or `R-4.4.1-win.exe`.
static R_INSTALLER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(R-\d+\.\d+\.\d+)-(?:x86_64|arm64|win)\.(?:exe|pkg)")
        .expect("R_INSTALLER_REGEX must compile")
});

/// First R version (e.g. `R-4.4.1`) named by an installer on `page`.
pub fn extract_r_version(page: &str) -> Option<String> {
    R_INSTALLER_REGEX
        .captures(page)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// `major.minor` of an R version: `R-4.4.1` becomes `4.4`.
pub fn r_major_minor(version: &str) -> Option<String> {
    let numbers = version.trim().trim_start_matches("R-");
    let mut parts = numbers.split('.');
    let major = parts.next().filter(|p| !p.is_empty())?;
    let minor = parts.next().filter(|p| !p.is_empty())?;
    Some(format!("{}.{}", major, minor))
}

/// Determine the most recent R version listed at `url`.
///
/// # Errors
///
/// Returns `OdsError::Http` if the page cannot be fetched and
/// `OdsError::VersionNotFound` if it names no installer.
pub fn find_r_current_version(fetcher: &HttpFetcher, url: &str) -> Result<String> {
    let page = fetcher.fetch_text(url)?;
    extract_r_version(&page).ok_or_else(|| OdsError::VersionNotFound {
        url: url.to_string(),
    })
}

/// Installer URLs and file names for an R version.
pub fn installer_urls(cran: &str, version: &str) -> Vec<(String, String)> {
    let cran = cran.trim_end_matches('/');
    [
        format!("{}/bin/windows/base/{}-win.exe", cran, version),
        format!("{}/bin/macosx/big-sur-arm64/base/{}-arm64.pkg", cran, version),
        format!("{}/bin/macosx/big-sur-x86_64/base/{}-x86_64.pkg", cran, version),
    ]
    .into_iter()
    .filter_map(|url| {
        let name = super::url_basename(&url)?.to_string();
        Some((url, name))
    })
    .collect()
}

/// Download the current R installers (Windows, macOS arm64 and x86_64)
/// into `<ods_dir>/R`. Returns the installers present afterwards.
pub fn download_r(fetcher: &HttpFetcher, sources: &Sources, ods_dir: &Path) -> Result<Vec<PathBuf>> {
    let dest_dir = ensure_dir(ods_dir, "R")?;
    let page = format!("{}/bin/macosx/", sources.cran.trim_end_matches('/'));
    let version = find_r_current_version(fetcher, &page)?;
    tracing::info!("Current R version: {}", version);

    Ok(installer_urls(&sources.cran, &version)
        .into_iter()
        .map(|(url, name)| (url, dest_dir.join(name)))
        .filter(|(url, dest)| download_and_save(fetcher, url, dest))
        .map(|(_, dest)| dest)
        .collect())
}
