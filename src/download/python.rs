//! Python installers from python.org.

use std::path::{Path, PathBuf};

use super::{ensure_dir, url_basename, Sources};
use crate::error::{OdsError, Result};
use crate::fetch::{download_and_save, links, parse_table, HttpFetcher, InstallerLink};

/// Index of the download table on a release page.
const DOWNLOAD_TABLE: usize = 0;
/// Column holding the operating system.
const OS_COLUMN: usize = 1;
/// Column holding the installer link.
const LINK_COLUMN: usize = 0;

/// URL of the current release page, taken from the first `release` link on
/// the python.org front page.
pub fn find_release_page(home_page: &str, base_url: &str) -> Option<String> {
    let href = links(home_page)
        .into_iter()
        .find(|href| href.contains("release"))?;
    if href.starts_with("http") {
        Some(href)
    } else {
        Some(format!("{}{}", base_url.trim_end_matches('/'), href))
    }
}

/// Whether a download row is a desktop installer worth mirroring.
///
/// Windows installers (not the embeddable package or help file) and macOS
/// installers are kept.
pub fn is_wanted_installer(link: &InstallerLink) -> bool {
    let version = link.version.as_str();
    let is_windows =
        version.starts_with("Windows") && !version.contains("embeddable") && !version.contains("help");
    let is_macos = version.starts_with("macOS");
    is_windows || is_macos
}

/// Download the current Python installers for Windows and macOS into
/// `<ods_dir>/python`. Returns the installers present afterwards.
pub fn download_python(
    fetcher: &HttpFetcher,
    sources: &Sources,
    ods_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let dest_dir = ensure_dir(ods_dir, "python")?;

    let home_page = fetcher.fetch_text(&sources.python_org)?;
    let release_url = find_release_page(&home_page, &sources.python_org).ok_or_else(|| {
        OdsError::Other(anyhow::anyhow!(
            "No release page linked from {}",
            sources.python_org
        ))
    })?;
    tracing::info!("Python release page: {}", release_url);

    let release_page = fetcher.fetch_text(&release_url)?;
    let mut urls: Vec<String> = Vec::new();
    for link in parse_table(&release_page, DOWNLOAD_TABLE, OS_COLUMN, LINK_COLUMN) {
        if is_wanted_installer(&link) && !urls.contains(&link.url) {
            urls.push(link.url);
        }
    }

    let mut saved = Vec::new();
    for url in urls {
        let Some(name) = url_basename(&url) else {
            continue;
        };
        let dest = dest_dir.join(name);
        if download_and_save(fetcher, &url, &dest) {
            saved.push(dest);
        }
    }
    Ok(saved)
}
