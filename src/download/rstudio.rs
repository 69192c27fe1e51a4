//! RStudio desktop installers.

use std::path::{Path, PathBuf};

use super::{ensure_dir, url_basename, Sources};
use crate::error::Result;
use crate::fetch::{download_and_save, links, HttpFetcher};

/// Installer links (`.exe` or `.dmg`) on the download page, without duplicates.
pub fn installer_links(page: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for href in links(page) {
        let is_installer = href.contains(".exe") || href.contains(".dmg");
        if is_installer && href.starts_with("http") && !found.contains(&href) {
            found.push(href);
        }
    }
    found
}

/// Download the RStudio installers listed on the download page into
/// `<ods_dir>/rstudio`. Returns the installers present afterwards.
pub fn download_rstudio(
    fetcher: &HttpFetcher,
    sources: &Sources,
    ods_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let dest_dir = ensure_dir(ods_dir, "rstudio")?;
    let page = fetcher.fetch_text(&sources.rstudio_download)?;

    let mut saved = Vec::new();
    for url in installer_links(&page) {
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
