//! Populating the ods directory.
//!
//! Each submodule fills one sub-directory of the ods directory:
//!
//! - [`r`] - R installers for Windows and macOS (`R/`)
//! - [`rstudio`] - RStudio installers (`rstudio/`)
//! - [`python`] - Python installers (`python/`)
//! - [`lessons`] - Rendered lesson websites and an index page (`lessons/`)
//! - [`minicran`] - Partial CRAN mirror (`miniCRAN/`)
//! - [`pypi`] - Partial PyPI mirror (`pythonlibraries/`, `pypi/`)
//!
//! Installer downloads use [`download_and_save`](crate::fetch::download_and_save),
//! so a failed file is logged and the remaining files are still fetched.

pub mod lessons;
pub mod minicran;
pub mod pypi;
pub mod python;
pub mod r;
pub mod rstudio;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Base URLs of the sites installers are discovered on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sources {
    /// CRAN mirror root.
    pub cran: String,
    /// python.org root.
    pub python_org: String,
    /// Page listing the RStudio desktop installers.
    pub rstudio_download: String,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            cran: "https://cloud.r-project.org".to_string(),
            python_org: "https://www.python.org".to_string(),
            rstudio_download: "https://posit.co/download/rstudio-desktop/".to_string(),
        }
    }
}

/// Create `parent/name` if needed and return it.
pub fn ensure_dir(parent: &Path, name: &str) -> Result<PathBuf> {
    let dir = parent.join(name);
    if !dir.is_dir() {
        tracing::info!("Creating {}", dir.display());
        fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

/// File name of a download URL (last path segment, without query).
pub fn url_basename(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next()?;
    path.rsplit('/').next().filter(|name| !name.is_empty())
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn ensure_dir_creates_nested() {
        let temp = TempDir::new().unwrap();
        let dir = ensure_dir(&temp.path().join("ods"), "R").unwrap();
        assert!(dir.is_dir());
        assert!(dir.ends_with("ods/R"));
    }

    #[test]
    fn url_basename_strips_query() {
        assert_eq!(
            url_basename("https://x.org/files/RStudio-2024.04.2-764.exe?ref=dl"),
            Some("RStudio-2024.04.2-764.exe")
        );
        assert_eq!(url_basename("https://x.org/dir/"), None);
    }

    #[test]
    fn escape_html_special_characters() {
        assert_eq!(escape_html(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&#39;");
    }

    #[test]
    fn default_sources_use_https() {
        let sources = Sources::default();
        assert!(sources.cran.starts_with("https://"));
        assert!(sources.python_org.starts_with("https://"));
        assert!(sources.rstudio_download.starts_with("https://"));
    }
}
