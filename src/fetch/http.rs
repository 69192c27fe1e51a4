//! HTTP fetching.
//!
//! Provides a blocking HTTP client for release pages and installer files.

use std::fs::{self, File};
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::error::{OdsError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches pages and files over HTTP/HTTPS.
pub struct HttpFetcher {
    client: Client,
}

/// What [`HttpFetcher::fetch_to_file`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The destination already existed; nothing was fetched.
    Skipped,
    /// The resource was written to the destination.
    Downloaded { bytes: u64 },
}

fn http_error(url: &str, err: impl std::fmt::Display) -> OdsError {
    OdsError::Http {
        url: url.to_string(),
        message: err.to_string(),
    }
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with a 30-second timeout.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("offlinedatasci/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;
        Ok(Self { client })
    }

    fn get(&self, url: &str) -> Result<Response> {
        let response = self.client.get(url).send().map_err(|e| http_error(url, e))?;

        if !response.status().is_success() {
            return Err(http_error(url, format!("HTTP {}", response.status())));
        }

        Ok(response)
    }

    /// Fetch a resource as bytes.
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let bytes = self.get(url)?.bytes().map_err(|e| http_error(url, e))?;
        Ok(bytes.to_vec())
    }

    /// Fetch a page as text.
    pub fn fetch_text(&self, url: &str) -> Result<String> {
        self.get(url)?.text().map_err(|e| http_error(url, e))
    }

    /// Stream a resource to `dest` unless `dest` already exists.
    ///
    /// A partially written file is removed if the transfer fails.
    pub fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<FetchOutcome> {
        if dest.exists() {
            return Ok(FetchOutcome::Skipped);
        }

        let mut response = self.get(url)?;
        let mut file = File::create(dest)?;
        match response.copy_to(&mut file) {
            Ok(bytes) => Ok(FetchOutcome::Downloaded { bytes }),
            Err(e) => {
                drop(file);
                let _ = fs::remove_file(dest);
                Err(http_error(url, e))
            }
        }
    }
}

/// Download `url` to `dest`, logging instead of failing.
///
/// Returns `true` if the file is present afterwards.
pub fn download_and_save(fetcher: &HttpFetcher, url: &str, dest: &Path) -> bool {
    match fetcher.fetch_to_file(url, dest) {
        Ok(FetchOutcome::Skipped) => {
            tracing::debug!("File exists, not downloading: {}", dest.display());
            true
        }
        Ok(FetchOutcome::Downloaded { bytes }) => {
            tracing::info!("Downloaded {} ({} bytes)", dest.display(), bytes);
            true
        }
        Err(e) => {
            tracing::warn!("Download of {} failed: {}", url, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn fetch_text_returns_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/bin/macosx/");
            then.status(200).body("R-4.4.1-arm64.pkg");
        });

        let fetcher = HttpFetcher::new().unwrap();
        let body = fetcher.fetch_text(&server.url("/bin/macosx/")).unwrap();

        assert_eq!(body, "R-4.4.1-arm64.pkg");
    }

    #[test]
    fn fetch_returns_error_on_404() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("Not Found");
        });

        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher.fetch(&server.url("/missing")).unwrap_err();

        assert!(matches!(err, OdsError::Http { .. }));
        assert!(err.to_string().contains("404"), "{}", err);
    }

    #[test]
    fn fetch_to_file_writes_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/R-4.4.1-win.exe");
            then.status(200).body("installer");
        });
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("R-4.4.1-win.exe");

        let fetcher = HttpFetcher::new().unwrap();
        let outcome = fetcher
            .fetch_to_file(&server.url("/R-4.4.1-win.exe"), &dest)
            .unwrap();

        assert_eq!(outcome, FetchOutcome::Downloaded { bytes: 9 });
        assert_eq!(fs::read_to_string(&dest).unwrap(), "installer");
    }

    #[test]
    fn fetch_to_file_skips_existing_destination() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/file");
            then.status(200).body("new");
        });
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("file");
        fs::write(&dest, "old").unwrap();

        let fetcher = HttpFetcher::new().unwrap();
        let outcome = fetcher.fetch_to_file(&server.url("/file"), &dest).unwrap();

        assert_eq!(outcome, FetchOutcome::Skipped);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "old");
    }

    #[test]
    fn download_and_save_reports_failure_without_file() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/broken");
            then.status(500);
        });
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("broken");

        let fetcher = HttpFetcher::new().unwrap();
        let saved = download_and_save(&fetcher, &server.url("/broken"), &dest);

        assert!(!saved);
        assert!(!dest.exists());
    }
}
