//! Fetching remote resources.
//!
//! - [`http`] - Blocking HTTP client for pages and installers
//! - [`html`] - Minimal extraction of links and table rows from HTML pages

pub mod html;
pub mod http;

pub use html::{links, parse_table, InstallerLink};
pub use http::{download_and_save, FetchOutcome, HttpFetcher};
