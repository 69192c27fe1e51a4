//! offlinedatasci - Offline mirrors for data science workshops.
//!
//! offlinedatasci downloads R, RStudio and Python installers, Carpentries
//! lesson websites and partial CRAN/PyPI mirrors into one directory, then
//! switches R and pip to those mirrors (and back) by editing the user's
//! `~/.Rprofile` and `~/.config/pip/pip.conf`.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings file loading
//! - [`download`] - Installers, lessons and package mirrors
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - HTTP downloads and HTML scraping
//! - [`install`] - Batch runner for download tasks
//! - [`mirror`] - Activating and deactivating the local mirrors
//! - [`packages`] - Package collections for workshops
//! - [`sys`] - External tool lookup and invocation
//! - [`toggle`] - Idempotent managed entries in text config files
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use offlinedatasci::toggle::{activate_text, deactivate_text, ManagedEntry, ToggleOutcome};
//!
//! let entry = ManagedEntry::line("option = 1 #Added by offlinedatasci");
//! let (on, outcome) = activate_text("a = 0\n", &entry);
//! assert_eq!(outcome, ToggleOutcome::Appended);
//!
//! let (off, _) = deactivate_text(&on, &entry);
//! assert_eq!(off, "a = 0\n");
//! ```

pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fetch;
pub mod install;
pub mod mirror;
pub mod packages;
pub mod sys;
pub mod toggle;
pub mod ui;

pub use error::{OdsError, Result};
