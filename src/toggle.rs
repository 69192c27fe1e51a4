//! Idempotent toggling of tool-managed entries in text config files.
//!
//! A [`ManagedEntry`] is a fragment of a user config file (a single line or
//! a marker comment followed by a fixed number of payload lines) that this
//! tool adds and removes. Every managed fragment carries [`MARKER`] so it can
//! be found again without any other bookkeeping.
//!
//! [`activate`] makes sure the entry is present and uncommented exactly once;
//! [`deactivate`] removes every managed fragment. Both keep all other lines
//! byte-for-byte and in their original order.
//!
//! Files are read in full and rewritten in place. There is no atomic rename,
//! so a crash between truncation and write can leave the file empty.
//!
//! # Example
//!
//! ```
//! use offlinedatasci::toggle::{activate_text, deactivate_text, ManagedEntry, ToggleOutcome};
//!
//! let entry = ManagedEntry::line("options(x = 1) #Added by offlinedatasci");
//!
//! let (content, outcome) = activate_text("library(stats)\n", &entry);
//! assert_eq!(outcome, ToggleOutcome::Appended);
//! assert_eq!(content, "library(stats)\noptions(x = 1) #Added by offlinedatasci\n");
//!
//! let (content, removed) = deactivate_text(&content, &entry);
//! assert_eq!(removed, 1);
//! assert_eq!(content, "library(stats)\n");
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{OdsError, Result};

/// Literal token identifying every line managed by this tool.
pub const MARKER: &str = "Added by offlinedatasci";

/// A configuration fragment whose presence this tool controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagedEntry {
    /// One literal line, identified by its trimmed text.
    Line(String),

    /// A marker comment line followed by payload lines, removed together.
    Block {
        /// The comment line heading the block.
        marker: String,
        /// Lines following the marker.
        payload: Vec<String>,
    },
}

impl ManagedEntry {
    /// Create a single-line entry. The text must not contain a newline.
    pub fn line(text: impl Into<String>) -> Self {
        Self::Line(text.into())
    }

    /// Create a block entry headed by `#` + [`MARKER`].
    pub fn block<I, S>(payload: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Block {
            marker: format!("#{}", MARKER),
            payload: payload.into_iter().map(Into::into).collect(),
        }
    }

    /// The entry's lines, without terminators.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Self::Line(text) => vec![text.as_str()],
            Self::Block { marker, payload } => std::iter::once(marker.as_str())
                .chain(payload.iter().map(String::as_str))
                .collect(),
        }
    }

    /// Number of lines removed together with a marker line on deactivation.
    pub fn trailing_lines(&self) -> usize {
        match self {
            Self::Line(_) => 0,
            Self::Block { payload, .. } => payload.len(),
        }
    }

    /// The exact managed text as written to the file.
    pub fn render(&self) -> String {
        self.lines().iter().map(|l| format!("{}\n", l)).collect()
    }
}

/// What [`activate`] found and did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The entry was already present and active.
    AlreadyActive,
    /// A commented-out copy of the entry was uncommented in place.
    Reactivated,
    /// The entry was appended to the end of the file.
    Appended,
}

impl fmt::Display for ToggleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ToggleOutcome::AlreadyActive => "already active",
            ToggleOutcome::Reactivated => "re-enabled",
            ToggleOutcome::Appended => "added",
        };
        write!(f, "{}", s)
    }
}

/// Check whether `lines` starts with `wanted`, comparing line by line.
fn starts_with_run(lines: &[&str], wanted: &[&str], same: impl Fn(&str, &str) -> bool) -> bool {
    lines.len() >= wanted.len() && lines.iter().zip(wanted).all(|(l, w)| same(l, w))
}

/// Make sure `entry` is present and uncommented in `content`.
///
/// Matching runs of lines are copied through unchanged, commented-out runs
/// (each line prefixed with `#`) are replaced by the managed text, and if
/// neither is found the managed text is appended.
pub fn activate_text(content: &str, entry: &ManagedEntry) -> (String, ToggleOutcome) {
    let wanted = entry.lines();
    let lines: Vec<&str> = content.split_inclusive('\n').collect();

    let mut output = String::with_capacity(content.len() + entry.render().len());
    let mut already_active = false;
    let mut reactivated = false;
    let mut i = 0;

    while i < lines.len() {
        let rest = &lines[i..];
        if starts_with_run(rest, &wanted, |l, w| l.trim() == w.trim()) {
            for line in &rest[..wanted.len()] {
                output.push_str(line);
            }
            already_active = true;
            i += wanted.len();
        } else if starts_with_run(rest, &wanted, |l, w| {
            l.trim()
                .strip_prefix('#')
                .is_some_and(|uncommented| uncommented == w.trim())
        }) {
            output.push_str(&entry.render());
            reactivated = true;
            i += wanted.len();
        } else {
            output.push_str(lines[i]);
            i += 1;
        }
    }

    let outcome = if already_active {
        ToggleOutcome::AlreadyActive
    } else if reactivated {
        ToggleOutcome::Reactivated
    } else {
        if !output.is_empty() && !output.ends_with('\n') {
            output.push('\n');
        }
        output.push_str(&entry.render());
        ToggleOutcome::Appended
    };

    (output, outcome)
}

/// Remove every managed fragment from `content`.
///
/// Every line containing [`MARKER`] is dropped together with the
/// [`ManagedEntry::trailing_lines`] lines that follow it. A marker close to
/// the end of the content drops only the lines that exist. Returns the new
/// content and the number of lines removed.
///
/// Content that had no final newline before [`activate_text`] appended an
/// entry comes back with one: the terminator added before the entry stays.
pub fn deactivate_text(content: &str, entry: &ManagedEntry) -> (String, usize) {
    let trailing = entry.trailing_lines();
    let mut output = String::with_capacity(content.len());
    let mut remaining = 0;
    let mut removed = 0;

    for line in content.split_inclusive('\n') {
        if line.contains(MARKER) {
            remaining = trailing;
            removed += 1;
        } else if remaining > 0 {
            remaining -= 1;
            removed += 1;
        } else {
            output.push_str(line);
        }
    }

    (output, removed)
}

/// Check whether `content` holds any managed line.
pub fn has_managed_lines(content: &str) -> bool {
    content.lines().any(|line| line.contains(MARKER))
}

/// Activate `entry` in the file at `path`.
///
/// A missing file (and missing parent directories) is created. The file is
/// rewritten in place without a temporary copy, so a crash mid-write can
/// lose its content.
///
/// # Errors
///
/// Returns `OdsError::Io` if the parent directory cannot be created or the
/// file cannot be read or written.
pub fn activate(path: &Path, entry: &ManagedEntry) -> Result<ToggleOutcome> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            tracing::debug!("Creating config directory {}", parent.display());
            fs::create_dir_all(parent)?;
        }
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    let (updated, outcome) = activate_text(&content, entry);
    fs::write(path, updated)?;

    tracing::debug!("Activated entry in {}: {}", path.display(), outcome);
    Ok(outcome)
}

/// Deactivate every managed fragment in the file at `path`.
///
/// Returns the number of lines removed.
///
/// # Errors
///
/// Returns `OdsError::ConfigFileNotFound` if the file does not exist, and
/// `OdsError::Io` for other read or write failures.
pub fn deactivate(path: &Path, entry: &ManagedEntry) -> Result<usize> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            OdsError::ConfigFileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            OdsError::Io(e)
        }
    })?;

    let (updated, removed) = deactivate_text(&content, entry);
    fs::write(path, updated)?;

    tracing::debug!("Removed {} managed line(s) from {}", removed, path.display());
    Ok(removed)
}
