//! User-facing output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for pipes, CI and tests
//! - Spinners and the install summary
//!
//! # Example
//!
//! ```
//! use offlinedatasci::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("offlinedatasci");
//! ui.success("Mirrors activated");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI, SpinnerStatus};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, OdsTheme};

use crate::install::{InstallReport, TaskStatus};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every mode.
    fn error(&mut self, msg: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show a contextual hint.
    fn show_hint(&mut self, hint: &str);

    /// Show the per-task table after `install`.
    fn show_install_summary(&mut self, report: &InstallReport);
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);

    /// Mark as skipped.
    fn finish_skipped(&mut self, msg: &str);
}

/// Status icon for a task in the summary.
pub fn status_icon(status: &TaskStatus) -> &'static str {
    match status {
        TaskStatus::Completed(_) => "✓",
        TaskStatus::Skipped(_) => "○",
        TaskStatus::Failed(_) => "✗",
    }
}

/// Detail text for a task in the summary.
pub fn status_detail(status: &TaskStatus) -> &str {
    match status {
        TaskStatus::Completed(detail) | TaskStatus::Skipped(detail) | TaskStatus::Failed(detail) => {
            detail
        }
    }
}
