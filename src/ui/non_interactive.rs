//! Plain-text UI for pipes, CI and scripted use.

use crate::install::InstallReport;

use super::{status_detail, status_icon, OutputMode, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// No spinners are animated; each operation prints one line when it starts
/// and one when it finishes.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("⚠ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_details() {
            println!("  {}", message);
        }
        Box::new(LineSpinner)
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_details() {
            println!("\n{}\n", title);
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_details() {
            println!("  {}", hint);
        }
    }

    fn show_install_summary(&mut self, report: &InstallReport) {
        println!();
        println!("  ┌─ Summary ──────────────────────────");
        for outcome in &report.outcomes {
            println!(
                "  │ {} {:<18} {}",
                status_icon(&outcome.status),
                outcome.task.to_string(),
                status_detail(&outcome.status)
            );
        }
        println!("  └────────────────────────────────────");
    }
}

/// Spinner stand-in that prints the final state as a line.
struct LineSpinner;

impl SpinnerHandle for LineSpinner {
    fn finish_success(&mut self, msg: &str) {
        println!("  ✓ {}", msg);
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("  ✗ {}", msg);
    }

    fn finish_skipped(&mut self, msg: &str) {
        println!("  ○ {}", msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_mode() {
        let ui = NonInteractiveUI::new(OutputMode::Verbose);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }

    #[test]
    fn spinner_lifecycle_in_quiet_mode() {
        let mut ui = NonInteractiveUI::new(OutputMode::Quiet);
        let mut spinner = ui.start_spinner("Downloading");
        spinner.finish_skipped("skipped");
    }
}
