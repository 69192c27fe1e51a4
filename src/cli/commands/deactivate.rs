//! Deactivate command implementation.

use crate::error::Result;
use crate::mirror::{self, MirrorPaths};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The deactivate command implementation.
pub struct DeactivateCommand {
    paths: MirrorPaths,
}

impl DeactivateCommand {
    pub fn new(paths: MirrorPaths) -> Self {
        Self { paths }
    }
}

fn removed_lines(count: usize) -> String {
    match count {
        0 => "no managed lines".to_string(),
        1 => "1 line removed".to_string(),
        n => format!("{} lines removed", n),
    }
}

impl Command for DeactivateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = mirror::deactivate(&self.paths)?;
        ui.success(&format!(
            "CRAN mirror deactivated in {} ({})",
            self.paths.rprofile.display(),
            removed_lines(report.cran)
        ));
        ui.success(&format!(
            "PyPI mirror deactivated in {} ({})",
            self.paths.pip_conf.display(),
            removed_lines(report.pypi)
        ));
        Ok(CommandResult::success())
    }
}
