//! Status command implementation.
//!
//! The `offlinedatasci status` command shows which mirrors are active.

use crate::cli::args::StatusArgs;
use crate::error::{OdsError, Result};
use crate::mirror::{self, MirrorPaths, TargetStatus};
use crate::ui::{OdsTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The status command implementation.
pub struct StatusCommand {
    args: StatusArgs,
    paths: MirrorPaths,
}

impl StatusCommand {
    pub fn new(args: StatusArgs, paths: MirrorPaths) -> Self {
        Self { args, paths }
    }
}

fn label(target: &TargetStatus) -> &'static str {
    match (target.exists, target.active) {
        (_, true) => "active",
        (true, false) => "inactive",
        (false, false) => "inactive (file missing)",
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let targets = mirror::status(&self.paths)?;

        if self.args.json {
            let json =
                serde_json::to_string_pretty(&targets).map_err(|e| OdsError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let theme = OdsTheme::detect();
        ui.show_header("Mirror status");
        for target in &targets {
            let state = if target.active {
                theme.success.apply_to(label(target))
            } else {
                theme.dim.apply_to(label(target))
            };
            ui.message(&format!(
                "  {:<6} {}  {}",
                target.name,
                state,
                theme.dim.apply_to(target.path.display())
            ));
        }

        Ok(CommandResult::success())
    }
}
