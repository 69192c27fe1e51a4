//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands};
use crate::config::{load_user_settings, Settings};
use crate::error::Result;
use crate::mirror::MirrorPaths;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    settings_path: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a dispatcher reading settings from `settings_path`, or from
    /// the user settings file when `None`.
    pub fn new(settings_path: Option<PathBuf>) -> Self {
        Self { settings_path }
    }

    fn settings(&self) -> Result<Settings> {
        load_user_settings(self.settings_path.as_deref())
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Install(args) => {
                let cmd = super::install::InstallCommand::new(args.clone(), self.settings()?);
                cmd.execute(ui)
            }
            Commands::Activate(args) => {
                let cmd = super::activate::ActivateCommand::new(
                    args.clone(),
                    self.settings()?,
                    MirrorPaths::discover()?,
                );
                cmd.execute(ui)
            }
            Commands::Deactivate => {
                let cmd = super::deactivate::DeactivateCommand::new(MirrorPaths::discover()?);
                cmd.execute(ui)
            }
            Commands::Status(args) => {
                let cmd =
                    super::status::StatusCommand::new(args.clone(), MirrorPaths::discover()?);
                cmd.execute(ui)
            }
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn invalid_settings_fail_dispatch() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        std::fs::write(&path, "python_platforms: {").unwrap();
        let dispatcher = CommandDispatcher::new(Some(path));
        let cli = <Cli as clap::Parser>::try_parse_from([
            "offlinedatasci",
            "activate",
            temp.path().to_str().unwrap(),
        ])
        .unwrap();

        let mut ui = crate::ui::MockUI::new();
        assert!(dispatcher.dispatch(&cli, &mut ui).is_err());
    }
}
