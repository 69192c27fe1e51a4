//! Install command implementation.
//!
//! The `offlinedatasci install` command downloads the requested software
//! into the ods directory, one task at a time.

use crate::cli::args::InstallArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::install::{run_tasks, InstallOptions, InstallReport, Installer, Task, TaskStatus};
use crate::sys::OutputPolicy;
use crate::ui::{OutputMode, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The install command implementation.
pub struct InstallCommand {
    args: InstallArgs,
    settings: Settings,
}

impl InstallCommand {
    pub fn new(args: InstallArgs, settings: Settings) -> Self {
        Self { args, settings }
    }

    /// Resolve tasks and options from arguments, environment and settings.
    ///
    /// The ods directory comes from the trailing positional argument, then
    /// `--ods-dir` / `OFFLINEDATASCI_DIR`, then the settings file, then
    /// `~/offlinedatasci`.
    pub fn plan(&self) -> Result<(Vec<Task>, InstallOptions)> {
        let (tasks, positional_dir) = self.args.selection()?;
        let explicit = positional_dir.or_else(|| self.args.ods_dir.clone());
        let ods_dir = self.settings.resolve_ods_dir(explicit.as_deref())?;

        let mut options = InstallOptions::from_settings(&self.settings, ods_dir);
        if !self.args.r_packages.is_empty() {
            options.r_packages = self.args.r_packages.clone();
        }
        if !self.args.py_packages.is_empty() {
            options.python_packages = self.args.py_packages.clone();
        }
        if let Some(version) = &self.args.r_version {
            options.r_version = Some(version.clone());
        }
        if let Some(version) = &self.args.python_version {
            options.python_version = version.clone();
        }
        Ok((tasks, options))
    }
}

/// External tools write to the terminal only in verbose mode.
fn tool_output(mode: OutputMode) -> OutputPolicy {
    if mode.shows_tool_output() {
        OutputPolicy::Inherit
    } else {
        OutputPolicy::Discard
    }
}

/// Run `tasks` with `installer`, one spinner per task.
fn run_with_progress(
    installer: &Installer,
    tasks: &[Task],
    ui: &mut dyn UserInterface,
) -> InstallReport {
    run_tasks(tasks, |task| {
        let mut spinner = ui.start_spinner(&format!("Downloading {}...", task));
        let result = installer.run_task(task);
        match &result {
            Ok(TaskStatus::Completed(detail)) => {
                spinner.finish_success(&format!("{}: {}", task, detail))
            }
            Ok(TaskStatus::Skipped(reason)) => {
                spinner.finish_skipped(&format!("{}: {}", task, reason))
            }
            Ok(TaskStatus::Failed(msg)) => spinner.finish_error(&format!("{}: {}", task, msg)),
            Err(e) => spinner.finish_error(&format!("{}: {}", task, e)),
        }
        result
    })
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (tasks, mut options) = self.plan()?;
        options.tool_output = tool_output(ui.output_mode());
        ui.show_header(&format!("Installing into {}", options.ods_dir.display()));

        let installer = Installer::new(options)?;
        installer.prepare()?;
        let report = run_with_progress(&installer, &tasks, ui);
        Ok(finish(&report, ui))
    }
}

/// Show the summary and turn the report into an exit status.
fn finish(report: &InstallReport, ui: &mut dyn UserInterface) -> CommandResult {
    ui.show_install_summary(report);

    if report.success() {
        return CommandResult::success();
    }
    let failed: Vec<String> = report
        .failures()
        .iter()
        .map(|o| o.task.to_string())
        .collect();
    ui.error(&format!("Failed: {}", failed.join(", ")));
    CommandResult::failure(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::TaskOutcome;
    use crate::ui::{MockUI, SpinnerStatus};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args(targets: &[&str]) -> InstallArgs {
        InstallArgs {
            targets: targets.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn flags_override_settings() {
        let mut install_args = args(&["minicran", "python-libraries", "/srv/ods"]);
        install_args.r_packages = vec!["here".to_string()];
        install_args.python_version = Some("3.12".to_string());
        install_args.ods_dir = Some(PathBuf::from("/ignored"));
        let settings = Settings {
            r_version: Some("R-4.3.3".to_string()),
            ..Default::default()
        };

        let (tasks, options) = InstallCommand::new(install_args, settings).plan().unwrap();

        assert_eq!(tasks, vec![Task::MiniCran, Task::PythonLibraries]);
        assert_eq!(options.ods_dir, PathBuf::from("/srv/ods"));
        assert_eq!(options.r_packages, vec!["here"]);
        assert_eq!(options.python_packages, vec!["software-carpentry"]);
        assert_eq!(options.r_version.as_deref(), Some("R-4.3.3"));
        assert_eq!(options.python_version, "3.12");
    }

    #[test]
    fn ods_dir_flag_used_without_positional() {
        let mut install_args = args(&["r"]);
        install_args.ods_dir = Some(PathBuf::from("/from/flag"));

        let (_, options) = InstallCommand::new(install_args, Settings::default())
            .plan()
            .unwrap();

        assert_eq!(options.ods_dir, PathBuf::from("/from/flag"));
    }

    #[test]
    fn unreachable_mirror_fails_task_spinner() {
        let temp = TempDir::new().unwrap();
        let ods = temp.path().join("ods");
        let settings = Settings {
            ods_dir: Some(ods.clone()),
            ..Default::default()
        };
        let installer = Installer::new(InstallOptions {
            sources: crate::download::Sources {
                cran: "http://127.0.0.1:9".to_string(),
                ..Default::default()
            },
            ..InstallOptions::from_settings(&settings, ods.clone())
        })
        .unwrap();
        let mut ui = MockUI::new();

        let report = run_with_progress(&installer, &[Task::R], &mut ui);

        assert!(!report.success());
        assert_eq!(ui.spinners(), &["Downloading R..."]);
        assert_eq!(ui.spinner_results()[0].0, SpinnerStatus::Error);
    }

    #[test]
    fn tool_output_follows_verbosity() {
        assert_eq!(tool_output(OutputMode::Verbose), OutputPolicy::Inherit);
        assert_eq!(tool_output(OutputMode::Normal), OutputPolicy::Discard);
        assert_eq!(tool_output(OutputMode::Quiet), OutputPolicy::Discard);
    }

    #[test]
    fn failed_tasks_are_named_and_exit_nonzero() {
        let report = InstallReport {
            outcomes: vec![
                TaskOutcome {
                    task: Task::R,
                    status: TaskStatus::Failed("HTTP 500".to_string()),
                },
                TaskOutcome {
                    task: Task::Lessons,
                    status: TaskStatus::Skipped("wget not found".to_string()),
                },
                TaskOutcome {
                    task: Task::Python,
                    status: TaskStatus::Failed("timeout".to_string()),
                },
            ],
        };
        let mut ui = MockUI::new();

        let result = finish(&report, &mut ui);

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Failed: R, Python"));
        assert_eq!(ui.summaries(), &[report]);
    }

    #[test]
    fn skipped_tasks_still_succeed() {
        let report = InstallReport {
            outcomes: vec![TaskOutcome {
                task: Task::MiniCran,
                status: TaskStatus::Skipped("Rscript not found".to_string()),
            }],
        };
        let mut ui = MockUI::new();

        assert!(finish(&report, &mut ui).success);
        assert!(ui.errors().is_empty());
    }
}
