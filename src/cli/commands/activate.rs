//! Activate command implementation.
//!
//! The `offlinedatasci activate` command points R and pip at the mirrors in
//! the ods directory.

use crate::cli::args::ActivateArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::mirror::{self, MirrorPaths};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The activate command implementation.
pub struct ActivateCommand {
    args: ActivateArgs,
    settings: Settings,
    paths: MirrorPaths,
}

impl ActivateCommand {
    pub fn new(args: ActivateArgs, settings: Settings, paths: MirrorPaths) -> Self {
        Self {
            args,
            settings,
            paths,
        }
    }
}

impl Command for ActivateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ods_dir = self.settings.resolve_ods_dir(self.args.ods_dir.as_deref())?;
        tracing::debug!("Activating mirrors in {}", ods_dir.display());

        for (child, software) in [("miniCRAN", "minicran"), ("pypi", "python-libraries")] {
            if !ods_dir.join(child).is_dir() {
                ui.warning(&format!("{} not found in {}", child, ods_dir.display()));
                ui.show_hint(&format!(
                    "Run `offlinedatasci install {} {}` to build it",
                    software,
                    ods_dir.display()
                ));
            }
        }

        let report = mirror::activate(&self.paths, &ods_dir)?;
        ui.success(&format!(
            "CRAN mirror {} in {}",
            report.cran,
            self.paths.rprofile.display()
        ));
        ui.success(&format!(
            "PyPI mirror {} in {}",
            report.pypi,
            self.paths.pip_conf.display()
        ));

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn command(home: &TempDir, ods: &std::path::Path) -> ActivateCommand {
        ActivateCommand::new(
            ActivateArgs {
                ods_dir: Some(ods.to_path_buf()),
            },
            Settings::default(),
            MirrorPaths::from_home(home.path()),
        )
    }

    #[test]
    fn activates_both_mirrors() {
        let home = TempDir::new().unwrap();
        let ods = home.path().join("ods");
        fs::create_dir_all(ods.join("miniCRAN")).unwrap();
        fs::create_dir_all(ods.join("pypi")).unwrap();
        let mut ui = MockUI::new();

        let result = command(&home, &ods).execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_success("CRAN mirror added"));
        assert!(ui.has_success("PyPI mirror added"));
        assert!(ui.warnings().is_empty());
        let rprofile = fs::read_to_string(home.path().join(".Rprofile")).unwrap();
        assert!(rprofile.contains("miniCRAN"));
        assert!(home.path().join(".config/pip/pip.conf").is_file());
    }

    #[test]
    fn second_activation_reports_already_active() {
        let home = TempDir::new().unwrap();
        let ods = home.path().join("ods");
        let cmd = command(&home, &ods);
        cmd.execute(&mut MockUI::new()).unwrap();

        let mut ui = MockUI::new();
        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_success("CRAN mirror already active"));
        assert!(ui.has_success("PyPI mirror already active"));
    }

    #[test]
    fn warns_about_missing_mirrors() {
        let home = TempDir::new().unwrap();
        let ods = home.path().join("empty");
        let mut ui = MockUI::new();

        command(&home, &ods).execute(&mut ui).unwrap();

        assert!(ui.has_warning("miniCRAN not found"));
        assert!(ui.has_warning("pypi not found"));
        assert_eq!(ui.hints().len(), 2);
    }
}
