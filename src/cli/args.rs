//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::error::{OdsError, Result};
use crate::install::Task;

/// Environment variable naming the ods directory.
pub const ODS_DIR_ENV: &str = "OFFLINEDATASCI_DIR";

/// offlinedatasci - Offline mirrors for data science workshops.
#[derive(Debug, Parser)]
#[command(name = "offlinedatasci")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to settings file (overrides ~/.offlinedatasci/config.yml)
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// Show verbose output, including wget, Rscript and pip3 output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download installers, lessons and package mirrors
    Install(InstallArgs),

    /// Point R and pip at the local mirrors
    Activate(ActivateArgs),

    /// Stop using the local mirrors
    Deactivate,

    /// Show whether the local mirrors are active
    Status(StatusArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Software that `install` can download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Software {
    /// Everything below
    All,
    /// R installers
    R,
    /// RStudio installers
    Rstudio,
    /// Python installers
    Python,
    /// Carpentries lesson websites
    Lessons,
    /// Partial CRAN mirror
    Minicran,
    /// Partial PyPI mirror
    PythonLibraries,
}

impl Software {
    /// Tasks this selection runs.
    pub fn tasks(self) -> Vec<Task> {
        match self {
            Software::All => Task::all().to_vec(),
            Software::R => vec![Task::R],
            Software::Rstudio => vec![Task::RStudio],
            Software::Python => vec![Task::Python],
            Software::Lessons => vec![Task::Lessons],
            Software::Minicran => vec![Task::MiniCran],
            Software::PythonLibraries => vec![Task::PythonLibraries],
        }
    }
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Software to download (all, r, rstudio, python, lessons, minicran,
    /// python-libraries), optionally followed by the ods directory
    #[arg(required = true, num_args = 1.., value_name = "SOFTWARE... [ODS_DIR]")]
    pub targets: Vec<String>,

    /// Directory to download into
    #[arg(long, env = ODS_DIR_ENV)]
    pub ods_dir: Option<PathBuf>,

    /// R packages or collections for miniCRAN (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub r_packages: Vec<String>,

    /// Python packages or collections for the PyPI mirror (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub py_packages: Vec<String>,

    /// R release to build miniCRAN for (e.g. R-4.4.1)
    #[arg(long)]
    pub r_version: Option<String>,

    /// Python version wheels are downloaded for
    #[arg(long)]
    pub python_version: Option<String>,
}

impl InstallArgs {
    /// Split the positional arguments into tasks and an optional trailing
    /// ods directory.
    ///
    /// Tasks keep first-seen order without duplicates. The last argument is
    /// taken as the directory when it is not a software name and follows at
    /// least one.
    pub fn selection(&self) -> Result<(Vec<Task>, Option<PathBuf>)> {
        let mut names: &[String] = &self.targets;
        let mut ods_dir = None;
        if let Some((last, rest)) = self.targets.split_last() {
            if !rest.is_empty() && Software::from_str(last, true).is_err() {
                ods_dir = Some(PathBuf::from(last));
                names = rest;
            }
        }

        let mut tasks: Vec<Task> = Vec::new();
        for name in names {
            let software = Software::from_str(name, true)
                .map_err(|_| OdsError::Other(anyhow::anyhow!("Unknown software '{}'", name)))?;
            for task in software.tasks() {
                if !tasks.contains(&task) {
                    tasks.push(task);
                }
            }
        }
        Ok((tasks, ods_dir))
    }
}

/// Arguments for the `activate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ActivateArgs {
    /// Directory holding the miniCRAN and pypi mirrors
    #[arg(env = ODS_DIR_ENV)]
    pub ods_dir: Option<PathBuf>,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
