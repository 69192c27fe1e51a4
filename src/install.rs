//! Batch population of the ods directory.
//!
//! An [`Installer`] runs a list of [`Task`]s in order. A task that fails is
//! recorded in the [`InstallReport`] and the remaining tasks still run.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::Settings;
use crate::download::{self, Sources};
use crate::error::{OdsError, Result};
use crate::fetch::HttpFetcher;
use crate::packages::{package_selection, Language};
use crate::sys::{self, OutputPolicy};

/// One kind of content placed in the ods directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    R,
    RStudio,
    Python,
    Lessons,
    MiniCran,
    PythonLibraries,
}

impl Task {
    /// Every task, in the order `all` runs them.
    pub fn all() -> &'static [Task] {
        &[
            Task::R,
            Task::RStudio,
            Task::Python,
            Task::Lessons,
            Task::MiniCran,
            Task::PythonLibraries,
        ]
    }

    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Task::R => "r",
            Task::RStudio => "rstudio",
            Task::Python => "python",
            Task::Lessons => "lessons",
            Task::MiniCran => "minicran",
            Task::PythonLibraries => "python-libraries",
        }
    }

    /// External program the task needs, if any.
    pub fn required_tool(self) -> Option<&'static str> {
        match self {
            Task::Lessons => Some("wget"),
            Task::MiniCran => Some("Rscript"),
            Task::PythonLibraries => Some("pip3"),
            Task::R | Task::RStudio | Task::Python => None,
        }
    }

    /// How to get the required tool.
    pub fn install_hint(self) -> Option<&'static str> {
        match self {
            Task::Lessons => Some(
                "install wget (macOS: Xcode command line tools or `conda install wget -c conda-forge`; \
                 Windows: https://eternallybored.org/misc/wget/)",
            ),
            Task::MiniCran => Some("install R from https://cloud.r-project.org/"),
            Task::PythonLibraries => Some("install Python 3 with pip from https://www.python.org/"),
            Task::R | Task::RStudio | Task::Python => None,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Task::R => "R",
            Task::RStudio => "RStudio",
            Task::Python => "Python",
            Task::Lessons => "Lessons",
            Task::MiniCran => "miniCRAN",
            Task::PythonLibraries => "Python libraries",
        };
        f.write_str(label)
    }
}

impl FromStr for Task {
    type Err = OdsError;

    fn from_str(s: &str) -> Result<Self> {
        Task::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| OdsError::Other(anyhow::anyhow!("Unknown software '{}'", s)))
    }
}

/// How a task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// Finished; the detail says what was produced.
    Completed(String),
    /// Not attempted, with the reason.
    Skipped(String),
    /// Aborted with an error message.
    Failed(String),
}

/// Result of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub task: Task,
    pub status: TaskStatus,
}

impl TaskOutcome {
    /// Error message if the task failed.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            TaskStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Outcomes of a batch, in run order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub outcomes: Vec<TaskOutcome>,
}

impl InstallReport {
    /// True when no task failed.
    pub fn success(&self) -> bool {
        self.outcomes.iter().all(|o| o.error().is_none())
    }

    /// Outcomes of failed tasks.
    pub fn failures(&self) -> Vec<&TaskOutcome> {
        self.outcomes.iter().filter(|o| o.error().is_some()).collect()
    }
}

/// Run `tasks` in order through `run`, recording every outcome.
///
/// An `Err` from `run` becomes [`TaskStatus::Failed`] and the batch goes on.
pub fn run_tasks<F>(tasks: &[Task], mut run: F) -> InstallReport
where
    F: FnMut(Task) -> Result<TaskStatus>,
{
    let mut report = InstallReport::default();
    for &task in tasks {
        let status = match run(task) {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!("{} failed: {}", task, e);
                TaskStatus::Failed(e.to_string())
            }
        };
        report.outcomes.push(TaskOutcome { task, status });
    }
    report
}

/// Everything the tasks need to know.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub ods_dir: PathBuf,
    /// R package collections or names.
    pub r_packages: Vec<String>,
    /// Python package collections or names.
    pub python_packages: Vec<String>,
    /// R release for miniCRAN; discovered when `None`.
    pub r_version: Option<String>,
    pub python_version: String,
    pub python_platforms: Vec<String>,
    pub sources: Sources,
    /// Where wget, Rscript and pip3 output goes.
    pub tool_output: OutputPolicy,
}

impl InstallOptions {
    /// Options from settings for `ods_dir`.
    pub fn from_settings(settings: &Settings, ods_dir: PathBuf) -> Self {
        Self {
            ods_dir,
            r_packages: settings.r_packages.clone(),
            python_packages: settings.python_packages.clone(),
            r_version: settings.r_version.clone(),
            python_version: settings.python_version.clone(),
            python_platforms: settings.python_platforms.clone(),
            sources: Sources::default(),
            tool_output: OutputPolicy::Discard,
        }
    }
}

/// Runs download tasks against one ods directory.
pub struct Installer {
    options: InstallOptions,
    fetcher: HttpFetcher,
}

fn file_count(files: &[PathBuf]) -> String {
    match files.len() {
        1 => "1 file".to_string(),
        n => format!("{} files", n),
    }
}

impl Installer {
    pub fn new(options: InstallOptions) -> Result<Self> {
        Ok(Self {
            options,
            fetcher: HttpFetcher::new()?,
        })
    }

    /// Create the ods directory (with parents) if it does not exist.
    pub fn prepare(&self) -> Result<&Path> {
        let dir = &self.options.ods_dir;
        if !dir.is_dir() {
            tracing::info!("Creating ods directory {}", dir.display());
            fs::create_dir_all(dir)?;
        }
        Ok(dir)
    }

    /// Run one task.
    ///
    /// A task whose external tool is not on `PATH` is skipped with a warning.
    pub fn run_task(&self, task: Task) -> Result<TaskStatus> {
        let tool = match task.required_tool() {
            Some(name) => match sys::which(name) {
                Some(path) => Some(path),
                None => {
                    let hint = task.install_hint().unwrap_or_default();
                    tracing::warn!("{} not found, skipping {}: {}", name, task, hint);
                    return Ok(TaskStatus::Skipped(format!("{} not found; {}", name, hint)));
                }
            },
            None => None,
        };
        self.run_with_tool(task, tool.as_deref())
    }

    fn run_with_tool(&self, task: Task, tool: Option<&Path>) -> Result<TaskStatus> {
        let opts = &self.options;
        let ods = opts.ods_dir.as_path();
        let resolved_tool = || {
            tool.ok_or_else(|| OdsError::Other(anyhow::anyhow!("No tool resolved for {}", task)))
        };

        let detail = match task {
            Task::R => file_count(&download::r::download_r(&self.fetcher, &opts.sources, ods)?),
            Task::RStudio => file_count(&download::rstudio::download_rstudio(
                &self.fetcher,
                &opts.sources,
                ods,
            )?),
            Task::Python => file_count(&download::python::download_python(
                &self.fetcher,
                &opts.sources,
                ods,
            )?),
            Task::Lessons => {
                let index =
                    download::lessons::download_lessons(resolved_tool()?, ods, opts.tool_output)?;
                index.display().to_string()
            }
            Task::MiniCran => {
                let packages = package_selection(Language::R, &opts.r_packages);
                let version = download::minicran::resolve_r_version(
                    &self.fetcher,
                    &opts.sources,
                    opts.r_version.as_deref(),
                )?;
                let dir = download::minicran::download_minicran(
                    resolved_tool()?,
                    ods,
                    &packages,
                    &version,
                    opts.tool_output,
                )?;
                format!("{} packages for R {} in {}", packages.len(), version, dir.display())
            }
            Task::PythonLibraries => {
                let packages = package_selection(Language::Python, &opts.python_packages);
                let dir = download::pypi::download_python_libraries(
                    resolved_tool()?,
                    ods,
                    &packages,
                    &opts.python_version,
                    &opts.python_platforms,
                    opts.tool_output,
                )?;
                format!("{} packages in {}", packages.len(), dir.display())
            }
        };
        Ok(TaskStatus::Completed(detail))
    }

    /// Prepare the ods directory and run `tasks`.
    pub fn run(&self, tasks: &[Task]) -> Result<InstallReport> {
        self.prepare()?;
        Ok(run_tasks(tasks, |task| self.run_task(task)))
    }
}
