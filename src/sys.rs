//! External tool lookup and invocation.
//!
//! Lessons and package mirrors are built by external programs (`wget`,
//! `Rscript`, `pip3`). This module finds them on `PATH` and runs them,
//! turning a non-zero exit into [`OdsError::CommandFailed`].

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{OdsError, Result};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Resolve a tool's binary path by iterating over PATH entries.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let names: Vec<String> = if cfg!(windows) {
        vec![format!("{}.exe", tool), tool.to_string()]
    } else {
        vec![tool.to_string()]
    };

    path_entries.iter().find_map(|dir| {
        names
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file() && is_executable(candidate))
    })
}

/// Find `tool` on the system PATH.
pub fn which(tool: &str) -> Option<PathBuf> {
    resolve_tool_path(tool, &parse_system_path())
}

/// How to treat the child's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputPolicy {
    /// Pass output through to the terminal.
    #[default]
    Inherit,
    /// Discard stdout and stderr.
    Discard,
}

/// Run `program` with `args` and wait for it.
///
/// # Errors
///
/// Returns `OdsError::Io` if the program cannot be started and
/// `OdsError::CommandFailed` if it exits unsuccessfully.
pub fn run<I, S>(program: &str, args: I, output: OutputPolicy) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<S> = args.into_iter().collect();
    let command_line = std::iter::once(program.to_string())
        .chain(args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()))
        .collect::<Vec<_>>()
        .join(" ");

    let mut cmd = Command::new(program);
    cmd.args(&args);
    if output == OutputPolicy::Discard {
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
    }

    tracing::debug!("Running: {}", command_line);
    let status = cmd.status()?;

    if status.success() {
        Ok(())
    } else {
        Err(OdsError::CommandFailed {
            command: command_line,
            code: status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn create_fake_binary(path: &Path) {
        use std::os::unix::fs::PermissionsExt;
        std::fs::write(path, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn resolves_executable_in_path_entries() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        create_fake_binary(&bin.join("wget"));

        let found = resolve_tool_path("wget", &[temp.path().to_path_buf(), bin.clone()]);

        assert_eq!(found, Some(bin.join("wget")));
    }

    #[cfg(unix)]
    #[test]
    fn skips_non_executable_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("Rscript"), "not executable").unwrap();

        assert!(resolve_tool_path("Rscript", &[temp.path().to_path_buf()]).is_none());
    }

    #[test]
    fn missing_tool_is_none() {
        assert!(which("this-command-does-not-exist-12345").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn run_reports_exit_code() {
        let err = run("sh", ["-c", "exit 3"], OutputPolicy::Discard).unwrap_err();
        match err {
            OdsError::CommandFailed { command, code } => {
                assert_eq!(command, "sh -c exit 3");
                assert_eq!(code, Some(3));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn run_succeeds() {
        assert!(run("sh", ["-c", "true"], OutputPolicy::Inherit).is_ok());
    }

    #[test]
    fn run_missing_program_is_io_error() {
        let result = run(
            "this-command-does-not-exist-12345",
            Vec::<String>::new(),
            OutputPolicy::Discard,
        );
        assert!(matches!(result, Err(OdsError::Io(_))));
    }
}
