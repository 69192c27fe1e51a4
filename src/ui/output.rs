//! Output mode.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show everything, including the output of external tools.
    Verbose,
    /// Show progress, status and hints.
    #[default]
    Normal,
    /// Show spinners and final status only.
    Quiet,
}

impl OutputMode {
    /// Pick the mode from the global `--quiet` / `--verbose` flags.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows informational messages and hints.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if wget, Rscript and pip3 may write to the terminal.
    pub fn shows_tool_output(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}
