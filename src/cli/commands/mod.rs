//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads settings,
//! resolves the managed config file locations and routes each subcommand to
//! its implementation.

pub mod activate;
pub mod completions;
pub mod deactivate;
pub mod dispatcher;
pub mod install;
pub mod status;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
