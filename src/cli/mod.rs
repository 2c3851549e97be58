//! CLI module for usermgmt
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP API (the default with no subcommand)
//! - init: Create the users table

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
