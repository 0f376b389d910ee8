//! CLI module for rollbook
//!
//! Provides command-line interface for:
//! - serve: connect to the record store and serve the student API
//! - list: print stored students as JSON

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{connect_store, list, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
