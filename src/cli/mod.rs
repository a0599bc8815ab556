//! CLI module for filterq
//!
//! Provides command-line access to:
//! - compile: Query text to JSON filter list
//! - render: JSON filter list to query text
//! - suggest: Completions for the line being typed
//! - catalog: Available fields and constraints
//! - default-filter: Row a new filter starts with

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{catalog, compile, default_filter, render, run, run_command, suggest};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_input, write_diagnostics, write_response, write_text};
