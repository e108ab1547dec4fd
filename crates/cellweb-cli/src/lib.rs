//! CLI, configuration, fixture loading
//!
//! This crate provides the `cellweb` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fixture;

pub use cli::Cli;
pub use error::{CliError, CliResult};
