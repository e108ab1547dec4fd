//! Command-line interface definition.

use std::path::PathBuf;

use cellweb_protocol::DataFormat;
use clap::{Parser, Subcommand};

use crate::config::CliConfig;

/// cellweb - Encode database cell values for the web and decode edits back
#[derive(Debug, Parser)]
#[command(name = "cellweb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "CELLWEB_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Display mode passed to the encoder (resultset or document)
    #[arg(long, global = true)]
    pub format: Option<DataFormat>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Resolves output options, letting flags override the config file.
    pub fn output_options(&self, config: &CliConfig) -> OutputOptions {
        OutputOptions {
            pretty: self.pretty || config.output.pretty,
            format: self.format.unwrap_or(config.output.data_format),
        }
    }
}

/// Effective output options for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    pub pretty: bool,
    pub format: DataFormat,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encode the rows of a fixture file into web values
    Encode {
        /// JSON fixture with `columns` and `rows`
        file: PathBuf,
    },

    /// Decode a JSON array of submitted edit values into plain values
    Decode {
        /// JSON file holding an array of edit values
        file: PathBuf,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Show configuration file path
    Path,
}
