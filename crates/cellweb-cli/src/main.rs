//! cellweb CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use cellweb_cli::cli::{Cli, Command, ConfigAction};
use cellweb_cli::commands;
use cellweb_cli::config::CliConfig;
use cellweb_cli::error::CliResult;
use cellweb_core::init_tracing;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config_path = cli.config.clone().unwrap_or_else(CliConfig::default_path);
    let config = if cli.config.is_some() {
        CliConfig::load_from(&config_path)?
    } else {
        CliConfig::load()?
    };

    init_tracing(config.tracing_config(cli.debug)?)?;
    tracing::debug!(path = %config_path.display(), "configuration loaded");

    let options = cli.output_options(&config);
    match cli.command {
        Command::Encode { ref file } => commands::encode::run(file, options),
        Command::Decode { ref file } => commands::decode::run(file, options),
        Command::Config { ref action } => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Path => commands::config::path(&config_path),
        },
    }
}
