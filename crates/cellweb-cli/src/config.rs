//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/cellweb/config.toml` by default. A missing file means defaults.

use std::path::{Path, PathBuf};

use cellweb_core::tracing::parse_level;
use cellweb_core::{TracingConfig, TracingOutputFormat};
use cellweb_protocol::DataFormat;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Configuration for the cellweb CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Debug mode.
    pub debug: bool,

    /// Output settings.
    pub output: OutputSettings,

    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Output settings for encoded values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Pretty-print JSON output.
    pub pretty: bool,

    /// Display mode passed to the encoder.
    pub data_format: DataFormat,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    pub level: String,

    /// Log line format.
    pub format: TracingOutputFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: TracingOutputFormat::Compact,
        }
    }
}

impl CliConfig {
    /// Loads configuration from the default path.
    pub fn load() -> CliResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cellweb")
            .join("config.toml")
    }

    /// Builds the tracing setup, with `debug` forcing debug output.
    pub fn tracing_config(&self, debug: bool) -> CliResult<TracingConfig> {
        if debug || self.debug {
            return Ok(TracingConfig::debug().with_format(self.logging.format));
        }
        let level = parse_level(&self.logging.level)
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(TracingConfig::default()
            .with_level(level)
            .with_format(self.logging.format))
    }
}
