//! Subcommand implementations.

pub mod config;
pub mod decode;
pub mod encode;

use serde_json::Value;

use crate::error::CliResult;

/// Renders a JSON value for stdout.
pub fn render_json(value: &Value, pretty: bool) -> CliResult<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}
