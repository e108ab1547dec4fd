//! Decode command.

use std::path::Path;

use cellweb_protocol::decode_row;
use serde_json::Value;
use tracing::info;

use crate::cli::OutputOptions;
use crate::error::{CliError, CliResult};

/// Decode the edit values stored at `file` and print the plain values.
pub fn run(file: &Path, options: OutputOptions) -> CliResult<()> {
    let content = std::fs::read_to_string(file)?;
    let decoded = decode_edits(&content)?;
    println!("{}", super::render_json(&decoded, options.pretty)?);
    Ok(())
}

/// Decodes a JSON array of submitted edit values.
pub fn decode_edits(content: &str) -> CliResult<Value> {
    let values = match serde_json::from_str::<Value>(content)? {
        Value::Array(values) => values,
        _ => {
            return Err(CliError::Fixture(
                "expected a JSON array of edit values".to_string(),
            ));
        }
    };
    let decoded = decode_row(values)?;
    info!(values = decoded.len(), "decoded edits");
    Ok(Value::Array(decoded))
}
