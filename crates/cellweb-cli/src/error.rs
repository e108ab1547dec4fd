//! CLI error types.

use cellweb_core::TracingError;
use cellweb_protocol::CodecError;
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed fixture file.
    #[error("invalid fixture: {0}")]
    Fixture(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON input or output error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A row of a fixture failed to encode.
    #[error("row {index}: {source}")]
    Row { index: usize, source: CodecError },

    /// Encode or decode failure.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Logging setup failure.
    #[error(transparent)]
    Tracing(#[from] TracingError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_errors_display_unwrapped() {
        let err = CliError::from(CodecError::unsupported_binary().at_index(1));
        assert_eq!(err.to_string(), "cell 1: binary content edit is not supported yet");
    }

    #[test]
    fn row_errors_name_row_and_cell() {
        let err = CliError::Row {
            index: 3,
            source: CodecError::unsupported_type("map").at_index(1),
        };
        assert_eq!(err.to_string(), "row 3: cell 1: type 'map' edit is not supported yet");
    }

    #[test]
    fn config_error_display() {
        let err = CliError::Config("bad level".into());
        assert_eq!(err.to_string(), "configuration error: bad level");
    }
}
