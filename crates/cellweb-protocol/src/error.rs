//! Codec error types.

use std::fmt;

use cellweb_core::DriverError;
use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// What a rejected edit tried to change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditSubject {
    /// A content value carrying binary data.
    BinaryContent,
    /// An envelope of the given discriminator.
    Type(String),
}

impl fmt::Display for EditSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BinaryContent => write!(f, "binary content"),
            Self::Type(value_type) => write!(f, "type '{}'", value_type),
        }
    }
}

/// Errors that can occur while encoding or decoding cell values.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A driver capability failed while producing a document or content value.
    #[error("{message}: {source}")]
    Serialization {
        message: String,
        #[source]
        source: DriverError,
    },

    /// The client submitted an edit the codec cannot turn back into a value.
    #[error("{0} edit is not supported yet")]
    UnsupportedEdit(EditSubject),

    /// A cell of a row batch failed.
    #[error("cell {index}: {source}")]
    Row {
        index: usize,
        #[source]
        source: Box<CodecError>,
    },
}

impl CodecError {
    /// Creates a serialization error wrapping a driver failure.
    pub fn serialization(message: impl Into<String>, source: DriverError) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Creates an unsupported-edit error for an envelope discriminator.
    pub fn unsupported_type(value_type: impl Into<String>) -> Self {
        Self::UnsupportedEdit(EditSubject::Type(value_type.into()))
    }

    /// Creates an unsupported-edit error for binary content.
    pub fn unsupported_binary() -> Self {
        Self::UnsupportedEdit(EditSubject::BinaryContent)
    }

    /// Wraps an error with the index of the cell that produced it.
    pub fn at_index(self, index: usize) -> Self {
        Self::Row {
            index,
            source: Box::new(self),
        }
    }

    /// Returns true if the failure was caused by session cancellation.
    pub fn is_canceled(&self) -> bool {
        match self {
            Self::Serialization { source, .. } => source.is_canceled(),
            Self::Row { source, .. } => source.is_canceled(),
            Self::UnsupportedEdit(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_edit_messages() {
        assert_eq!(
            CodecError::unsupported_binary().to_string(),
            "binary content edit is not supported yet"
        );
        assert_eq!(
            CodecError::unsupported_type("geometry").to_string(),
            "type 'geometry' edit is not supported yet"
        );
    }

    #[test]
    fn serialization_keeps_cause() {
        use std::error::Error;
        let err = CodecError::serialization("error serializing document", DriverError::io("eof"));
        assert_eq!(err.to_string(), "error serializing document: io: eof");
        assert!(err.source().is_some());
        assert!(!err.is_canceled());
    }

    #[test]
    fn row_error_reports_index() {
        let err = CodecError::unsupported_type("map").at_index(3);
        assert_eq!(err.to_string(), "cell 3: type 'map' edit is not supported yet");
    }

    #[test]
    fn cancellation_is_detected_through_rows() {
        let err = CodecError::serialization("error reading content", DriverError::canceled())
            .at_index(0);
        assert!(err.is_canceled());
    }
}
