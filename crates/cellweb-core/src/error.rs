//! Error types for driver capability calls.
//!
//! Every capability the codec calls into (document serialization, content
//! extraction, geometry reprojection) reports failures as a [`DriverError`].

use std::fmt;
use thiserror::Error;

/// The category of a driver error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverErrorCode {
    /// Reading or writing the value's bytes failed.
    Io,
    /// The session canceled the operation through its progress monitor.
    Canceled,
    /// The driver reached an unexpected internal state.
    Internal,
    /// The driver cannot perform the requested conversion.
    Unsupported,
}

impl DriverErrorCode {
    /// Returns a stable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Io => "io",
            Self::Canceled => "canceled",
            Self::Internal => "internal",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for DriverErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error raised by a driver capability.
#[derive(Debug, Error)]
pub struct DriverError {
    code: DriverErrorCode,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl DriverError {
    /// Creates a new driver error with the given code and message.
    pub fn new(code: DriverErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(DriverErrorCode::Io, message)
    }

    /// Creates a cancellation error.
    pub fn canceled() -> Self {
        Self::new(DriverErrorCode::Canceled, "operation canceled")
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(DriverErrorCode::Internal, message)
    }

    /// Creates an unsupported-conversion error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(DriverErrorCode::Unsupported, message)
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> DriverErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if the session canceled the operation.
    pub fn is_canceled(&self) -> bool {
        self.code == DriverErrorCode::Canceled
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl From<std::io::Error> for DriverError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string()).with_source(err)
    }
}

/// A specialized Result type for driver capability calls.
pub type DriverResult<T> = Result<T, DriverError>;
