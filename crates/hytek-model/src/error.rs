//! Error types for value parsing.

use thiserror::Error;

/// Errors raised when text cannot be converted into a model value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Text is not a valid race time.
    #[error("invalid time: {text:?}")]
    InvalidTime { text: String },

    /// Text is not a valid duration literal.
    #[error("invalid duration {text:?}: {message}")]
    InvalidDuration { text: String, message: String },

    /// Text is not a known code for the given table.
    #[error("invalid {kind} code: {code:?}")]
    InvalidCode { kind: &'static str, code: String },
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

impl ModelError {
    /// Create an InvalidTime error.
    pub fn invalid_time(text: impl Into<String>) -> Self {
        Self::InvalidTime { text: text.into() }
    }

    /// Create an InvalidDuration error.
    pub fn invalid_duration(text: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDuration {
            text: text.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidCode error.
    pub fn invalid_code(kind: &'static str, code: impl Into<String>) -> Self {
        Self::InvalidCode {
            kind,
            code: code.into(),
        }
    }
}
