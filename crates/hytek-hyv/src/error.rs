//! Error types for HYV file operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading or writing HYV files.
#[derive(Debug, Error)]
pub enum HyvError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A field's text cannot be converted to its value type.
    #[error("line {line}: invalid {field} {raw:?}: {message}")]
    FieldDecode {
        line: usize,
        field: &'static str,
        raw: String,
        message: String,
    },

    /// A line is missing or has fewer fields than its record needs.
    #[error("line {line}: {message}")]
    Structural { line: usize, message: String },

    /// The header checksum token disagrees with the header fields.
    #[error("line {line}: checksum mismatch, expected {expected:?} found {found:?}")]
    ChecksumMismatch {
        line: usize,
        expected: String,
        found: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for HYV operations.
pub type Result<T> = std::result::Result<T, HyvError>;

impl HyvError {
    /// Create a FieldDecode error.
    pub fn field_decode(
        line: usize,
        field: &'static str,
        raw: impl Into<String>,
        message: impl ToString,
    ) -> Self {
        Self::FieldDecode {
            line,
            field,
            raw: raw.into(),
            message: message.to_string(),
        }
    }

    /// Create a Structural error.
    pub fn structural(line: usize, message: impl Into<String>) -> Self {
        Self::Structural {
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HyvError::structural(3, "expected 18 fields, found 12");
        assert_eq!(format!("{err}"), "line 3: expected 18 fields, found 12");

        let err = HyvError::field_decode(1, "start date", "13/01/2025", "input is out of range");
        assert_eq!(
            format!("{err}"),
            "line 1: invalid start date \"13/01/2025\": input is out of range"
        );
    }
}
