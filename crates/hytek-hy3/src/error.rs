//! Error types for HY3 file operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading or writing HY3 files.
#[derive(Debug, Error)]
pub enum Hy3Error {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A field's text cannot be converted to its value type.
    #[error("line {line} ({record}): invalid {field} {raw:?}: {message}")]
    FieldDecode {
        line: usize,
        record: &'static str,
        field: &'static str,
        raw: String,
        message: String,
    },

    /// A value does not fit its fixed-width field.
    #[error("{record}: {field} value {value:?} does not fit in {width} columns")]
    FieldEncode {
        record: &'static str,
        field: &'static str,
        value: String,
        width: usize,
    },

    /// A record arrived without its required parent record.
    #[error("line {line} ({tag}): {message}")]
    Structural {
        line: usize,
        tag: String,
        message: String,
    },

    /// Stored checksum digits disagree with the line content.
    #[error("line {line}: checksum mismatch, expected {expected} found {found:?}")]
    ChecksumMismatch {
        line: usize,
        expected: String,
        found: String,
    },

    /// A record codec asked for a field its layout does not define.
    #[error("layout {record} has no field {field}")]
    UnknownField {
        record: &'static str,
        field: &'static str,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for HY3 operations.
pub type Result<T> = std::result::Result<T, Hy3Error>;

impl Hy3Error {
    /// Create a Structural error.
    pub fn structural(line: usize, tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Structural {
            line,
            tag: tag.into(),
            message: message.into(),
        }
    }

    /// Line number the error refers to, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::FieldDecode { line, .. }
            | Self::Structural { line, .. }
            | Self::ChecksumMismatch { line, .. } => Some(*line),
            _ => None,
        }
    }
}
