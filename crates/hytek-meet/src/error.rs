//! Error types for meet operations.

use hytek_hy3::{EntryRef, Hy3Error};
use hytek_hyv::HyvError;
use hytek_model::Stroke;
use thiserror::Error;

/// Errors raised while assembling, seeding or updating a meet.
#[derive(Debug, Error)]
pub enum MeetError {
    /// An HY3 entry names an event the meet does not define.
    #[error("unknown event number {number:?} (entry of {swimmer})")]
    UnknownEvent { number: String, swimmer: String },

    /// A result names a stroke and distance no event covers.
    #[error("no {distance}m {stroke} event for result of swimmer {swimmer:?}")]
    UnmatchedResult {
        swimmer: String,
        stroke: Stroke,
        distance: u32,
    },

    /// A meet entry points at an entry the HY3 document no longer has.
    #[error("stale entry reference {at:?}")]
    StaleEntry { at: EntryRef },

    /// Heats need at least one lane.
    #[error("invalid lane count {lanes}")]
    InvalidLaneCount { lanes: u32 },

    #[error(transparent)]
    Hy3(#[from] Hy3Error),

    #[error(transparent)]
    Hyv(#[from] HyvError),
}

/// Result type alias for meet operations.
pub type Result<T> = std::result::Result<T, MeetError>;
