//! Value types shared by the HY3 and HYV swim meet interchange formats.
//!
//! This crate holds the pieces both codecs agree on:
//!
//! - [`Time`]: race times with the `NT` / `SS.HH` / `M:SS.HH` display form
//!   and the fixed-width variants used inside HY3 records
//! - [`ReactionTime`]: touch-pad reaction times with their odd fixed-width rules
//! - [`duration`]: duration literals (`1m5.23s`) used by HYV event lines
//! - Code tables: [`Gender`], [`Stroke`], [`EventType`], [`Classification`],
//!   [`TimeCode`], [`Course`]
//!
//! # Example
//!
//! ```
//! use hytek_model::Time;
//!
//! let time: Time = "1:23.45".parse().unwrap();
//! assert_eq!(time.to_string(), "1:23.45");
//! assert_eq!(time.to_fixed(), "83.45");
//! assert_eq!(Time::ZERO.to_string(), "NT");
//! ```

mod codes;
pub mod duration;
mod error;
mod time;

pub use codes::{Classification, Course, EventType, Gender, Stroke, TimeCode};
pub use duration::{format_duration, parse_duration};
pub use error::{ModelError, Result};
pub use time::{ReactionTime, Time};

/// Age used as the ceiling of an open age group.
pub const OPEN_MAX_AGE: u32 = 109;
