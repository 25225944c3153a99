//! HYV meet event file reader and writer.
//!
//! An HYV file defines the events of a meet. The first line is the meet
//! header, sealed with a checksum token; every following line is one event
//! with 18 semicolon-separated fields.
//!
//! # Example
//!
//! ```
//! use hytek_hyv::{HyvEvent, QualifyingStandard, encode_hyv, parse_hyv};
//! use hytek_model::Stroke;
//!
//! let text = "Winter Gala;01/10/2026;01/11/2026;12/31/2025;L;Galway;;;;;2066n\n";
//! let mut doc = parse_hyv(text).unwrap();
//! doc.add_events(
//!     &HyvEvent::new("1", Stroke::Freestyle, 50),
//!     &[QualifyingStandard::ages(0, 10), QualifyingStandard::ages(11, 0)],
//! );
//!
//! let back = parse_hyv(&encode_hyv(&doc)).unwrap();
//! assert_eq!(back.events[1].number, "1B");
//! assert_eq!(back.events[1].max_age, 109);
//! ```

pub mod checksum;
mod document;
mod error;
mod options;
mod reader;
mod writer;

pub use error::{HyvError, Result};

pub use document::{
    DATE_FORMAT, EVENT_FIELDS, HEADER_FIELDS, HyvDocument, HyvEvent, HyvHeader,
    QualifyingStandard,
};

pub use options::HyvReaderOptions;

pub use reader::{
    HyvReader, parse_hyv, parse_hyv_with_options, read_hyv, read_hyv_with_options,
};

pub use writer::{HyvWriter, LINE_ENDING, encode_hyv, write_hyv};
