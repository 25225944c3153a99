//! HY3 swim meet entry and result file reader and writer.
//!
//! HY3 files are sequences of 132-byte fixed-width lines. Each line starts
//! with a two-character tag naming its record type and ends with two
//! checksum digits and CR LF. Records nest implicitly by order: a team
//! record opens a team, swimmer records belong to the last team, entries to
//! the last swimmer and so on.
//!
//! # Features
//!
//! - Record layouts as plain data ([`layout`]) driving a generic field codec
//!   ([`codec`])
//! - Line checksums ([`checksum`]), generated on write and optionally
//!   verified on read ([`Hy3ReaderOptions::strict`])
//! - A typed document tree ([`Hy3Document`]) with structural validation
//!
//! # Example
//!
//! ```
//! use hytek_hy3::{Hy3Document, MeetInfo, encode_hy3, parse_hy3};
//!
//! let doc = Hy3Document {
//!     meet_info: Some(MeetInfo {
//!         name: "Winter Gala".to_string(),
//!         ..MeetInfo::default()
//!     }),
//!     ..Hy3Document::default()
//! };
//!
//! let bytes = encode_hy3(&doc).unwrap();
//! assert_eq!(bytes.len(), 132);
//!
//! let text: String = bytes.iter().map(|&b| char::from(b)).collect();
//! assert_eq!(parse_hy3(&text).unwrap(), doc);
//! ```

pub mod checksum;
pub mod codec;
mod document;
mod error;
pub mod layout;
mod options;
mod reader;
mod writer;

// Re-export error types
pub use error::{Hy3Error, Result};

// Re-export the document tree
pub use document::{
    DqDescription, EntryRef, FileDescriptor, Hy3Document, IndividualEntry, IndividualResult,
    MeetAddress, MeetContact, MeetInfo, Record, RelayEntry, RelayLeg, RelayLineUp, RelayResult,
    SplitTime, Splits, Swimmer, SwimmerInfo, Team, TeamAddress, TeamContact, TeamName,
};

pub use options::Hy3ReaderOptions;

// Re-export reader functionality
pub use reader::{
    Hy3Reader, parse_hy3, parse_hy3_bytes, parse_hy3_with_options, read_hy3,
    read_hy3_with_options,
};

// Re-export writer functionality
pub use writer::{Hy3Writer, encode_hy3, write_hy3};
