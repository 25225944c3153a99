//! HYV file reader.
//!
//! The first line is the meet header; every following non-blank line is an
//! event. Any failing line aborts the parse.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::checksum::line_checksum;
use crate::document::{HEADER_FIELDS, HyvDocument, HyvEvent, HyvHeader};
use crate::error::{HyvError, Result};
use crate::options::HyvReaderOptions;

/// HYV file reader.
pub struct HyvReader<R: Read> {
    reader: BufReader<R>,
    options: HyvReaderOptions,
}

impl<R: Read> HyvReader<R> {
    /// Create a new HYV reader.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, HyvReaderOptions::default())
    }

    /// Create a new HYV reader with options.
    pub fn with_options(reader: R, options: HyvReaderOptions) -> Self {
        Self {
            reader: BufReader::new(reader),
            options,
        }
    }

    /// Read the whole input and parse it.
    pub fn read_document(mut self) -> Result<HyvDocument> {
        let mut text = String::new();
        self.reader.read_to_string(&mut text)?;
        parse_hyv_with_options(&text, &self.options)
    }
}

impl HyvReader<File> {
    /// Open an HYV file for reading.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_options(path, HyvReaderOptions::default())
    }

    /// Open an HYV file with options.
    pub fn open_with_options(path: &Path, options: HyvReaderOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HyvError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                HyvError::Io(e)
            }
        })?;
        Ok(Self::with_options(file, options))
    }
}

/// Read an HYV file from a path.
pub fn read_hyv(path: &Path) -> Result<HyvDocument> {
    read_hyv_with_options(path, HyvReaderOptions::default())
}

/// Read an HYV file with options.
pub fn read_hyv_with_options(path: &Path, options: HyvReaderOptions) -> Result<HyvDocument> {
    let document = HyvReader::open_with_options(path, options)?.read_document()?;
    tracing::debug!(path = %path.display(), events = document.events.len(), "read HYV file");
    Ok(document)
}

/// Parse HYV text with default options.
pub fn parse_hyv(text: &str) -> Result<HyvDocument> {
    parse_hyv_with_options(text, &HyvReaderOptions::default())
}

/// Parse HYV text with options.
pub fn parse_hyv_with_options(text: &str, options: &HyvReaderOptions) -> Result<HyvDocument> {
    let mut lines = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(|(index, line)| (index + 1, line));

    let Some((_, first)) = lines.next().filter(|(_, line)| !line.is_empty()) else {
        return Err(HyvError::structural(1, "missing meet header"));
    };
    let fields: Vec<&str> = first.split(';').collect();
    let header = HyvHeader::from_fields(&fields, 1)?;
    if options.strict_checksums {
        verify_header(&fields)?;
    }

    let mut document = HyvDocument::new(header);
    for (number, line) in lines {
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(';').collect();
        let event = HyvEvent::from_fields(&fields, number)?;
        tracing::trace!(line = number, event = %event.number, "parsed event");
        document.events.push(event);
    }

    tracing::debug!(events = document.events.len(), "parsed HYV document");
    Ok(document)
}

fn verify_header(fields: &[&str]) -> Result<()> {
    let expected = line_checksum(&fields[..HEADER_FIELDS].join(";"));
    // the token may itself contain a separator
    let found = fields[HEADER_FIELDS..].join(";");
    if found == expected {
        Ok(())
    } else {
        Err(HyvError::ChecksumMismatch {
            line: 1,
            expected,
            found,
        })
    }
}
