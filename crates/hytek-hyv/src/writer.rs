//! HYV file writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::document::HyvDocument;
use crate::error::Result;

/// Line terminator used on write.
pub const LINE_ENDING: &str = "\r\n";

/// HYV file writer.
pub struct HyvWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> HyvWriter<W> {
    /// Create a new HYV writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Write the sealed header followed by every event line.
    pub fn write_document(&mut self, doc: &HyvDocument) -> Result<()> {
        write!(self.writer, "{}{LINE_ENDING}", doc.header.to_line())?;
        for event in &doc.events {
            write!(self.writer, "{event}{LINE_ENDING}")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl HyvWriter<File> {
    /// Create an HYV file for writing.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(file))
    }
}

/// Encode a document as HYV text.
pub fn encode_hyv(doc: &HyvDocument) -> String {
    let mut text = doc.header.to_line();
    text.push_str(LINE_ENDING);
    for event in &doc.events {
        text.push_str(&event.to_line());
        text.push_str(LINE_ENDING);
    }
    text
}

/// Write a document to an HYV file.
pub fn write_hyv(path: &Path, doc: &HyvDocument) -> Result<()> {
    HyvWriter::create(path)?.write_document(doc)?;
    tracing::debug!(path = %path.display(), events = doc.events.len(), "wrote HYV file");
    Ok(())
}
