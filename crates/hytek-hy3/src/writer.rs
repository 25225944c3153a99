//! HY3 file writer.
//!
//! Records are written top-down in the order meet software expects: file
//! descriptor, meet records, then each team with its swimmers, entries,
//! results, splits and DQ descriptions. Absent optional records are skipped.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::checksum::seal_line;
use crate::document::{Hy3Document, Record};
use crate::error::{Hy3Error, Result};

/// HY3 file writer.
pub struct Hy3Writer<W: Write> {
    writer: BufWriter<W>,
    lines: usize,
}

impl<W: Write> Hy3Writer<W> {
    /// Create a new HY3 writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            lines: 0,
        }
    }

    /// Number of lines written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Encode one record as a sealed 132-byte line.
    pub fn write_record<T: Record>(&mut self, record: &T) -> Result<()> {
        let content = record.encode_line()?;
        self.writer.write_all(&seal_line(&content))?;
        self.lines += 1;
        Ok(())
    }

    /// Write a whole document.
    pub fn write_document(&mut self, doc: &Hy3Document) -> Result<()> {
        if let Some(descriptor) = &doc.file_descriptor {
            self.write_record(descriptor)?;
        }
        if let Some(info) = &doc.meet_info {
            self.write_record(info)?;
        }
        if let Some(address) = &doc.meet_address {
            self.write_record(address)?;
        }
        if let Some(contact) = &doc.meet_contact {
            self.write_record(contact)?;
        }

        for team in &doc.teams {
            let Some(name) = &team.name else {
                tracing::debug!(swimmers = team.swimmers.len(), "skipping team without name");
                continue;
            };
            self.write_record(name)?;
            if let Some(address) = &team.address {
                self.write_record(address)?;
            }
            if let Some(contact) = &team.contact {
                self.write_record(contact)?;
            }

            for swimmer in &team.swimmers {
                self.write_record(&swimmer.info)?;
                for entry in &swimmer.entries {
                    self.write_record(entry)?;
                    let Some(result) = &entry.result else {
                        continue;
                    };
                    self.write_record(result)?;
                    for splits in &result.splits {
                        self.write_record(splits)?;
                    }
                    if let Some(dq) = &result.dq {
                        self.write_record(dq)?;
                    }
                }
            }
        }

        self.writer.flush()?;
        tracing::debug!(lines = self.lines, "encoded HY3 document");
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| Hy3Error::Io(e.into_error()))
    }
}

impl Hy3Writer<File> {
    /// Create an HY3 file for writing.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(file))
    }
}

/// Encode a document into HY3 bytes.
pub fn encode_hy3(doc: &Hy3Document) -> Result<Vec<u8>> {
    let mut writer = Hy3Writer::new(Vec::new());
    writer.write_document(doc)?;
    writer.into_inner()
}

/// Write a document to an HY3 file.
pub fn write_hy3(path: &Path, doc: &Hy3Document) -> Result<()> {
    let mut writer = Hy3Writer::create(path)?;
    writer.write_document(doc)?;
    tracing::debug!(path = %path.display(), lines = writer.lines(), "wrote HY3 file");
    Ok(())
}
