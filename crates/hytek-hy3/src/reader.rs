//! HY3 file reader.
//!
//! Parsing is a single pass over the lines of the file. The most recently
//! opened team, swimmer, entry and result form a cursor; child records attach
//! to the cursor and fail with [`Hy3Error::Structural`] when their parent has
//! not been opened. A new parent closes every level below it.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::checksum::{line_checksum, verify_line};
use crate::codec::{latin1_decode, latin1_encode};
use crate::document::{
    DqDescription, FileDescriptor, Hy3Document, IndividualEntry, IndividualResult, MeetAddress,
    MeetContact, MeetInfo, Record, Splits, Swimmer, SwimmerInfo, Team, TeamAddress, TeamContact,
    TeamName,
};
use crate::error::{Hy3Error, Result};
use crate::layout::{CONTENT_LEN, RecordTag};
use crate::options::Hy3ReaderOptions;

/// HY3 file reader.
pub struct Hy3Reader<R: Read> {
    reader: BufReader<R>,
    options: Hy3ReaderOptions,
}

impl<R: Read> Hy3Reader<R> {
    /// Create a new HY3 reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            options: Hy3ReaderOptions::default(),
        }
    }

    /// Create a new HY3 reader with options.
    pub fn with_options(reader: R, options: Hy3ReaderOptions) -> Self {
        Self {
            reader: BufReader::new(reader),
            options,
        }
    }

    /// Read the whole input and parse it.
    pub fn read_document(mut self) -> Result<Hy3Document> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        parse_hy3_bytes(&data, &self.options)
    }
}

impl Hy3Reader<File> {
    /// Open an HY3 file for reading.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_options(path, Hy3ReaderOptions::default())
    }

    /// Open an HY3 file with options.
    pub fn open_with_options(path: &Path, options: Hy3ReaderOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Hy3Error::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Hy3Error::Io(e)
            }
        })?;
        Ok(Self::with_options(file, options))
    }
}

/// Read an HY3 file from a path.
pub fn read_hy3(path: &Path) -> Result<Hy3Document> {
    let document = Hy3Reader::open(path)?.read_document()?;
    tracing::debug!(path = %path.display(), "read HY3 file");
    Ok(document)
}

/// Read an HY3 file with options.
pub fn read_hy3_with_options(path: &Path, options: Hy3ReaderOptions) -> Result<Hy3Document> {
    Hy3Reader::open_with_options(path, options)?.read_document()
}

/// Parse HY3 text with default options.
///
/// Each char stands for one byte of the file, so text decoded as Latin-1
/// keeps its column positions.
pub fn parse_hy3(text: &str) -> Result<Hy3Document> {
    parse_hy3_with_options(text, &Hy3ReaderOptions::default())
}

/// Parse HY3 text with options.
pub fn parse_hy3_with_options(text: &str, options: &Hy3ReaderOptions) -> Result<Hy3Document> {
    parse_hy3_bytes(&latin1_encode(text), options)
}

/// Parse raw HY3 bytes.
pub fn parse_hy3_bytes(data: &[u8], options: &Hy3ReaderOptions) -> Result<Hy3Document> {
    let mut parser = Parser::default();
    for (index, raw) in data.split(|&b| b == b'\n').enumerate() {
        let line = raw.strip_suffix(b"\r").unwrap_or(raw);
        parser.line(line, index + 1, options)?;
    }

    let document = parser.document;
    tracing::debug!(
        records = parser.records,
        teams = document.teams.len(),
        swimmers = document.swimmer_count(),
        entries = document.entry_count(),
        "parsed HY3 document"
    );
    Ok(document)
}

/// Indices of the currently open records.
#[derive(Debug, Default)]
struct Cursor {
    team: Option<usize>,
    swimmer: Option<usize>,
    entry: Option<usize>,
}

impl Cursor {
    fn team<'d>(&self, doc: &'d mut Hy3Document) -> Option<&'d mut Team> {
        doc.teams.get_mut(self.team?)
    }

    fn swimmer<'d>(&self, doc: &'d mut Hy3Document) -> Option<&'d mut Swimmer> {
        self.team(doc)?.swimmers.get_mut(self.swimmer?)
    }

    fn entry<'d>(&self, doc: &'d mut Hy3Document) -> Option<&'d mut IndividualEntry> {
        self.swimmer(doc)?.entries.get_mut(self.entry?)
    }

    fn result<'d>(&self, doc: &'d mut Hy3Document) -> Option<&'d mut IndividualResult> {
        self.entry(doc)?.result.as_mut()
    }
}

#[derive(Default)]
struct Parser {
    document: Hy3Document,
    cursor: Cursor,
    records: usize,
}

impl Parser {
    fn line(&mut self, line: &[u8], number: usize, options: &Hy3ReaderOptions) -> Result<()> {
        if line.iter().all(|&b| b == b' ') {
            return Ok(());
        }

        let Some(tag) = line.get(..2).and_then(RecordTag::from_code) else {
            let code = latin1_decode(&line[..line.len().min(2)]);
            tracing::warn!(line = number, tag = %code, "skipping unknown record type");
            return Ok(());
        };
        tracing::trace!(line = number, tag = %tag, "record");

        if options.strict_checksums && verify_line(line) != Some(true) {
            let found = line.get(CONTENT_LEN..).unwrap_or_default();
            return Err(Hy3Error::ChecksumMismatch {
                line: number,
                expected: latin1_decode(&line_checksum(line)),
                found: latin1_decode(&found[..found.len().min(2)]),
            });
        }

        self.record(tag, line, number)?;
        self.records += 1;
        Ok(())
    }

    fn record(&mut self, tag: RecordTag, line: &[u8], number: usize) -> Result<()> {
        let doc = &mut self.document;
        let missing = |message: &str| Hy3Error::structural(number, tag.code(), message);

        match tag {
            RecordTag::FileDescriptor => {
                if self.records > 0 {
                    return Err(missing("file descriptor must be the first record"));
                }
                doc.file_descriptor = Some(FileDescriptor::decode_line(line, number)?);
            }
            RecordTag::MeetInfo => doc.meet_info = Some(MeetInfo::decode_line(line, number)?),
            RecordTag::MeetAddress => {
                doc.meet_address = Some(MeetAddress::decode_line(line, number)?);
            }
            RecordTag::MeetContact => {
                doc.meet_contact = Some(MeetContact::decode_line(line, number)?);
            }
            RecordTag::TeamName => {
                let name = TeamName::decode_line(line, number)?;
                doc.teams.push(Team {
                    name: Some(name),
                    ..Team::default()
                });
                self.cursor = Cursor {
                    team: Some(doc.teams.len() - 1),
                    ..Cursor::default()
                };
            }
            RecordTag::TeamAddress => {
                let address = TeamAddress::decode_line(line, number)?;
                let team = self
                    .cursor
                    .team(doc)
                    .ok_or_else(|| missing("team address before team name"))?;
                team.address = Some(address);
            }
            RecordTag::TeamContact => {
                let contact = TeamContact::decode_line(line, number)?;
                let team = self
                    .cursor
                    .team(doc)
                    .ok_or_else(|| missing("team contact before team name"))?;
                team.contact = Some(contact);
            }
            RecordTag::SwimmerInfo => {
                let info = SwimmerInfo::decode_line(line, number)?;
                let team = self
                    .cursor
                    .team(doc)
                    .ok_or_else(|| missing("swimmer before team name"))?;
                team.swimmers.push(Swimmer {
                    info,
                    entries: Vec::new(),
                });
                self.cursor.swimmer = Some(team.swimmers.len() - 1);
                self.cursor.entry = None;
            }
            RecordTag::SwimmerInfo2
            | RecordTag::SwimmerInfo3
            | RecordTag::SwimmerInfo4
            | RecordTag::SwimmerInfo5 => {}
            RecordTag::IndividualEntry => {
                let entry = IndividualEntry::decode_line(line, number)?;
                let swimmer = self
                    .cursor
                    .swimmer(doc)
                    .ok_or_else(|| missing("individual entry before swimmer"))?;
                swimmer.entries.push(entry);
                self.cursor.entry = Some(swimmer.entries.len() - 1);
            }
            RecordTag::IndividualResult => {
                let result = IndividualResult::decode_line(line, number)?;
                let entry = self
                    .cursor
                    .entry(doc)
                    .ok_or_else(|| missing("individual result before individual entry"))?;
                entry.result = Some(result);
            }
            RecordTag::Splits => {
                let splits = Splits::decode_line(line, number)?;
                let result = self
                    .cursor
                    .result(doc)
                    .ok_or_else(|| missing("splits before individual result"))?;
                result.splits.push(splits);
            }
            RecordTag::DqDescription => {
                let dq = DqDescription::decode_line(line, number)?;
                let result = self
                    .cursor
                    .result(doc)
                    .ok_or_else(|| missing("DQ description before individual result"))?;
                result.dq = Some(dq);
            }
            RecordTag::RelayEntry | RecordTag::RelayResult | RecordTag::RelayLineUp => {
                tracing::trace!(line = number, tag = %tag, "relay record not attached");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hytek_model::Stroke;

    fn line(parts: &[(usize, &str)]) -> String {
        let mut buf = vec![' '; 128];
        for (col, text) in parts {
            for (i, ch) in text.chars().enumerate() {
                buf[col - 1 + i] = ch;
            }
        }
        buf.into_iter().collect()
    }

    fn file(lines: &[String]) -> String {
        lines.iter().map(|l| format!("{l}\r\n")).collect()
    }

    #[test]
    fn test_builds_tree() {
        let text = file(&[
            line(&[(1, "A1"), (3, "02"), (5, "Meet Entries")]),
            line(&[(1, "B1"), (3, "Club Champs")]),
            line(&[(1, "C1"), (3, "SHARK"), (8, "Sharks SC")]),
            line(&[(1, "C2"), (63, "Dublin")]),
            line(&[(1, "D1"), (3, "F"), (8, "1"), (9, "Byrne"), (29, "Aoife"), (98, "12")]),
            line(&[(1, "D2")]),
            line(&[(1, "E1"), (3, "F"), (20, "50"), (22, "1"), (42, "1"), (55, "31.20")]),
            line(&[(1, "E2"), (3, "F"), (7, "30.95"), (23, "1"), (26, "3")]),
            line(&[(1, "G1"), (3, "F 2   30.95")]),
            line(&[(1, "E1"), (3, "F"), (19, "100"), (22, "2"), (42, "3")]),
        ]);
        let doc = parse_hy3(&text).unwrap();

        assert_eq!(doc.file_descriptor.as_ref().unwrap().file_type, "02");
        assert_eq!(doc.meet_info.as_ref().unwrap().name, "Club Champs");
        assert_eq!(doc.teams.len(), 1);
        let team = &doc.teams[0];
        assert_eq!(team.name.as_ref().unwrap().abbr, "SHARK");
        assert_eq!(team.address.as_ref().unwrap().city, "Dublin");

        let swimmer = &team.swimmers[0];
        assert_eq!(swimmer.info.first_name, "Aoife");
        assert_eq!(swimmer.info.age, 12);
        assert_eq!(swimmer.entries.len(), 2);

        let result = swimmer.entries[0].result.as_ref().unwrap();
        assert_eq!((result.heat, result.lane), (1, 3));
        assert_eq!(result.time.to_string(), "30.95");
        assert_eq!(result.splits[0].times[0].length, 2);

        let second = &swimmer.entries[1];
        assert_eq!(second.stroke, Stroke::Backstroke);
        assert_eq!(second.distance, 100);
        assert!(second.result.is_none());
    }

    #[test]
    fn test_child_before_parent_fails() {
        let text = file(&[line(&[(1, "C2"), (63, "Dublin")])]);
        let err = parse_hy3(&text).unwrap_err();
        assert!(matches!(err, Hy3Error::Structural { line: 1, ref tag, .. } if tag == "C2"));

        let text = file(&[
            line(&[(1, "C1"), (3, "SHARK")]),
            line(&[(1, "D1"), (9, "Byrne")]),
            line(&[(1, "E2"), (7, "30.95")]),
        ]);
        let err = parse_hy3(&text).unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert!(err.to_string().contains("E2"));
    }

    #[test]
    fn test_splits_need_result_of_current_entry() {
        let text = file(&[
            line(&[(1, "C1"), (3, "SHARK")]),
            line(&[(1, "D1"), (9, "Byrne")]),
            line(&[(1, "E1"), (20, "50"), (22, "1"), (42, "1")]),
            line(&[(1, "E2"), (7, "30.95")]),
            line(&[(1, "E1"), (20, "50"), (22, "2"), (42, "2")]),
            line(&[(1, "G1"), (3, "F 2   30.95")]),
        ]);
        let err = parse_hy3(&text).unwrap_err();
        assert!(matches!(err, Hy3Error::Structural { line: 6, .. }));
    }

    #[test]
    fn test_file_descriptor_must_come_first() {
        let text = file(&[line(&[(1, "B1"), (3, "Champs")]), line(&[(1, "A1"), (3, "02")])]);
        assert!(matches!(
            parse_hy3(&text),
            Err(Hy3Error::Structural { line: 2, .. })
        ));
    }

    #[test]
    fn test_skips_unknown_and_blank_lines() {
        let text = "Z9 something\n\n   \nB1Club Champs\n";
        let doc = parse_hy3(text).unwrap();
        assert_eq!(doc.meet_info.unwrap().name, "Club Champs");
    }

    #[test]
    fn test_partial_tree_is_accepted() {
        let text = file(&[
            line(&[(1, "C1"), (3, "SHARK")]),
            line(&[(1, "D1"), (9, "Byrne")]),
        ]);
        let doc = parse_hy3(&text).unwrap();
        assert!(doc.teams[0].swimmers[0].entries.is_empty());
    }

    #[test]
    fn test_field_error_aborts_parse() {
        let text = file(&[
            line(&[(1, "C1"), (3, "SHARK")]),
            line(&[(1, "D1"), (9, "Byrne"), (98, "1X")]),
        ]);
        let err = parse_hy3(&text).unwrap_err();
        assert!(matches!(err, Hy3Error::FieldDecode { line: 2, field: "age", .. }));
    }

    #[test]
    fn test_strict_checksums() {
        let text = file(&[line(&[(1, "B1"), (3, "Club Champs")])]);
        // no checksum digits: fine by default, rejected in strict mode
        assert!(parse_hy3(&text).is_ok());
        let err = parse_hy3_with_options(&text, &Hy3ReaderOptions::strict()).unwrap_err();
        assert!(matches!(err, Hy3Error::ChecksumMismatch { line: 1, .. }));
    }
}
