//! HYV document types.
//!
//! An HYV file holds a meet header line followed by one line per event.
//! Fields the format carries but nothing interprets are kept as raw text so
//! a file is written back exactly as it was read.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use hytek_model::{
    Classification, Course, EventType, Gender, ModelError, OPEN_MAX_AGE, Stroke, format_duration,
    parse_duration,
};

use crate::checksum::line_checksum;
use crate::error::{HyvError, Result};

/// Date format used by header fields.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Number of fields in a header line, not counting the checksum token.
pub const HEADER_FIELDS: usize = 10;

/// Number of fields in an event line.
pub const EVENT_FIELDS: usize = 18;

/// Meet header (first line of the file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyvHeader {
    pub description: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Date on which swimmer ages are computed.
    pub age_up: NaiveDate,
    pub course: Course,
    pub location: String,
    pub unknown1: String,
    pub software_vendor: String,
    pub software_version: String,
    pub unknown2: String,
}

impl HyvHeader {
    /// Create a header for a meet with empty location and vendor fields.
    pub fn new(description: impl Into<String>, start: NaiveDate, end: NaiveDate, course: Course) -> Self {
        Self {
            description: description.into(),
            start,
            end,
            age_up: start,
            course,
            location: String::new(),
            unknown1: String::new(),
            software_vendor: String::new(),
            software_version: String::new(),
            unknown2: String::new(),
        }
    }

    /// Decode the header from its split fields.
    ///
    /// Fields past the tenth (the checksum token) are ignored here.
    pub fn from_fields(fields: &[&str], line: usize) -> Result<Self> {
        if fields.len() < HEADER_FIELDS {
            return Err(HyvError::structural(
                line,
                format!(
                    "header needs {HEADER_FIELDS} fields, found {}",
                    fields.len()
                ),
            ));
        }
        let course = fields[4]
            .parse::<Course>()
            .map_err(|e| HyvError::field_decode(line, "course", fields[4], e))?;

        Ok(Self {
            description: fields[0].to_string(),
            start: parse_date(fields[1], "start date", line)?,
            end: parse_date(fields[2], "end date", line)?,
            age_up: parse_date(fields[3], "age up date", line)?,
            course,
            location: fields[5].to_string(),
            unknown1: fields[6].to_string(),
            software_vendor: fields[7].to_string(),
            software_version: fields[8].to_string(),
            unknown2: fields[9].to_string(),
        })
    }

    /// The ten header fields joined by `;`, without the checksum token.
    pub fn unsealed_line(&self) -> String {
        [
            self.description.clone(),
            self.start.format(DATE_FORMAT).to_string(),
            self.end.format(DATE_FORMAT).to_string(),
            self.age_up.format(DATE_FORMAT).to_string(),
            self.course.code().to_string(),
            self.location.clone(),
            self.unknown1.clone(),
            self.software_vendor.clone(),
            self.software_version.clone(),
            self.unknown2.clone(),
        ]
        .join(";")
    }

    /// The header line with its checksum token appended.
    pub fn to_line(&self) -> String {
        let line = self.unsealed_line();
        let token = line_checksum(&line);
        format!("{line};{token}")
    }
}

fn parse_date(raw: &str, field: &'static str, line: usize) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| HyvError::field_decode(line, field, raw, e))
}

/// One event definition line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HyvEvent {
    /// Event number, with a letter suffix for age group sub-events (`"4B"`).
    pub number: String,
    pub classification: Option<Classification>,
    pub gender: Option<Gender>,
    pub event_type: Option<EventType>,
    pub min_age: u32,
    /// Upper age bound as written; see [`HyvEvent::effective_max_age`].
    pub max_age: u32,
    pub distance: u32,
    pub stroke: Stroke,
    pub unknown1: String,
    pub qualifying_time: Duration,
    pub unknown2: String,
    pub event_fee: f32,
    pub unknown3: String,
    pub unknown4: String,
    pub unknown5: String,
    pub conversion_time: Duration,
    pub unknown6: String,
    /// Trailing checksum-bearing field, kept verbatim. A token sealing an
    /// event number of two characters ends in `;`, so this is everything
    /// after the seventeenth separator.
    pub checksum: String,
}

impl HyvEvent {
    /// Create an event with open ages and empty passthrough fields.
    pub fn new(number: impl Into<String>, stroke: Stroke, distance: u32) -> Self {
        Self {
            number: number.into(),
            classification: None,
            gender: None,
            event_type: None,
            min_age: 0,
            max_age: 0,
            distance,
            stroke,
            unknown1: String::new(),
            qualifying_time: Duration::ZERO,
            unknown2: String::new(),
            event_fee: 0.0,
            unknown3: String::new(),
            unknown4: String::new(),
            unknown5: String::new(),
            conversion_time: Duration::ZERO,
            unknown6: String::new(),
            checksum: String::new(),
        }
    }

    /// Upper age bound, with 0 or a bound below the minimum read as open.
    pub fn effective_max_age(&self) -> u32 {
        if self.max_age == 0 || self.max_age < self.min_age {
            OPEN_MAX_AGE
        } else {
            self.max_age
        }
    }

    pub fn is_relay(&self) -> bool {
        self.event_type.is_some_and(|t| t.is_relay())
    }

    /// Heading used on heat and lane sheets, e.g. `Girls 11-12 100m Butterfly`.
    pub fn title(&self) -> String {
        let gender = self.gender.unwrap_or(Gender::Mixed).display_name();
        let max_age = self.effective_max_age();
        let ages = match (self.min_age, max_age) {
            (0, OPEN_MAX_AGE) => "Open".to_string(),
            (min, OPEN_MAX_AGE) => format!("{min}+"),
            (0, max) => format!("{max} & Under"),
            (min, max) => format!("{min}-{max}"),
        };
        format!("{gender} {ages} {}m {}", self.distance, self.stroke.name())
    }

    /// Decode an event from its split fields.
    pub fn from_fields(fields: &[&str], line: usize) -> Result<Self> {
        if fields.len() < EVENT_FIELDS {
            return Err(HyvError::structural(
                line,
                format!("event needs {EVENT_FIELDS} fields, found {}", fields.len()),
            ));
        }

        Ok(Self {
            number: fields[0].to_string(),
            classification: optional_code(fields[1], "classification", line)?,
            gender: optional_code(fields[2], "gender", line)?,
            event_type: optional_code(fields[3], "event type", line)?,
            min_age: number(fields[4], "min age", line)?,
            max_age: number(fields[5], "max age", line)?,
            distance: number(fields[6], "distance", line)?,
            stroke: fields[7]
                .parse()
                .map_err(|e| HyvError::field_decode(line, "stroke", fields[7], e))?,
            unknown1: fields[8].to_string(),
            qualifying_time: duration(fields[9], "qualifying time", line)?,
            unknown2: fields[10].to_string(),
            event_fee: number(fields[11], "event fee", line)?,
            unknown3: fields[12].to_string(),
            unknown4: fields[13].to_string(),
            unknown5: fields[14].to_string(),
            conversion_time: duration(fields[15], "conversion time", line)?,
            unknown6: fields[16].to_string(),
            checksum: fields[EVENT_FIELDS - 1..].join(";"),
        })
    }

    /// The first 17 fields joined by `;`.
    pub fn unsealed_line(&self) -> String {
        [
            self.number.clone(),
            code_text(self.classification.map(|c| c.code())),
            code_text(self.gender.map(|g| g.code())),
            code_text(self.event_type.map(|t| t.code())),
            self.min_age.to_string(),
            self.max_age.to_string(),
            self.distance.to_string(),
            self.stroke.code().to_string(),
            self.unknown1.clone(),
            format_duration(self.qualifying_time),
            self.unknown2.clone(),
            self.event_fee.to_string(),
            self.unknown3.clone(),
            self.unknown4.clone(),
            self.unknown5.clone(),
            format_duration(self.conversion_time),
            self.unknown6.clone(),
        ]
        .join(";")
    }

    /// The full event line.
    pub fn to_line(&self) -> String {
        format!("{};{}", self.unsealed_line(), self.checksum)
    }

    /// Store the checksum of the other fields in the trailing field.
    pub fn seal(&mut self) {
        self.checksum = line_checksum(&self.unsealed_line());
    }
}

impl fmt::Display for HyvEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

fn code_text(code: Option<&str>) -> String {
    code.unwrap_or_default().to_string()
}

fn optional_code<T>(raw: &str, field: &'static str, line: usize) -> Result<Option<T>>
where
    T: FromStr<Err = ModelError>,
{
    if raw.trim().is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|e| HyvError::field_decode(line, field, raw, e))
}

/// Blank numeric fields read as zero.
fn number<T>(raw: &str, field: &'static str, line: usize) -> Result<T>
where
    T: FromStr + Default,
    T::Err: fmt::Display,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    trimmed
        .parse()
        .map_err(|e| HyvError::field_decode(line, field, raw, e))
}

fn duration(raw: &str, field: &'static str, line: usize) -> Result<Duration> {
    parse_duration(raw).map_err(|e| HyvError::field_decode(line, field, raw, e))
}

/// Qualifying and conversion times for one age group of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QualifyingStandard {
    pub min_age: u32,
    /// 0 for an open upper bound.
    pub max_age: u32,
    pub qualifying_time: Duration,
    pub conversion_time: Duration,
}

impl QualifyingStandard {
    /// Age group with no qualifying times.
    pub fn ages(min_age: u32, max_age: u32) -> Self {
        Self {
            min_age,
            max_age,
            ..Self::default()
        }
    }
}

/// A parsed HYV file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HyvDocument {
    pub header: HyvHeader,
    pub events: Vec<HyvEvent>,
}

impl HyvDocument {
    /// Create a document with no events.
    pub fn new(header: HyvHeader) -> Self {
        Self {
            header,
            events: Vec::new(),
        }
    }

    /// Find an event by its exact number.
    pub fn event(&self, number: &str) -> Option<&HyvEvent> {
        self.events.iter().find(|event| event.number == number)
    }

    /// First event with the given stroke and distance.
    pub fn find_event(&self, stroke: Stroke, distance: u32) -> Option<&HyvEvent> {
        self.events
            .iter()
            .find(|event| event.stroke == stroke && event.distance == distance)
    }

    /// Append one event per age group, copying everything else from
    /// `template`.
    ///
    /// A single group keeps the template's number; several groups are
    /// numbered with `A`, `B`, ... suffixes. An open upper bound is written
    /// as 109. The new events are sealed and returned.
    pub fn add_events(
        &mut self,
        template: &HyvEvent,
        standards: &[QualifyingStandard],
    ) -> &[HyvEvent] {
        let first = self.events.len();
        for (index, standard) in standards.iter().enumerate() {
            let mut event = template.clone();
            event.number = if standards.len() == 1 {
                template.number.clone()
            } else {
                format!("{}{}", template.number, suffix(index))
            };
            event.min_age = standard.min_age;
            event.max_age = standard.max_age;
            event.max_age = event.effective_max_age();
            event.qualifying_time = standard.qualifying_time;
            event.conversion_time = standard.conversion_time;
            event.seal();
            self.events.push(event);
        }
        tracing::debug!(
            number = %template.number,
            added = standards.len(),
            "added event age groups"
        );
        &self.events[first..]
    }
}

fn suffix(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'A'.checked_add(i))
        .map_or('?', char::from)
}
