//! Record layouts for HY3 lines.
//!
//! Every HY3 record is a 132-byte physical line:
//!
//! | Columns | Content                          |
//! |---------|----------------------------------|
//! | 1-2     | record tag (`A1`, `D1`, `E2`...) |
//! | 3-128   | fixed-width fields               |
//! | 129-130 | checksum digits                  |
//! | 131-132 | CR LF                            |
//!
//! The field layout of each record kind is plain data: an ordered list of
//! [`FieldSpec`]s with 1-based inclusive column ranges. The codec in
//! [`crate::codec`] reads and writes fields by name against these tables.
//! Column ranges match files produced by the meet manager software and must
//! not be changed.

use std::ops::Range;

/// Physical line length including checksum and CR LF.
pub const LINE_LEN: usize = 132;

/// Content length covered by the checksum (tag included).
pub const CONTENT_LEN: usize = 128;

/// Width of one split sub-record inside a `G1` line.
pub const SPLIT_LEN: usize = 11;

/// Field alignment within its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    /// Value starts at the first column, padded on the right.
    Left,
    /// Value ends at the last column, padded on the left.
    Right,
}

/// How a field's text maps to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Str,
    /// Unsigned integer; empty is zero.
    Int,
    /// Decimal number; empty is zero.
    Float,
    /// Race time, zero written as `0.00`.
    Time,
    /// Race time, zero written as `0`.
    DefaultTime,
    /// Backup time, zero leaves the field empty.
    PlungerTime,
    /// Touch-pad reaction time.
    ReactionTime,
    /// Repeated [`SPLIT_LEN`]-byte split sub-records.
    Splits,
}

/// A named field at a fixed column range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// First column, 1-based.
    pub start: usize,
    /// Last column, 1-based inclusive.
    pub end: usize,
    pub justify: Justify,
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Left-justified field.
    pub const fn left(name: &'static str, start: usize, end: usize, kind: FieldKind) -> Self {
        Self {
            name,
            start,
            end,
            justify: Justify::Left,
            kind,
        }
    }

    /// Right-justified field.
    pub const fn right(name: &'static str, start: usize, end: usize, kind: FieldKind) -> Self {
        Self {
            name,
            start,
            end,
            justify: Justify::Right,
            kind,
        }
    }

    /// Number of columns.
    pub const fn width(&self) -> usize {
        self.end - self.start + 1
    }

    /// 0-based byte range within the line.
    pub const fn range(&self) -> Range<usize> {
        self.start - 1..self.end
    }
}

/// The two-character line type that opens every HY3 record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordTag {
    FileDescriptor,
    MeetInfo,
    MeetAddress,
    MeetContact,
    TeamName,
    TeamAddress,
    TeamContact,
    SwimmerInfo,
    SwimmerInfo2,
    SwimmerInfo3,
    SwimmerInfo4,
    SwimmerInfo5,
    IndividualEntry,
    IndividualResult,
    RelayEntry,
    RelayResult,
    RelayLineUp,
    Splits,
    DqDescription,
}

impl RecordTag {
    pub const ALL: [RecordTag; 19] = [
        RecordTag::FileDescriptor,
        RecordTag::MeetInfo,
        RecordTag::MeetAddress,
        RecordTag::MeetContact,
        RecordTag::TeamName,
        RecordTag::TeamAddress,
        RecordTag::TeamContact,
        RecordTag::SwimmerInfo,
        RecordTag::SwimmerInfo2,
        RecordTag::SwimmerInfo3,
        RecordTag::SwimmerInfo4,
        RecordTag::SwimmerInfo5,
        RecordTag::IndividualEntry,
        RecordTag::IndividualResult,
        RecordTag::RelayEntry,
        RecordTag::RelayResult,
        RecordTag::RelayLineUp,
        RecordTag::Splits,
        RecordTag::DqDescription,
    ];

    /// Two-character code written in columns 1-2.
    pub const fn code(self) -> &'static str {
        match self {
            RecordTag::FileDescriptor => "A1",
            RecordTag::MeetInfo => "B1",
            RecordTag::MeetAddress => "B2",
            RecordTag::MeetContact => "B3",
            RecordTag::TeamName => "C1",
            RecordTag::TeamAddress => "C2",
            RecordTag::TeamContact => "C3",
            RecordTag::SwimmerInfo => "D1",
            RecordTag::SwimmerInfo2 => "D2",
            RecordTag::SwimmerInfo3 => "D3",
            RecordTag::SwimmerInfo4 => "D4",
            RecordTag::SwimmerInfo5 => "D5",
            RecordTag::IndividualEntry => "E1",
            RecordTag::IndividualResult => "E2",
            RecordTag::RelayEntry => "F1",
            RecordTag::RelayResult => "F2",
            RecordTag::RelayLineUp => "F3",
            RecordTag::Splits => "G1",
            RecordTag::DqDescription => "H1",
        }
    }

    /// Look up a tag from the first two bytes of a line.
    pub fn from_code(code: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.code().as_bytes() == code)
    }

    /// Field layout for this tag. `D2`-`D5` carry no modelled fields.
    pub fn layout(self) -> Option<&'static RecordLayout> {
        match self {
            RecordTag::FileDescriptor => Some(&FILE_DESCRIPTOR),
            RecordTag::MeetInfo => Some(&MEET_INFO),
            RecordTag::MeetAddress => Some(&MEET_ADDRESS),
            RecordTag::MeetContact => Some(&MEET_CONTACT),
            RecordTag::TeamName => Some(&TEAM_NAME),
            RecordTag::TeamAddress => Some(&TEAM_ADDRESS),
            RecordTag::TeamContact => Some(&TEAM_CONTACT),
            RecordTag::SwimmerInfo => Some(&SWIMMER_INFO),
            RecordTag::IndividualEntry => Some(&INDIVIDUAL_ENTRY),
            RecordTag::IndividualResult => Some(&INDIVIDUAL_RESULT),
            RecordTag::RelayEntry => Some(&RELAY_ENTRY),
            RecordTag::RelayResult => Some(&RELAY_RESULT),
            RecordTag::RelayLineUp => Some(&RELAY_LINEUP),
            RecordTag::Splits => Some(&SPLITS),
            RecordTag::DqDescription => Some(&DQ_DESCRIPTION),
            RecordTag::SwimmerInfo2
            | RecordTag::SwimmerInfo3
            | RecordTag::SwimmerInfo4
            | RecordTag::SwimmerInfo5 => None,
        }
    }
}

impl std::fmt::Display for RecordTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Field table for one record kind.
#[derive(Debug)]
pub struct RecordLayout {
    /// Name used in error messages (the tag code for line records).
    pub name: &'static str,
    /// Tag written in columns 1-2, absent for sub-records.
    pub tag: Option<RecordTag>,
    /// Encoded width in bytes.
    pub width: usize,
    pub fields: &'static [FieldSpec],
}

impl RecordLayout {
    /// Find a field by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }
}

use FieldKind::{DefaultTime, Float, Int, PlungerTime, ReactionTime, Splits, Str, Time};

const fn l(name: &'static str, start: usize, end: usize, kind: FieldKind) -> FieldSpec {
    FieldSpec::left(name, start, end, kind)
}

const fn r(name: &'static str, start: usize, end: usize, kind: FieldKind) -> FieldSpec {
    FieldSpec::right(name, start, end, kind)
}

pub static FILE_DESCRIPTOR: RecordLayout = RecordLayout {
    name: "A1",
    tag: Some(RecordTag::FileDescriptor),
    width: CONTENT_LEN,
    fields: &[
        l("file_type", 3, 4, Str),
        l("type_description", 5, 29, Str),
        l("vendor_name", 30, 44, Str),
        l("software_version", 45, 58, Str),
        l("date", 59, 66, Str),
        r("time", 68, 75, Str),
        l("licensed_to", 76, 128, Str),
    ],
};

pub static MEET_INFO: RecordLayout = RecordLayout {
    name: "B1",
    tag: Some(RecordTag::MeetInfo),
    width: CONTENT_LEN,
    fields: &[
        l("name", 3, 47, Str),
        l("facility", 48, 92, Str),
        l("start", 93, 100, Str),
        l("end", 101, 108, Str),
        l("age_up", 109, 116, Str),
        r("elevation", 117, 121, Str),
    ],
};

pub static MEET_ADDRESS: RecordLayout = RecordLayout {
    name: "B2",
    tag: Some(RecordTag::MeetAddress),
    width: CONTENT_LEN,
    fields: &[
        l("unknown1", 3, 94, Str),
        l("masters", 95, 96, Str),
        l("meet_type", 97, 98, Str),
        l("course", 99, 99, Str),
        l("unknown2", 100, 100, Str),
        r("unknown3", 101, 106, Float),
        l("course2", 107, 107, Str),
    ],
};

pub static MEET_CONTACT: RecordLayout = RecordLayout {
    name: "B3",
    tag: Some(RecordTag::MeetContact),
    width: CONTENT_LEN,
    fields: &[l("unknown", 3, 128, Str)],
};

pub static TEAM_NAME: RecordLayout = RecordLayout {
    name: "C1",
    tag: Some(RecordTag::TeamName),
    width: CONTENT_LEN,
    fields: &[
        l("abbr", 3, 7, Str),
        l("name", 8, 37, Str),
        l("short_name", 38, 53, Str),
        l("lsc", 54, 55, Str),
        l("contact1", 56, 85, Str),
        l("contact2", 86, 105, Str),
        l("unknown1", 119, 119, Str),
        r("team_type", 120, 122, Str),
    ],
};

pub static TEAM_ADDRESS: RecordLayout = RecordLayout {
    name: "C2",
    tag: Some(RecordTag::TeamAddress),
    width: CONTENT_LEN,
    fields: &[
        l("mail_to", 3, 32, Str),
        l("address", 33, 62, Str),
        l("city", 63, 92, Str),
        l("state", 93, 94, Str),
        l("zip", 95, 104, Str),
        l("country", 105, 107, Str),
        l("unknown", 108, 108, Str),
        l("registration", 109, 112, Str),
    ],
};

pub static TEAM_CONTACT: RecordLayout = RecordLayout {
    name: "C3",
    tag: Some(RecordTag::TeamContact),
    width: CONTENT_LEN,
    fields: &[
        l("unknown", 3, 32, Str),
        l("daytime_phone", 33, 52, Str),
        l("evening_phone", 53, 72, Str),
        l("fax", 73, 92, Str),
        l("email", 93, 128, Str),
    ],
};

// `uss_number` overlaps `id`; it is listed first so that `id` wins on encode.
pub static SWIMMER_INFO: RecordLayout = RecordLayout {
    name: "D1",
    tag: Some(RecordTag::SwimmerInfo),
    width: CONTENT_LEN,
    fields: &[
        l("gender", 3, 3, Str),
        r("swimmer_id_event", 4, 8, Int),
        l("last_name", 9, 28, Str),
        l("first_name", 29, 48, Str),
        l("nickname", 49, 68, Str),
        l("middle_initial", 69, 69, Str),
        l("uss_number", 70, 83, Str),
        r("id", 70, 77, Str),
        r("swimmer_id_team", 84, 88, Int),
        l("birth", 89, 96, Str),
        l("age", 98, 99, Int),
        l("unknown1", 105, 105, Int),
        r("unknown2", 113, 115, Str),
        l("n", 125, 125, Str),
    ],
};

pub static INDIVIDUAL_ENTRY: RecordLayout = RecordLayout {
    name: "E1",
    tag: Some(RecordTag::IndividualEntry),
    width: CONTENT_LEN,
    fields: &[
        l("gender", 3, 3, Str),
        r("swimmer_id_event", 4, 8, Int),
        l("swimmer_abbr", 9, 13, Str),
        l("gender1", 14, 14, Str),
        l("gender2", 15, 15, Str),
        r("distance", 18, 21, Int),
        l("stroke", 22, 22, Int),
        r("age_lower", 23, 25, Str),
        r("age_upper", 26, 28, Str),
        r("unknown1", 29, 32, Str),
        r("event_fee", 33, 38, Float),
        r("event_number", 39, 42, Str),
        r("conversion_seed_time_1", 43, 50, DefaultTime),
        l("conversion_course_1", 51, 51, Str),
        r("seed_time_1", 53, 59, Time),
        l("seed_course_1", 60, 60, Str),
        r("conversion_seed_time_2", 61, 68, Time),
        l("conversion_course_2", 69, 69, Str),
        r("seed_time_2", 70, 76, Time),
        l("seed_course_2", 77, 77, Str),
        l("unknown2", 80, 81, Str),
        l("unknown3", 97, 97, Str),
    ],
};

pub static INDIVIDUAL_RESULT: RecordLayout = RecordLayout {
    name: "E2",
    tag: Some(RecordTag::IndividualResult),
    width: CONTENT_LEN,
    fields: &[
        l("classification", 3, 3, Str),
        r("time", 4, 11, Time),
        l("length_unit", 12, 12, Str),
        r("time_code", 13, 15, Str),
        r("unknown1", 16, 20, Str),
        r("heat", 21, 23, Int),
        r("lane", 24, 26, Int),
        r("place_in_heat", 27, 29, Int),
        r("place_overall", 30, 33, Int),
        r("unknown2", 34, 36, Int),
        r("time1", 37, 44, PlungerTime),
        r("time2", 45, 52, PlungerTime),
        r("time3", 53, 60, PlungerTime),
        r("time4", 66, 73, PlungerTime),
        r("time5", 75, 82, PlungerTime),
        r("reaction_time", 84, 95, ReactionTime),
        l("unknown3", 96, 96, Str),
        l("unknown4", 100, 100, Str),
        l("day_of_event", 103, 110, Str),
        l("unknown5", 123, 123, Int),
    ],
};

pub static RELAY_ENTRY: RecordLayout = RecordLayout {
    name: "F1",
    tag: Some(RecordTag::RelayEntry),
    width: CONTENT_LEN,
    fields: &[
        l("team_abbr", 3, 7, Str),
        l("relay_team", 8, 8, Str),
        l("gender", 13, 13, Str),
        l("gender1", 14, 14, Str),
        l("gender2", 15, 15, Str),
        r("distance", 18, 21, Int),
        l("stroke", 22, 22, Str),
        r("age_lower", 23, 25, Str),
        r("age_upper", 26, 28, Str),
        r("event_fee", 33, 38, Float),
        r("event_number", 39, 41, Str),
        l("seed_time_1", 44, 44, Str),
        l("seed_course_1", 51, 51, Str),
        r("seed_time_2", 53, 59, Str),
        l("seed_course_2", 60, 60, Str),
    ],
};

pub static RELAY_RESULT: RecordLayout = RecordLayout {
    name: "F2",
    tag: Some(RecordTag::RelayResult),
    width: CONTENT_LEN,
    fields: &[
        l("classification", 3, 3, Str),
        r("time", 4, 11, Str),
        l("length_unit", 12, 12, Str),
        r("time_code", 13, 15, Str),
        r("unknown1", 16, 20, Str),
        r("heat", 21, 23, Int),
        r("lane", 24, 26, Int),
        r("place_in_heat", 27, 29, Int),
        r("place_overall", 30, 33, Int),
        r("time1", 37, 44, PlungerTime),
        r("time2", 45, 52, PlungerTime),
        r("time3", 53, 60, PlungerTime),
        r("time4", 66, 73, PlungerTime),
        r("time5", 75, 82, PlungerTime),
        l("day_of_event", 103, 110, Str),
    ],
};

pub static RELAY_LINEUP: RecordLayout = RecordLayout {
    name: "F3",
    tag: Some(RecordTag::RelayLineUp),
    width: CONTENT_LEN,
    fields: &[
        l("gender1", 3, 3, Str),
        r("id1", 4, 8, Int),
        l("abbr1", 9, 13, Str),
        l("gender1x", 14, 14, Str),
        l("leg1", 15, 15, Int),
        l("gender2", 16, 16, Str),
        r("id2", 17, 21, Int),
        l("abbr2", 22, 26, Str),
        l("gender2x", 27, 27, Str),
        l("leg2", 28, 28, Int),
        l("gender3", 29, 29, Str),
        r("id3", 30, 34, Int),
        l("abbr3", 35, 39, Str),
        l("gender3x", 40, 40, Str),
        l("leg3", 41, 41, Int),
        l("gender4", 42, 42, Str),
        r("id4", 43, 47, Int),
        l("abbr4", 48, 52, Str),
        l("gender4x", 53, 53, Str),
        l("leg4", 54, 54, Int),
    ],
};

pub static SPLITS: RecordLayout = RecordLayout {
    name: "G1",
    tag: Some(RecordTag::Splits),
    width: CONTENT_LEN,
    fields: &[l("times", 3, 124, Splits)],
};

/// One `(marker, lap length, cumulative time)` entry inside a `G1` line.
pub static SPLIT_TIME: RecordLayout = RecordLayout {
    name: "G1 split",
    tag: None,
    width: SPLIT_LEN,
    fields: &[
        l("marker", 1, 1, Str),
        r("length", 2, 3, Int),
        r("time", 4, 11, Time),
    ],
};

pub static DQ_DESCRIPTION: RecordLayout = RecordLayout {
    name: "H1",
    tag: Some(RecordTag::DqDescription),
    width: CONTENT_LEN,
    fields: &[l("code", 3, 4, Str), l("description", 5, 128, Str)],
};
