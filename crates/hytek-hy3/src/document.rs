//! HY3 document tree and record codecs.
//!
//! A document owns its records outright:
//!
//! ```text
//! Hy3Document
//! ├── FileDescriptor (A1), MeetInfo (B1), MeetAddress (B2), MeetContact (B3)
//! └── Team*
//!     ├── TeamName (C1), TeamAddress (C2), TeamContact (C3)
//!     └── Swimmer*
//!         ├── SwimmerInfo (D1)
//!         └── IndividualEntry* (E1)
//!             └── IndividualResult (E2)
//!                 ├── Splits* (G1)
//!                 └── DqDescription (H1)
//! ```
//!
//! Each record type implements [`Record`], mapping its struct fields onto
//! the named fields of its [`RecordLayout`].

use hytek_model::{Classification, Gender, ReactionTime, Stroke, Time, TimeCode};
use serde::{Deserialize, Serialize};

use crate::codec::{FieldReader, FieldWriter, latin1_decode};
use crate::error::Result;
use crate::layout::{self, RecordLayout, SPLIT_LEN};

/// A record with a fixed-width layout.
pub trait Record: Sized {
    /// Field table used to decode and encode the record.
    const LAYOUT: &'static RecordLayout;

    /// Build the record from decoded fields.
    fn decode(fields: &FieldReader<'_>) -> Result<Self>;

    /// Write the record's fields.
    fn encode(&self, fields: &mut FieldWriter) -> Result<()>;

    /// Decode one line. `line_number` is only used for error reporting.
    fn decode_line(line: &[u8], line_number: usize) -> Result<Self> {
        Self::decode(&FieldReader::new(Self::LAYOUT, line, line_number))
    }

    /// Encode into the layout's width (128 content bytes for line records).
    fn encode_line(&self) -> Result<Vec<u8>> {
        let mut fields = FieldWriter::new(Self::LAYOUT);
        self.encode(&mut fields)?;
        Ok(fields.finish())
    }
}

fn gender_code(gender: Option<Gender>) -> Option<&'static str> {
    gender.as_ref().map(Gender::code)
}

/// `A1`: file type and producing software.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Two-digit file type; `07` marks a results file.
    pub file_type: String,
    pub type_description: String,
    pub vendor_name: String,
    pub software_version: String,
    pub date: String,
    pub time: String,
    pub licensed_to: String,
}

impl Record for FileDescriptor {
    const LAYOUT: &'static RecordLayout = &layout::FILE_DESCRIPTOR;

    fn decode(f: &FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            file_type: f.string("file_type")?,
            type_description: f.string("type_description")?,
            vendor_name: f.string("vendor_name")?,
            software_version: f.string("software_version")?,
            date: f.string("date")?,
            time: f.string("time")?,
            licensed_to: f.string("licensed_to")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter) -> Result<()> {
        w.string("file_type", &self.file_type)?;
        w.string("type_description", &self.type_description)?;
        w.string("vendor_name", &self.vendor_name)?;
        w.string("software_version", &self.software_version)?;
        w.string("date", &self.date)?;
        w.string("time", &self.time)?;
        w.string("licensed_to", &self.licensed_to)
    }
}

/// `B1`: meet name, facility and dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetInfo {
    pub name: String,
    pub facility: String,
    pub start: String,
    pub end: String,
    pub age_up: String,
    pub elevation: String,
}

impl Record for MeetInfo {
    const LAYOUT: &'static RecordLayout = &layout::MEET_INFO;

    fn decode(f: &FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            name: f.string("name")?,
            facility: f.string("facility")?,
            start: f.string("start")?,
            end: f.string("end")?,
            age_up: f.string("age_up")?,
            elevation: f.string("elevation")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter) -> Result<()> {
        w.string("name", &self.name)?;
        w.string("facility", &self.facility)?;
        w.string("start", &self.start)?;
        w.string("end", &self.end)?;
        w.string("age_up", &self.age_up)?;
        w.string("elevation", &self.elevation)
    }
}

/// `B2`: meet classification and course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetAddress {
    pub unknown1: String,
    pub masters: String,
    pub meet_type: String,
    pub course: String,
    pub unknown2: String,
    pub unknown3: f32,
    pub course2: String,
}

impl Record for MeetAddress {
    const LAYOUT: &'static RecordLayout = &layout::MEET_ADDRESS;

    fn decode(f: &FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            unknown1: f.string("unknown1")?,
            masters: f.string("masters")?,
            meet_type: f.string("meet_type")?,
            course: f.string("course")?,
            unknown2: f.string("unknown2")?,
            unknown3: f.float("unknown3")?,
            course2: f.string("course2")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter) -> Result<()> {
        w.string("unknown1", &self.unknown1)?;
        w.string("masters", &self.masters)?;
        w.string("meet_type", &self.meet_type)?;
        w.string("course", &self.course)?;
        w.string("unknown2", &self.unknown2)?;
        w.float("unknown3", self.unknown3)?;
        w.string("course2", &self.course2)
    }
}

/// `B3`: meet contact, kept as raw text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetContact {
    pub unknown: String,
}

impl Record for MeetContact {
    const LAYOUT: &'static RecordLayout = &layout::MEET_CONTACT;

    fn decode(f: &FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            unknown: f.string("unknown")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter) -> Result<()> {
        w.string("unknown", &self.unknown)
    }
}

/// `C1`: team identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamName {
    pub abbr: String,
    pub name: String,
    pub short_name: String,
    pub lsc: String,
    pub contact1: String,
    pub contact2: String,
    pub unknown1: String,
    pub team_type: String,
}

impl Record for TeamName {
    const LAYOUT: &'static RecordLayout = &layout::TEAM_NAME;

    fn decode(f: &FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            abbr: f.string("abbr")?,
            name: f.string("name")?,
            short_name: f.string("short_name")?,
            lsc: f.string("lsc")?,
            contact1: f.string("contact1")?,
            contact2: f.string("contact2")?,
            unknown1: f.string("unknown1")?,
            team_type: f.string("team_type")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter) -> Result<()> {
        w.string("abbr", &self.abbr)?;
        w.string("name", &self.name)?;
        w.string("short_name", &self.short_name)?;
        w.string("lsc", &self.lsc)?;
        w.string("contact1", &self.contact1)?;
        w.string("contact2", &self.contact2)?;
        w.string("unknown1", &self.unknown1)?;
        w.string("team_type", &self.team_type)
    }
}

/// `C2`: team mailing address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamAddress {
    pub mail_to: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub unknown: String,
    pub registration: String,
}

impl Record for TeamAddress {
    const LAYOUT: &'static RecordLayout = &layout::TEAM_ADDRESS;

    fn decode(f: &FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            mail_to: f.string("mail_to")?,
            address: f.string("address")?,
            city: f.string("city")?,
            state: f.string("state")?,
            zip: f.string("zip")?,
            country: f.string("country")?,
            unknown: f.string("unknown")?,
            registration: f.string("registration")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter) -> Result<()> {
        w.string("mail_to", &self.mail_to)?;
        w.string("address", &self.address)?;
        w.string("city", &self.city)?;
        w.string("state", &self.state)?;
        w.string("zip", &self.zip)?;
        w.string("country", &self.country)?;
        w.string("unknown", &self.unknown)?;
        w.string("registration", &self.registration)
    }
}

/// `C3`: team phone numbers and email.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamContact {
    pub unknown: String,
    pub daytime_phone: String,
    pub evening_phone: String,
    pub fax: String,
    pub email: String,
}

impl Record for TeamContact {
    const LAYOUT: &'static RecordLayout = &layout::TEAM_CONTACT;

    fn decode(f: &FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            unknown: f.string("unknown")?,
            daytime_phone: f.string("daytime_phone")?,
            evening_phone: f.string("evening_phone")?,
            fax: f.string("fax")?,
            email: f.string("email")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter) -> Result<()> {
        w.string("unknown", &self.unknown)?;
        w.string("daytime_phone", &self.daytime_phone)?;
        w.string("evening_phone", &self.evening_phone)?;
        w.string("fax", &self.fax)?;
        w.string("email", &self.email)
    }
}

/// `D1`: swimmer identity.
///
/// `uss_number` spans columns 70-83 and contains the columns of `id`
/// (70-77). On encode `id` is written last, so it wins where they overlap.
/// A swimmer therefore reads back unchanged only when the first eight
/// columns of `uss_number` are `id` right-justified (`format!("{id:>8}")`),
/// or both are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwimmerInfo {
    pub gender: Option<Gender>,
    pub swimmer_id_event: u32,
    pub last_name: String,
    pub first_name: String,
    pub nickname: String,
    pub middle_initial: String,
    pub uss_number: String,
    pub id: String,
    pub swimmer_id_team: u32,
    pub birth: String,
    pub age: u32,
    pub unknown1: u32,
    pub unknown2: String,
    pub n: String,
}

impl Record for SwimmerInfo {
    const LAYOUT: &'static RecordLayout = &layout::SWIMMER_INFO;

    fn decode(f: &FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            gender: f.optional_code("gender")?,
            swimmer_id_event: f.int("swimmer_id_event")?,
            last_name: f.string("last_name")?,
            first_name: f.string("first_name")?,
            nickname: f.string("nickname")?,
            middle_initial: f.string("middle_initial")?,
            uss_number: f.string("uss_number")?,
            id: f.string("id")?,
            swimmer_id_team: f.int("swimmer_id_team")?,
            birth: f.string("birth")?,
            age: f.int("age")?,
            unknown1: f.int("unknown1")?,
            unknown2: f.string("unknown2")?,
            n: f.string("n")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter) -> Result<()> {
        w.code("gender", gender_code(self.gender))?;
        w.int("swimmer_id_event", self.swimmer_id_event)?;
        w.string("last_name", &self.last_name)?;
        w.string("first_name", &self.first_name)?;
        w.string("nickname", &self.nickname)?;
        w.string("middle_initial", &self.middle_initial)?;
        w.string("uss_number", &self.uss_number)?;
        w.string("id", &self.id)?;
        w.int("swimmer_id_team", self.swimmer_id_team)?;
        w.string("birth", &self.birth)?;
        w.int("age", self.age)?;
        w.int("unknown1", self.unknown1)?;
        w.string("unknown2", &self.unknown2)?;
        w.string("n", &self.n)
    }
}

/// `E1`: a swimmer's entry into one individual event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualEntry {
    pub gender: Option<Gender>,
    pub swimmer_id_event: u32,
    pub swimmer_abbr: String,
    pub gender1: Option<Gender>,
    pub gender2: Option<Gender>,
    pub distance: u32,
    pub stroke: Stroke,
    pub age_lower: String,
    pub age_upper: String,
    pub unknown1: String,
    pub event_fee: f32,
    /// Event number as declared in the meet's event table.
    pub event_number: String,
    pub conversion_seed_time_1: Time,
    pub conversion_course_1: String,
    /// Seed time used for ranking.
    pub seed_time_1: Time,
    pub seed_course_1: String,
    pub conversion_seed_time_2: Time,
    pub conversion_course_2: String,
    pub seed_time_2: Time,
    pub seed_course_2: String,
    pub unknown2: String,
    pub unknown3: String,
    /// `E2` record and its children, when the swim has been seeded or swum.
    pub result: Option<IndividualResult>,
}

impl IndividualEntry {
    /// An unseeded entry with every other field blank.
    pub fn new(event_number: impl Into<String>, stroke: Stroke, distance: u32) -> Self {
        Self {
            gender: None,
            swimmer_id_event: 0,
            swimmer_abbr: String::new(),
            gender1: None,
            gender2: None,
            distance,
            stroke,
            age_lower: String::new(),
            age_upper: String::new(),
            unknown1: String::new(),
            event_fee: 0.0,
            event_number: event_number.into(),
            conversion_seed_time_1: Time::ZERO,
            conversion_course_1: String::new(),
            seed_time_1: Time::ZERO,
            seed_course_1: String::new(),
            conversion_seed_time_2: Time::ZERO,
            conversion_course_2: String::new(),
            seed_time_2: Time::ZERO,
            seed_course_2: String::new(),
            unknown2: String::new(),
            unknown3: String::new(),
            result: None,
        }
    }
}

impl Record for IndividualEntry {
    const LAYOUT: &'static RecordLayout = &layout::INDIVIDUAL_ENTRY;

    fn decode(f: &FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            gender: f.optional_code("gender")?,
            swimmer_id_event: f.int("swimmer_id_event")?,
            swimmer_abbr: f.string("swimmer_abbr")?,
            gender1: f.optional_code("gender1")?,
            gender2: f.optional_code("gender2")?,
            distance: f.int("distance")?,
            stroke: f.stroke("stroke")?,
            age_lower: f.string("age_lower")?,
            age_upper: f.string("age_upper")?,
            unknown1: f.string("unknown1")?,
            event_fee: f.float("event_fee")?,
            event_number: f.string("event_number")?,
            conversion_seed_time_1: f.time("conversion_seed_time_1")?,
            conversion_course_1: f.string("conversion_course_1")?,
            seed_time_1: f.time("seed_time_1")?,
            seed_course_1: f.string("seed_course_1")?,
            conversion_seed_time_2: f.time("conversion_seed_time_2")?,
            conversion_course_2: f.string("conversion_course_2")?,
            seed_time_2: f.time("seed_time_2")?,
            seed_course_2: f.string("seed_course_2")?,
            unknown2: f.string("unknown2")?,
            unknown3: f.string("unknown3")?,
            result: None,
        })
    }

    fn encode(&self, w: &mut FieldWriter) -> Result<()> {
        w.code("gender", gender_code(self.gender))?;
        w.int("swimmer_id_event", self.swimmer_id_event)?;
        w.string("swimmer_abbr", &self.swimmer_abbr)?;
        w.code("gender1", gender_code(self.gender1))?;
        w.code("gender2", gender_code(self.gender2))?;
        w.int("distance", self.distance)?;
        w.stroke("stroke", self.stroke)?;
        w.string("age_lower", &self.age_lower)?;
        w.string("age_upper", &self.age_upper)?;
        w.string("unknown1", &self.unknown1)?;
        w.float("event_fee", self.event_fee)?;
        w.raw("event_number", &self.event_number)?;
        w.time("conversion_seed_time_1", self.conversion_seed_time_1)?;
        w.string("conversion_course_1", &self.conversion_course_1)?;
        w.time("seed_time_1", self.seed_time_1)?;
        w.string("seed_course_1", &self.seed_course_1)?;
        w.time("conversion_seed_time_2", self.conversion_seed_time_2)?;
        w.string("conversion_course_2", &self.conversion_course_2)?;
        w.time("seed_time_2", self.seed_time_2)?;
        w.string("seed_course_2", &self.seed_course_2)?;
        w.string("unknown2", &self.unknown2)?;
        w.string("unknown3", &self.unknown3)
    }
}

const READING_FIELDS: [&str; 5] = ["time1", "time2", "time3", "time4", "time5"];

/// `E2`: the outcome (or seeding) of one swim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndividualResult {
    pub classification: Option<Classification>,
    pub time: Time,
    pub length_unit: String,
    pub time_code: TimeCode,
    pub unknown1: String,
    pub heat: u32,
    pub lane: u32,
    pub place_in_heat: u32,
    pub place_overall: u32,
    pub unknown2: u32,
    /// Raw timing-system (pad and plunger) readings.
    pub readings: [Time; 5],
    pub reaction_time: ReactionTime,
    pub unknown3: String,
    pub unknown4: String,
    pub day_of_event: String,
    pub unknown5: u32,
    pub splits: Vec<Splits>,
    pub dq: Option<DqDescription>,
}

impl IndividualResult {
    /// Seeding stub: heat and lane only, every timing field zero.
    pub fn seeded(heat: u32, lane: u32) -> Self {
        Self {
            heat,
            lane,
            ..Self::default()
        }
    }
}

impl Record for IndividualResult {
    const LAYOUT: &'static RecordLayout = &layout::INDIVIDUAL_RESULT;

    fn decode(f: &FieldReader<'_>) -> Result<Self> {
        let mut readings = [Time::ZERO; 5];
        for (reading, name) in readings.iter_mut().zip(READING_FIELDS) {
            *reading = f.time(name)?;
        }
        Ok(Self {
            classification: f.optional_code("classification")?,
            time: f.time("time")?,
            length_unit: f.string("length_unit")?,
            time_code: f.code("time_code")?,
            unknown1: f.string("unknown1")?,
            heat: f.int("heat")?,
            lane: f.int("lane")?,
            place_in_heat: f.int("place_in_heat")?,
            place_overall: f.int("place_overall")?,
            unknown2: f.int("unknown2")?,
            readings,
            reaction_time: f.reaction_time("reaction_time")?,
            unknown3: f.string("unknown3")?,
            unknown4: f.string("unknown4")?,
            day_of_event: f.string("day_of_event")?,
            unknown5: f.int("unknown5")?,
            splits: Vec::new(),
            dq: None,
        })
    }

    fn encode(&self, w: &mut FieldWriter) -> Result<()> {
        w.code(
            "classification",
            self.classification.as_ref().map(Classification::code),
        )?;
        w.time("time", self.time)?;
        w.string("length_unit", &self.length_unit)?;
        w.code("time_code", Some(self.time_code.code()))?;
        w.string("unknown1", &self.unknown1)?;
        w.int("heat", self.heat)?;
        w.int("lane", self.lane)?;
        w.int("place_in_heat", self.place_in_heat)?;
        w.int("place_overall", self.place_overall)?;
        w.int("unknown2", self.unknown2)?;
        for (reading, name) in self.readings.iter().zip(READING_FIELDS) {
            w.time(name, *reading)?;
        }
        w.reaction_time("reaction_time", self.reaction_time)?;
        w.string("unknown3", &self.unknown3)?;
        w.string("unknown4", &self.unknown4)?;
        w.string("day_of_event", &self.day_of_event)?;
        w.int("unknown5", self.unknown5)
    }
}

/// One cumulative split inside a `G1` line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitTime {
    pub marker: String,
    /// Lap count at which the split was taken (2, 4, 6...).
    pub length: u32,
    pub time: Time,
}

impl SplitTime {
    pub fn new(length: u32, time: Time) -> Self {
        Self {
            marker: String::new(),
            length,
            time,
        }
    }
}

impl Record for SplitTime {
    const LAYOUT: &'static RecordLayout = &layout::SPLIT_TIME;

    fn decode(f: &FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            marker: f.string("marker")?,
            length: f.int("length")?,
            time: f.time("time")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter) -> Result<()> {
        w.string("marker", &self.marker)?;
        w.int("length", self.length)?;
        w.time("time", self.time)
    }
}

/// `G1`: up to eleven split times.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Splits {
    pub times: Vec<SplitTime>,
}

impl Record for Splits {
    const LAYOUT: &'static RecordLayout = &layout::SPLITS;

    fn decode(f: &FieldReader<'_>) -> Result<Self> {
        let field = f.bytes("times")?;
        let used = field
            .iter()
            .rposition(|&b| b != b' ')
            .map_or(0, |last| last + 1);
        let times = field[..used]
            .chunks(SPLIT_LEN)
            .map(|chunk| SplitTime::decode_line(chunk, f.line_number()))
            .collect::<Result<_>>()?;
        Ok(Self { times })
    }

    fn encode(&self, w: &mut FieldWriter) -> Result<()> {
        let mut encoded = Vec::with_capacity(self.times.len() * SPLIT_LEN);
        for split in &self.times {
            encoded.extend(split.encode_line()?);
        }
        w.raw("times", &latin1_decode(&encoded))
    }
}

/// `H1`: disqualification code and reason.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqDescription {
    pub code: String,
    pub description: String,
}

impl Record for DqDescription {
    const LAYOUT: &'static RecordLayout = &layout::DQ_DESCRIPTION;

    fn decode(f: &FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            code: f.string("code")?,
            description: f.string("description")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter) -> Result<()> {
        w.string("code", &self.code)?;
        w.string("description", &self.description)
    }
}

/// `F1`: relay entry. Decodable on its own; not attached to the tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelayEntry {
    pub team_abbr: String,
    pub relay_team: String,
    pub gender: Option<Gender>,
    pub gender1: Option<Gender>,
    pub gender2: Option<Gender>,
    pub distance: u32,
    pub stroke: String,
    pub age_lower: String,
    pub age_upper: String,
    pub event_fee: f32,
    pub event_number: String,
    pub seed_time_1: String,
    pub seed_course_1: String,
    pub seed_time_2: String,
    pub seed_course_2: String,
}

impl Record for RelayEntry {
    const LAYOUT: &'static RecordLayout = &layout::RELAY_ENTRY;

    fn decode(f: &FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            team_abbr: f.string("team_abbr")?,
            relay_team: f.string("relay_team")?,
            gender: f.optional_code("gender")?,
            gender1: f.optional_code("gender1")?,
            gender2: f.optional_code("gender2")?,
            distance: f.int("distance")?,
            stroke: f.string("stroke")?,
            age_lower: f.string("age_lower")?,
            age_upper: f.string("age_upper")?,
            event_fee: f.float("event_fee")?,
            event_number: f.string("event_number")?,
            seed_time_1: f.string("seed_time_1")?,
            seed_course_1: f.string("seed_course_1")?,
            seed_time_2: f.string("seed_time_2")?,
            seed_course_2: f.string("seed_course_2")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter) -> Result<()> {
        w.string("team_abbr", &self.team_abbr)?;
        w.string("relay_team", &self.relay_team)?;
        w.code("gender", gender_code(self.gender))?;
        w.code("gender1", gender_code(self.gender1))?;
        w.code("gender2", gender_code(self.gender2))?;
        w.int("distance", self.distance)?;
        w.string("stroke", &self.stroke)?;
        w.string("age_lower", &self.age_lower)?;
        w.string("age_upper", &self.age_upper)?;
        w.float("event_fee", self.event_fee)?;
        w.raw("event_number", &self.event_number)?;
        w.string("seed_time_1", &self.seed_time_1)?;
        w.string("seed_course_1", &self.seed_course_1)?;
        w.string("seed_time_2", &self.seed_time_2)?;
        w.string("seed_course_2", &self.seed_course_2)
    }
}

/// `F2`: relay result. Decodable on its own; not attached to the tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelayResult {
    pub classification: Option<Classification>,
    pub time: String,
    pub length_unit: String,
    pub time_code: String,
    pub unknown1: String,
    pub heat: u32,
    pub lane: u32,
    pub place_in_heat: u32,
    pub place_overall: u32,
    pub readings: [Time; 5],
    pub day_of_event: String,
}

impl Record for RelayResult {
    const LAYOUT: &'static RecordLayout = &layout::RELAY_RESULT;

    fn decode(f: &FieldReader<'_>) -> Result<Self> {
        let mut readings = [Time::ZERO; 5];
        for (reading, name) in readings.iter_mut().zip(READING_FIELDS) {
            *reading = f.time(name)?;
        }
        Ok(Self {
            classification: f.optional_code("classification")?,
            time: f.string("time")?,
            length_unit: f.string("length_unit")?,
            time_code: f.string("time_code")?,
            unknown1: f.string("unknown1")?,
            heat: f.int("heat")?,
            lane: f.int("lane")?,
            place_in_heat: f.int("place_in_heat")?,
            place_overall: f.int("place_overall")?,
            readings,
            day_of_event: f.string("day_of_event")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter) -> Result<()> {
        w.code(
            "classification",
            self.classification.as_ref().map(Classification::code),
        )?;
        w.string("time", &self.time)?;
        w.string("length_unit", &self.length_unit)?;
        w.string("time_code", &self.time_code)?;
        w.string("unknown1", &self.unknown1)?;
        w.int("heat", self.heat)?;
        w.int("lane", self.lane)?;
        w.int("place_in_heat", self.place_in_heat)?;
        w.int("place_overall", self.place_overall)?;
        for (reading, name) in self.readings.iter().zip(READING_FIELDS) {
            w.time(name, *reading)?;
        }
        w.string("day_of_event", &self.day_of_event)
    }
}

/// One swimmer slot of a relay line-up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelayLeg {
    pub gender: Option<Gender>,
    pub id: u32,
    pub abbr: String,
    pub gender_x: Option<Gender>,
    pub leg: u32,
}

const LEG_FIELDS: [[&str; 5]; 4] = [
    ["gender1", "id1", "abbr1", "gender1x", "leg1"],
    ["gender2", "id2", "abbr2", "gender2x", "leg2"],
    ["gender3", "id3", "abbr3", "gender3x", "leg3"],
    ["gender4", "id4", "abbr4", "gender4x", "leg4"],
];

/// `F3`: the four swimmers of a relay. Not attached to the tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelayLineUp {
    pub legs: [RelayLeg; 4],
}

impl Record for RelayLineUp {
    const LAYOUT: &'static RecordLayout = &layout::RELAY_LINEUP;

    fn decode(f: &FieldReader<'_>) -> Result<Self> {
        let mut line_up = Self::default();
        for (leg, [gender, id, abbr, gender_x, number]) in
            line_up.legs.iter_mut().zip(LEG_FIELDS)
        {
            *leg = RelayLeg {
                gender: f.optional_code(gender)?,
                id: f.int(id)?,
                abbr: f.string(abbr)?,
                gender_x: f.optional_code(gender_x)?,
                leg: f.int(number)?,
            };
        }
        Ok(line_up)
    }

    fn encode(&self, w: &mut FieldWriter) -> Result<()> {
        for (leg, [gender, id, abbr, gender_x, number]) in self.legs.iter().zip(LEG_FIELDS) {
            w.code(gender, gender_code(leg.gender))?;
            w.int(id, leg.id)?;
            w.string(abbr, &leg.abbr)?;
            w.code(gender_x, gender_code(leg.gender_x))?;
            w.int(number, leg.leg)?;
        }
        Ok(())
    }
}

/// A swimmer and their individual entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Swimmer {
    pub info: SwimmerInfo,
    pub entries: Vec<IndividualEntry>,
}

/// A team and its roster.
///
/// A team without a name record is dropped on encode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: Option<TeamName>,
    pub address: Option<TeamAddress>,
    pub contact: Option<TeamContact>,
    pub swimmers: Vec<Swimmer>,
}

/// Non-owning position of an individual entry inside a [`Hy3Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryRef {
    pub team: usize,
    pub swimmer: usize,
    pub entry: usize,
}

/// A parsed HY3 file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hy3Document {
    pub file_descriptor: Option<FileDescriptor>,
    pub meet_info: Option<MeetInfo>,
    pub meet_address: Option<MeetAddress>,
    pub meet_contact: Option<MeetContact>,
    pub teams: Vec<Team>,
}

impl Hy3Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every swimmer in team order.
    pub fn swimmers(&self) -> impl Iterator<Item = &Swimmer> {
        self.teams.iter().flat_map(|team| team.swimmers.iter())
    }

    /// Number of swimmers across all teams.
    pub fn swimmer_count(&self) -> usize {
        self.teams.iter().map(|team| team.swimmers.len()).sum()
    }

    /// Number of individual entries across all swimmers.
    pub fn entry_count(&self) -> usize {
        self.swimmers().map(|swimmer| swimmer.entries.len()).sum()
    }

    /// Positions of every individual entry, in document order.
    pub fn entry_refs(&self) -> Vec<EntryRef> {
        let mut refs = Vec::with_capacity(self.entry_count());
        for (t, team) in self.teams.iter().enumerate() {
            for (s, swimmer) in team.swimmers.iter().enumerate() {
                for e in 0..swimmer.entries.len() {
                    refs.push(EntryRef {
                        team: t,
                        swimmer: s,
                        entry: e,
                    });
                }
            }
        }
        refs
    }

    /// Swimmer owning the referenced entry.
    pub fn swimmer(&self, at: EntryRef) -> Option<&Swimmer> {
        self.teams.get(at.team)?.swimmers.get(at.swimmer)
    }

    pub fn entry(&self, at: EntryRef) -> Option<&IndividualEntry> {
        self.swimmer(at)?.entries.get(at.entry)
    }

    pub fn entry_mut(&mut self, at: EntryRef) -> Option<&mut IndividualEntry> {
        self.teams
            .get_mut(at.team)?
            .swimmers
            .get_mut(at.swimmer)?
            .entries
            .get_mut(at.entry)
    }

    /// First swimmer whose `D1` id matches.
    pub fn find_swimmer_by_id(&self, id: &str) -> Option<&Swimmer> {
        self.swimmers().find(|swimmer| swimmer.info.id == id)
    }
}

impl Splits {
    /// Build a group from `(lap length, time)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, Time)>) -> Self {
        Self {
            times: pairs
                .into_iter()
                .map(|(length, time)| SplitTime::new(length, time))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Hy3Error;

    fn content(parts: &[(usize, &str)]) -> Vec<u8> {
        let mut buf = vec![b' '; 128];
        for (col, text) in parts {
            buf[col - 1..col - 1 + text.len()].copy_from_slice(text.as_bytes());
        }
        buf
    }

    #[test]
    fn test_decode_entry() {
        let line = content(&[
            (1, "E1"),
            (3, "F"),
            (6, "123"),
            (9, "SMITH"),
            (14, "FF"),
            (19, "100"),
            (22, "1"),
            (24, "09"),
            (27, "10"),
            (35, "5.00"),
            (42, "7"),
            (47, "0.00"),
            (55, "62.30"),
            (60, "S"),
        ]);
        let entry = IndividualEntry::decode_line(&line, 4).unwrap();
        assert_eq!(entry.gender, Some(Gender::Female));
        assert_eq!(entry.swimmer_id_event, 123);
        assert_eq!(entry.distance, 100);
        assert_eq!(entry.stroke, Stroke::Freestyle);
        assert_eq!(entry.age_lower, "09");
        assert_eq!(entry.event_fee, 5.0);
        assert_eq!(entry.event_number, "7");
        assert_eq!(entry.seed_time_1.to_string(), "1:02.30");
        assert_eq!(entry.seed_course_1, "S");
        assert!(entry.result.is_none());
    }

    #[test]
    fn test_entry_with_bad_stroke_fails() {
        let line = content(&[(1, "E1"), (19, "100"), (22, "9")]);
        let err = IndividualEntry::decode_line(&line, 12).unwrap_err();
        assert!(matches!(err, Hy3Error::FieldDecode { line: 12, field: "stroke", .. }));
    }

    #[test]
    fn test_result_encoding() {
        let mut result = IndividualResult::seeded(2, 3);
        result.classification = Some(Classification::Finals);
        result.time_code = TimeCode::Scratch;
        let line = result.encode_line().unwrap();
        assert_eq!(&line[..3], b"E2F");
        assert_eq!(&line[3..11], b"    0.00");
        assert_eq!(&line[12..15], b"  S");
        assert_eq!(&line[20..26], b"  2  3");
        assert!(line[36..82].iter().all(|&b| b == b' '));

        let back = IndividualResult::decode_line(&line, 1).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_splits_parse_until_field_exhausted() {
        let mut line = b"G1".to_vec();
        line.extend_from_slice(b"F 2   35.12F 4 1:14.00");
        // second sub-record holds a display time and must fail
        assert!(Splits::decode_line(&line, 1).is_err());

        let mut line = b"G1".to_vec();
        line.extend_from_slice(b"F 2   35.12F 4   74.00");
        let splits = Splits::decode_line(&line, 1).unwrap();
        assert_eq!(splits.times.len(), 2);
        assert_eq!(splits.times[1].length, 4);
        assert_eq!(splits.times[1].time.to_string(), "1:14.00");

        let empty = Splits::decode_line(b"G1", 1).unwrap();
        assert!(empty.times.is_empty());
    }

    #[test]
    fn test_splits_roundtrip_and_limit() {
        let splits = Splits::from_pairs((1..=11).map(|i| (i * 2, Time::from_hundredths(i * 3000))));
        let line = splits.encode_line().unwrap();
        assert_eq!(Splits::decode_line(&line, 1).unwrap(), splits);

        let too_many =
            Splits::from_pairs((1..=12).map(|i| (i * 2, Time::from_hundredths(i * 3000))));
        assert!(matches!(
            too_many.encode_line(),
            Err(Hy3Error::FieldEncode { field: "times", .. })
        ));
    }

    #[test]
    fn test_relay_lineup_roundtrip() {
        let mut line_up = RelayLineUp::default();
        for (i, leg) in line_up.legs.iter_mut().enumerate() {
            leg.gender = Some(Gender::Male);
            leg.id = 100 + i as u32;
            leg.abbr = format!("SW{i}");
            leg.leg = i as u32 + 1;
        }
        let line = line_up.encode_line().unwrap();
        assert_eq!(&line[..2], b"F3");
        assert_eq!(RelayLineUp::decode_line(&line, 1).unwrap(), line_up);
    }

    #[test]
    fn test_entry_refs_and_lookup() {
        let mut doc = Hy3Document::new();
        let mut swimmer = Swimmer::default();
        swimmer.info.id = "ABC".to_string();
        swimmer.entries.push(IndividualEntry::new("1", Stroke::Freestyle, 50));
        swimmer.entries.push(IndividualEntry::new("2", Stroke::Backstroke, 50));
        doc.teams.push(Team {
            name: Some(TeamName::default()),
            swimmers: vec![swimmer],
            ..Team::default()
        });

        let refs = doc.entry_refs();
        assert_eq!(refs.len(), 2);
        assert_eq!(doc.entry(refs[1]).unwrap().event_number, "2");
        assert_eq!(doc.swimmer(refs[0]).unwrap().info.id, "ABC");
        assert!(doc.find_swimmer_by_id("ABC").is_some());
        assert!(doc.find_swimmer_by_id("XYZ").is_none());

        doc.entry_mut(refs[0]).unwrap().result = Some(IndividualResult::seeded(1, 2));
        assert_eq!(doc.entry(refs[0]).unwrap().result.as_ref().unwrap().lane, 2);
        assert!(
            doc.entry(EntryRef {
                team: 0,
                swimmer: 0,
                entry: 5
            })
            .is_none()
        );
    }
}
