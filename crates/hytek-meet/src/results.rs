//! Tabular race results.
//!
//! A [`ResultRecord`] is one row of a results table: who swam, which race,
//! the finish time and up to eight split times. Rows are produced from a
//! seeded meet for timekeepers to fill in, and fed back into the HY3 tree
//! once the meet has been swum.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use hytek_hy3::{
    DqDescription, FileDescriptor, Hy3Document, IndividualEntry, IndividualResult, SplitTime,
    Splits, Swimmer,
};
use hytek_hyv::{HyvDocument, HyvEvent};
use hytek_model::{Classification, Course, Stroke, Time, TimeCode};

use crate::error::{MeetError, Result};
use crate::meet::Meet;

/// File type written to the descriptor of a results file.
pub const RESULTS_FILE_TYPE: &str = "07";

/// Lap length between consecutive split columns.
const SPLIT_LENGTH: u32 = 2;

/// One row of a results table. Column names follow the spreadsheet layout
/// used by timekeepers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Race")]
    pub race: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "Stroke")]
    pub stroke: Stroke,
    #[serde(rename = "Distance")]
    pub distance: u32,
    #[serde(rename = "Type")]
    pub classification: Option<Classification>,
    #[serde(rename = "Time")]
    pub time: Time,
    #[serde(rename = "Code")]
    pub time_code: TimeCode,
    #[serde(rename = "Split1")]
    pub split1: Time,
    #[serde(rename = "Split2")]
    pub split2: Time,
    #[serde(rename = "Split3")]
    pub split3: Time,
    #[serde(rename = "Split4")]
    pub split4: Time,
    #[serde(rename = "Split5")]
    pub split5: Time,
    #[serde(rename = "Split6")]
    pub split6: Time,
    #[serde(rename = "Split7")]
    pub split7: Time,
    #[serde(rename = "Split8")]
    pub split8: Time,
    #[serde(rename = "DQ description")]
    pub dq_description: String,
    #[serde(rename = "DQ code")]
    pub dq_code: String,
}

impl ResultRecord {
    /// Blank row for a swimmer in a race.
    pub fn new(id: impl Into<String>, stroke: Stroke, distance: u32) -> Self {
        Self {
            id: id.into(),
            race: String::new(),
            last_name: String::new(),
            first_name: String::new(),
            stroke,
            distance,
            classification: None,
            time: Time::ZERO,
            time_code: TimeCode::Normal,
            split1: Time::ZERO,
            split2: Time::ZERO,
            split3: Time::ZERO,
            split4: Time::ZERO,
            split5: Time::ZERO,
            split6: Time::ZERO,
            split7: Time::ZERO,
            split8: Time::ZERO,
            dq_description: String::new(),
            dq_code: String::new(),
        }
    }

    /// The eight split columns in order.
    pub fn split_times(&self) -> [Time; 8] {
        [
            self.split1,
            self.split2,
            self.split3,
            self.split4,
            self.split5,
            self.split6,
            self.split7,
            self.split8,
        ]
    }

    /// Fill the split columns from a list of times; extra times are dropped.
    pub fn set_split_times(&mut self, times: impl IntoIterator<Item = Time>) {
        let columns = [
            &mut self.split1,
            &mut self.split2,
            &mut self.split3,
            &mut self.split4,
            &mut self.split5,
            &mut self.split6,
            &mut self.split7,
            &mut self.split8,
        ];
        for (column, time) in columns.into_iter().zip(times) {
            *column = time;
        }
    }

    /// Split columns as an HY3 split group with lap lengths 2, 4, 6, ...
    ///
    /// The group ends at the first empty column; no columns, no group.
    pub fn splits(&self) -> Vec<Splits> {
        let times: Vec<SplitTime> = (1..)
            .zip(self.split_times())
            .take_while(|(_, time)| !time.is_zero())
            .map(|(lap, time)| SplitTime::new(lap * SPLIT_LENGTH, time))
            .collect();
        if times.is_empty() {
            Vec::new()
        } else {
            vec![Splits { times }]
        }
    }

    fn dq(&self) -> Option<DqDescription> {
        if self.dq_code.is_empty() && self.dq_description.is_empty() {
            return None;
        }
        Some(DqDescription {
            code: self.dq_code.clone(),
            description: self.dq_description.clone(),
        })
    }
}

/// One row per entry of every event that has entries, in event order.
pub fn meet_to_results(meet: &Meet, doc: &Hy3Document) -> Result<Vec<ResultRecord>> {
    let mut rows = Vec::with_capacity(meet.entry_count());
    for event in meet.events.iter().filter(|event| !event.is_empty()) {
        let definition = &event.definition;
        for entry in &event.entries {
            let (Some(swimmer), Some(hy3_entry)) = (doc.swimmer(entry.at), doc.entry(entry.at)) else {
                return Err(MeetError::StaleEntry { at: entry.at });
            };

            let mut row = ResultRecord::new(&swimmer.info.id, definition.stroke, definition.distance);
            row.race = definition.number.clone();
            row.last_name = swimmer.info.last_name.clone();
            row.first_name = swimmer.info.first_name.clone();
            row.classification = definition.classification;
            if let Some(result) = &hy3_entry.result {
                row.time = result.time;
                row.time_code = result.time_code;
                row.set_split_times(
                    result
                        .splits
                        .iter()
                        .flat_map(|group| group.times.iter().map(|split| split.time)),
                );
                if let Some(dq) = &result.dq {
                    row.dq_description = dq.description.clone();
                    row.dq_code = dq.code.clone();
                }
            }
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Length unit letter of a result swum in the meet's course.
fn length_unit(course: Course) -> &'static str {
    match course {
        Course::ShortMetres => "S",
        Course::ShortYards => "Y",
        Course::LongMetres => "L",
    }
}

/// Replace every swimmer's entries with the races they have results for.
///
/// Rows are matched to swimmers by id, and to events by stroke and
/// distance. A swimmer's existing entry for the race is kept (with its
/// result replaced); otherwise a new entry is built from the event
/// definition. Swimmers without rows end up with no entries, and rows for
/// swimmers not in the document are ignored. The file is marked as a
/// results file. Returns the number of rows applied.
///
/// Fails without modifying `doc` if a row matches no event.
pub fn apply_results(doc: &mut Hy3Document, hyv: &HyvDocument, results: &[ResultRecord]) -> Result<usize> {
    // per swimmer, one row per race; a later row for the same race wins
    let mut by_swimmer: HashMap<&str, Vec<&ResultRecord>> = HashMap::new();
    for row in results {
        let rows = by_swimmer.entry(row.id.as_str()).or_default();
        match rows
            .iter()
            .position(|r| r.stroke == row.stroke && r.distance == row.distance)
        {
            Some(index) => rows[index] = row,
            None => rows.push(row),
        }
    }

    let unit = length_unit(hyv.header.course);
    let mut rebuilt = Vec::with_capacity(doc.swimmer_count());
    for swimmer in doc.swimmers() {
        let rows = by_swimmer.get(swimmer.info.id.as_str()).map_or(&[][..], Vec::as_slice);
        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            let event = hyv
                .find_event(row.stroke, row.distance)
                .ok_or_else(|| MeetError::UnmatchedResult {
                    swimmer: row.id.clone(),
                    stroke: row.stroke,
                    distance: row.distance,
                })?;
            entries.push(result_entry(swimmer, event, row, unit));
        }
        rebuilt.push(entries);
    }

    let mut applied = 0;
    let swimmers = doc.teams.iter_mut().flat_map(|team| team.swimmers.iter_mut());
    for (swimmer, entries) in swimmers.zip(rebuilt) {
        applied += entries.len();
        swimmer.entries = entries;
    }
    doc.file_descriptor
        .get_or_insert_with(FileDescriptor::default)
        .file_type = RESULTS_FILE_TYPE.to_string();

    let ignored = results.len().saturating_sub(applied);
    tracing::debug!(applied, ignored, "applied results");
    Ok(applied)
}

fn result_entry(swimmer: &Swimmer, event: &HyvEvent, row: &ResultRecord, unit: &str) -> IndividualEntry {
    let mut entry = swimmer
        .entries
        .iter()
        .find(|e| e.stroke == row.stroke && e.distance == row.distance)
        .cloned()
        .unwrap_or_else(|| new_entry(swimmer, event, row));

    entry.result = Some(IndividualResult {
        classification: row.classification,
        time: row.time,
        time_code: row.time_code,
        length_unit: unit.to_string(),
        splits: row.splits(),
        dq: row.dq(),
        ..IndividualResult::default()
    });
    entry
}

fn new_entry(swimmer: &Swimmer, event: &HyvEvent, row: &ResultRecord) -> IndividualEntry {
    let mut entry = IndividualEntry::new(event.number.clone(), row.stroke, row.distance);
    entry.gender = event.gender;
    entry.gender1 = event.gender;
    entry.gender2 = event.gender;
    entry.swimmer_id_event = swimmer.info.swimmer_id_event;
    entry.swimmer_abbr = swimmer.info.last_name.chars().take(5).collect();
    entry.age_lower = format!("{:03}", event.min_age);
    entry.age_upper = format!("{:03}", event.max_age);
    entry.unknown2 = "NN".to_string();
    entry.unknown3 = "N".to_string();
    entry
}
