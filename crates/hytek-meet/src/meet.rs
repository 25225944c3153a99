//! Meet assembly: HYV events joined with HY3 entries.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use hytek_hy3::{EntryRef, Hy3Document};
use hytek_hyv::{HyvDocument, HyvEvent};
use hytek_model::{Course, Stroke, Time};

use crate::error::{MeetError, Result};

/// One swimmer's entry into an event.
///
/// The entry itself stays in the HY3 document; this holds its position
/// plus the values entries are ranked by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub at: EntryRef,
    pub swimmer_id: String,
    pub seed_time: Time,
    pub age: u32,
}

/// Seed order: fastest first, zero seeds last, older swimmer first on ties.
pub fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    match (a.seed_time.is_zero(), b.seed_time.is_zero()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => a
            .seed_time
            .seconds()
            .total_cmp(&b.seed_time.seconds())
            .then_with(|| b.age.cmp(&a.age)),
    }
}

/// Stable sort into seed order.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(compare_entries);
}

/// An event definition with the entries attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub definition: HyvEvent,
    pub entries: Vec<Entry>,
}

impl Event {
    pub fn new(definition: HyvEvent) -> Self {
        Self {
            definition,
            entries: Vec::new(),
        }
    }

    pub fn number(&self) -> &str {
        &self.definition.number
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A meet built from an HYV event table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meet {
    pub description: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub age_up: NaiveDate,
    pub course: Course,
    pub location: String,
    pub events: Vec<Event>,
}

impl Meet {
    /// Create a meet with every HYV event and no entries.
    pub fn from_hyv(doc: &HyvDocument) -> Self {
        let header = &doc.header;
        Self {
            description: header.description.clone(),
            start: header.start,
            end: header.end,
            age_up: header.age_up,
            course: header.course,
            location: header.location.clone(),
            events: doc.events.iter().cloned().map(Event::new).collect(),
        }
    }

    /// Attach every individual entry of `doc` to its event, then put each
    /// event's entries in seed order.
    ///
    /// Fails on the first entry whose event number the meet does not
    /// define; no event is modified in that case.
    pub fn populate_entries(&mut self, doc: &Hy3Document) -> Result<()> {
        // later definitions of a number shadow earlier ones
        let by_number: HashMap<&str, usize> = self
            .events
            .iter()
            .enumerate()
            .map(|(index, event)| (event.number(), index))
            .collect();

        let mut attached = Vec::with_capacity(doc.entry_count());
        for at in doc.entry_refs() {
            let (Some(swimmer), Some(entry)) = (doc.swimmer(at), doc.entry(at)) else {
                return Err(MeetError::StaleEntry { at });
            };
            let Some(&index) = by_number.get(entry.event_number.as_str()) else {
                return Err(MeetError::UnknownEvent {
                    number: entry.event_number.clone(),
                    swimmer: format!("{}, {}", swimmer.info.last_name, swimmer.info.first_name),
                });
            };
            attached.push((
                index,
                Entry {
                    at,
                    swimmer_id: swimmer.info.id.clone(),
                    seed_time: entry.seed_time_1,
                    age: swimmer.info.age,
                },
            ));
        }

        let count = attached.len();
        for (index, entry) in attached {
            self.events[index].entries.push(entry);
        }
        for event in &mut self.events {
            sort_entries(&mut event.entries);
        }
        tracing::debug!(entries = count, events = self.events.len(), "populated meet entries");
        Ok(())
    }

    /// Combine events that share stroke and distance (typically the age
    /// groups of one race) into one event each, in first-seen order.
    ///
    /// Each combined event copies the definition of its first member and
    /// holds every member's entries in seed order.
    pub fn merge_age_groups(&self) -> Vec<Event> {
        let mut merged: Vec<Event> = Vec::new();
        let mut slots: HashMap<(u32, Stroke), usize> = HashMap::new();
        for event in &self.events {
            let key = (event.definition.distance, event.definition.stroke);
            let index = *slots.entry(key).or_insert_with(|| {
                merged.push(Event::new(event.definition.clone()));
                merged.len() - 1
            });
            merged[index].entries.extend(event.entries.iter().cloned());
        }
        for event in &mut merged {
            sort_entries(&mut event.entries);
        }
        merged
    }

    pub fn event(&self, number: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.number() == number)
    }

    /// Total entries across all events.
    pub fn entry_count(&self) -> usize {
        self.events.iter().map(|event| event.entries.len()).sum()
    }
}
