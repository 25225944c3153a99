//! Code tables shared by both file formats.
//!
//! Every code type round-trips through [`FromStr`] and `code()`, so parsed
//! values are written back exactly as they were read.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Swimmer or event gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Mixed,
}

impl Gender {
    /// Single-letter file code.
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Mixed => "X",
        }
    }

    /// Label used on heat sheets.
    pub fn display_name(&self) -> &'static str {
        match self {
            Gender::Male => "Boys",
            Gender::Female => "Girls",
            Gender::Mixed => "Mixed",
        }
    }
}

impl FromStr for Gender {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "M" => Ok(Gender::Male),
            "F" => Ok(Gender::Female),
            "X" => Ok(Gender::Mixed),
            other => Err(ModelError::invalid_code("gender", other)),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Swimming stroke, stored in files as a numeric code 1-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stroke {
    Freestyle = 1,
    Backstroke = 2,
    Breaststroke = 3,
    Butterfly = 4,
    Medley = 5,
}

impl Stroke {
    pub const ALL: [Stroke; 5] = [
        Stroke::Freestyle,
        Stroke::Backstroke,
        Stroke::Breaststroke,
        Stroke::Butterfly,
        Stroke::Medley,
    ];

    /// Numeric file code.
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Look up a stroke by its numeric code.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|stroke| stroke.code() == code)
    }

    /// Human readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Stroke::Freestyle => "Freestyle",
            Stroke::Backstroke => "Backstroke",
            Stroke::Breaststroke => "Breaststroke",
            Stroke::Butterfly => "Butterfly",
            Stroke::Medley => "Medley",
        }
    }

    /// Look up a stroke by its name (as written in result tables).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|stroke| stroke.name().eq_ignore_ascii_case(name))
    }
}

impl FromStr for Stroke {
    type Err = ModelError;

    /// Accepts either the numeric code or the stroke name.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        trimmed
            .parse::<u32>()
            .ok()
            .and_then(Self::from_code)
            .or_else(|| Self::from_name(trimmed))
            .ok_or_else(|| ModelError::invalid_code("stroke", trimmed))
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Individual or relay event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Individual,
    Relay,
}

impl EventType {
    pub fn code(&self) -> &'static str {
        match self {
            EventType::Individual => "I",
            EventType::Relay => "R",
        }
    }

    pub fn is_relay(&self) -> bool {
        matches!(self, EventType::Relay)
    }
}

impl FromStr for EventType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "I" => Ok(EventType::Individual),
            "R" => Ok(EventType::Relay),
            other => Err(ModelError::invalid_code("event type", other)),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Prelim or final swim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Prelims,
    Finals,
}

impl Classification {
    pub fn code(&self) -> &'static str {
        match self {
            Classification::Prelims => "P",
            Classification::Finals => "F",
        }
    }
}

impl FromStr for Classification {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "P" => Ok(Classification::Prelims),
            "F" => Ok(Classification::Finals),
            other => Err(ModelError::invalid_code("classification", other)),
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome code attached to a swum time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeCode {
    /// Blank code: the time stands.
    #[default]
    Normal,
    Scratch,
    NoShow,
    FalseStart,
}

impl TimeCode {
    /// File code; `Normal` is blank.
    pub fn code(&self) -> &'static str {
        match self {
            TimeCode::Normal => "",
            TimeCode::Scratch => "S",
            TimeCode::NoShow => "R",
            TimeCode::FalseStart => "F",
        }
    }
}

impl FromStr for TimeCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" => Ok(TimeCode::Normal),
            "S" => Ok(TimeCode::Scratch),
            "R" => Ok(TimeCode::NoShow),
            "F" => Ok(TimeCode::FalseStart),
            other => Err(ModelError::invalid_code("time code", other)),
        }
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Pool course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Course {
    ShortMetres,
    ShortYards,
    LongMetres,
}

impl Course {
    pub fn code(&self) -> &'static str {
        match self {
            Course::ShortMetres => "S",
            Course::ShortYards => "SY",
            Course::LongMetres => "L",
        }
    }
}

impl FromStr for Course {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "S" => Ok(Course::ShortMetres),
            "SY" => Ok(Course::ShortYards),
            "L" => Ok(Course::LongMetres),
            other => Err(ModelError::invalid_code("course", other)),
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
