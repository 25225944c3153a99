//! Race time encodings.
//!
//! A [`Time`] is a non-negative number of seconds held as `f32`. It has two
//! text forms:
//!
//! | Form        | Zero | 83.45 s   | Used by                  |
//! |-------------|------|-----------|--------------------------|
//! | display     | `NT` | `1:23.45` | reports, result sheets   |
//! | fixed-width | `0.00` | `83.45` | HY3 record fields        |
//!
//! The fixed-width variants (default, plunger) only differ in how they
//! render zero; see [`Time::to_fixed_default`] and [`Time::to_fixed_plunger`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// A race time in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Time(f32);

impl Time {
    /// Not timed.
    pub const ZERO: Time = Time(0.0);

    /// Create a time from seconds. Negative input is clamped to zero.
    #[must_use]
    pub fn from_seconds(seconds: f32) -> Self {
        Self(seconds.max(0.0))
    }

    /// Create a time from a whole number of hundredths.
    #[must_use]
    pub fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths as f32 / 100.0)
    }

    /// Seconds as stored.
    #[must_use]
    pub fn seconds(self) -> f32 {
        self.0
    }

    /// Whole hundredths, rounded to the nearest.
    #[must_use]
    pub fn hundredths(self) -> u32 {
        (f64::from(self.0) * 100.0).round() as u32
    }

    /// True when the time is not set.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// Fixed-width form: always two decimals, zero is `0.00`.
    #[must_use]
    pub fn to_fixed(self) -> String {
        let h = self.hundredths();
        format!("{}.{:02}", h / 100, h % 100)
    }

    /// Default-time form: an explicit `0` literal for zero.
    #[must_use]
    pub fn to_fixed_default(self) -> String {
        if self.is_zero() {
            "0".to_string()
        } else {
            self.to_fixed()
        }
    }

    /// Plunger (backup) time form: zero leaves the field empty.
    #[must_use]
    pub fn to_fixed_plunger(self) -> String {
        if self.is_zero() {
            String::new()
        } else {
            self.to_fixed()
        }
    }

    /// Parse a fixed-width field: a plain decimal number of seconds.
    ///
    /// Empty text is zero. `NT` is a display form only and is rejected here.
    pub fn from_fixed(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Self::ZERO);
        }
        let seconds: f32 = trimmed
            .parse()
            .map_err(|_| ModelError::invalid_time(text))?;
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(ModelError::invalid_time(text));
        }
        Ok(Self(seconds))
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "NT");
        }
        let h = self.hundredths();
        let minutes = h / 6000;
        let rest = h % 6000;
        if minutes > 0 {
            write!(f, "{}:{:02}.{:02}", minutes, rest / 100, rest % 100)
        } else {
            write!(f, "{}.{:02}", rest / 100, rest % 100)
        }
    }
}

impl FromStr for Time {
    type Err = ModelError;

    /// Parse the display form (`NT`, `SS.HH`, `M:SS.HH`). Empty text is zero.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("NT") {
            return Ok(Self::ZERO);
        }

        let (minutes, seconds) = match trimmed.split_once(':') {
            Some((m, rest)) => {
                let minutes: u32 = m.parse().map_err(|_| ModelError::invalid_time(s))?;
                let seconds: f64 = rest.parse().map_err(|_| ModelError::invalid_time(s))?;
                if seconds >= 60.0 {
                    return Err(ModelError::invalid_time(s));
                }
                (minutes, seconds)
            }
            None => {
                let seconds: f64 = trimmed.parse().map_err(|_| ModelError::invalid_time(s))?;
                (0, seconds)
            }
        };
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(ModelError::invalid_time(s));
        }

        let hundredths = (f64::from(minutes) * 6000.0 + seconds * 100.0).round() as u32;
        Ok(Self::from_hundredths(hundredths))
    }
}

impl From<Time> for String {
    fn from(time: Time) -> Self {
        time.to_string()
    }
}

impl TryFrom<String> for Time {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// A reaction time in seconds, as read from the touch pads.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ReactionTime(pub f64);

impl ReactionTime {
    /// No reading.
    pub const ZERO: ReactionTime = ReactionTime(0.0);

    /// True when no reaction time was recorded.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// Fixed-width form.
    ///
    /// Zero is empty, values of ten or more are `0` followed by the integer
    /// part, anything smaller carries ten decimals.
    #[must_use]
    pub fn to_fixed(self) -> String {
        if self.is_zero() {
            String::new()
        } else if self.0 >= 10.0 {
            format!("0{}", self.0.trunc() as i64)
        } else {
            format!("{:.10}", self.0)
        }
    }

    /// Parse a fixed-width field. Empty text is zero.
    pub fn from_fixed(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Self::ZERO);
        }
        let value: f64 = trimmed
            .parse()
            .map_err(|_| ModelError::invalid_time(text))?;
        if !value.is_finite() || value < 0.0 {
            return Err(ModelError::invalid_time(text));
        }
        Ok(Self(value))
    }
}
