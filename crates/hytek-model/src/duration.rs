//! Duration literals used in HYV event lines.
//!
//! Qualifying and conversion times are written as unit-suffixed literals
//! such as `35.5s`, `1m5.23s` or `1h0m0s`. A literal is a sequence of
//! decimal numbers each followed by a unit (`h`, `m`, `s`, `ms`, `us`/`µs`,
//! `ns`). Output is truncated to 10 milliseconds, and a zero duration is
//! written as an empty field.

use std::time::Duration;

use crate::error::{ModelError, Result};

const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Parse a duration literal. Empty text is a zero duration.
pub fn parse_duration(text: &str) -> Result<Duration> {
    let s = text.trim();
    if s.is_empty() || s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.starts_with('-') {
        return Err(ModelError::invalid_duration(text, "negative duration"));
    }
    let mut rest = s.strip_prefix('+').unwrap_or(s);
    if rest.is_empty() {
        return Err(ModelError::invalid_duration(text, "missing value"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        if number.is_empty() || number == "." {
            return Err(ModelError::invalid_duration(text, "expected a number"));
        }

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        let scale = unit_nanos(unit)
            .ok_or_else(|| ModelError::invalid_duration(text, format!("unknown unit {unit:?}")))?;

        total = total
            .checked_add(scaled(number, scale).ok_or_else(|| {
                ModelError::invalid_duration(text, format!("invalid number {number:?}"))
            })?)
            .ok_or_else(|| ModelError::invalid_duration(text, "overflow"))?;
        rest = tail;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC)
        .map_err(|_| ModelError::invalid_duration(text, "overflow"))?;
    Ok(Duration::new(secs, (total % NANOS_PER_SEC) as u32))
}

/// Format a duration literal, truncated to 10 milliseconds.
///
/// Zero (after truncation) formats as an empty string.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis() / 10 * 10;
    if millis == 0 {
        return String::new();
    }
    if millis < 1000 {
        return format!("{millis}ms");
    }

    let hours = millis / 3_600_000;
    let minutes = (millis / 60_000) % 60;
    let seconds = (millis / 1000) % 60;
    let fraction = millis % 1000;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&seconds.to_string());
    if fraction > 0 {
        let digits = format!("{fraction:03}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out.push('s');
    out
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3600 * NANOS_PER_SEC),
        _ => None,
    }
}

/// Scale a decimal literal by a unit, truncating below one nanosecond.
fn scaled(number: &str, scale: u128) -> Option<u128> {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if fraction.contains('.') {
        return None;
    }
    let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut value = whole.checked_mul(scale)?;

    let mut place = scale;
    for digit in fraction.chars() {
        place /= 10;
        if place == 0 {
            break;
        }
        value = value.checked_add(u128::from(digit.to_digit(10)?) * place)?;
    }
    Some(value)
}
