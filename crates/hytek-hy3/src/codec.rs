//! Generic fixed-width field codec.
//!
//! [`FieldReader`] decodes named fields out of a line according to a
//! [`RecordLayout`]; [`FieldWriter`] encodes named fields into a
//! space-filled buffer of the layout's width. Bytes map one-to-one onto
//! chars (Latin-1), so any line read from a file writes back unchanged.

use std::str::FromStr;

use hytek_model::{ModelError, ReactionTime, Stroke, Time};

use crate::error::{Hy3Error, Result};
use crate::layout::{FieldKind, FieldSpec, Justify, RecordLayout};

/// Decodes fields from one line (or sub-record).
pub struct FieldReader<'a> {
    layout: &'static RecordLayout,
    line: &'a [u8],
    line_number: usize,
}

impl<'a> FieldReader<'a> {
    /// Create a reader over `line`, where column 1 is `line[0]`.
    ///
    /// Columns past the end of `line` read as spaces.
    pub fn new(layout: &'static RecordLayout, line: &'a [u8], line_number: usize) -> Self {
        Self {
            layout,
            line,
            line_number,
        }
    }

    pub fn layout(&self) -> &'static RecordLayout {
        self.layout
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn spec(&self, name: &'static str) -> Result<&'static FieldSpec> {
        self.layout.field(name).ok_or(Hy3Error::UnknownField {
            record: self.layout.name,
            field: name,
        })
    }

    /// Untrimmed field text.
    fn slice(&self, spec: &FieldSpec) -> String {
        let range = spec.range();
        let end = range.end.min(self.line.len());
        let start = range.start.min(end);
        latin1_decode(&self.line[start..end])
    }

    fn decode_error(&self, spec: &FieldSpec, raw: &str, message: impl ToString) -> Hy3Error {
        Hy3Error::FieldDecode {
            line: self.line_number,
            record: self.layout.name,
            field: spec.name,
            raw: raw.to_string(),
            message: message.to_string(),
        }
    }

    /// Raw field bytes as text, without trimming.
    pub fn raw(&self, name: &'static str) -> Result<String> {
        let spec = self.spec(name)?;
        Ok(self.slice(spec))
    }

    /// Raw field bytes. Shorter than the field when the line ends early.
    pub fn bytes(&self, name: &'static str) -> Result<&'a [u8]> {
        let range = self.spec(name)?.range();
        let end = range.end.min(self.line.len());
        let start = range.start.min(end);
        Ok(&self.line[start..end])
    }

    /// Text field, trimmed on its padding side.
    pub fn string(&self, name: &'static str) -> Result<String> {
        let spec = self.spec(name)?;
        let raw = self.slice(spec);
        let value = match spec.justify {
            Justify::Left => raw.trim_end_matches(' '),
            Justify::Right => raw.trim_start_matches(' ').trim_end_matches(' '),
        };
        Ok(value.to_string())
    }

    /// Unsigned integer field; blank is zero.
    pub fn int(&self, name: &'static str) -> Result<u32> {
        let spec = self.spec(name)?;
        debug_assert_eq!(spec.kind, FieldKind::Int, "{}.{}", self.layout.name, name);
        let raw = self.slice(spec);
        let text = raw.trim();
        if text.is_empty() {
            return Ok(0);
        }
        text.parse()
            .map_err(|e: std::num::ParseIntError| self.decode_error(spec, &raw, e))
    }

    /// Decimal field; blank is zero.
    pub fn float(&self, name: &'static str) -> Result<f32> {
        let spec = self.spec(name)?;
        debug_assert_eq!(spec.kind, FieldKind::Float, "{}.{}", self.layout.name, name);
        let raw = self.slice(spec);
        let text = raw.trim();
        if text.is_empty() {
            return Ok(0.0);
        }
        match text.parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(value),
            Ok(_) => Err(self.decode_error(spec, &raw, "not a finite number")),
            Err(e) => Err(self.decode_error(spec, &raw, e)),
        }
    }

    /// Any of the race time kinds; blank is zero.
    pub fn time(&self, name: &'static str) -> Result<Time> {
        let spec = self.spec(name)?;
        debug_assert!(
            matches!(
                spec.kind,
                FieldKind::Time | FieldKind::DefaultTime | FieldKind::PlungerTime
            ),
            "{}.{}",
            self.layout.name,
            name
        );
        let raw = self.slice(spec);
        Time::from_fixed(&raw).map_err(|e| self.decode_error(spec, &raw, e))
    }

    /// Reaction time; blank is zero.
    pub fn reaction_time(&self, name: &'static str) -> Result<ReactionTime> {
        let spec = self.spec(name)?;
        let raw = self.slice(spec);
        ReactionTime::from_fixed(&raw).map_err(|e| self.decode_error(spec, &raw, e))
    }

    /// Stroke stored as its numeric code.
    pub fn stroke(&self, name: &'static str) -> Result<Stroke> {
        let spec = self.spec(name)?;
        let code = self.int(name)?;
        Stroke::from_code(code)
            .ok_or_else(|| self.decode_error(spec, &code.to_string(), "unknown stroke code"))
    }

    /// Code field parsed with [`FromStr`].
    pub fn code<T>(&self, name: &'static str) -> Result<T>
    where
        T: FromStr<Err = ModelError>,
    {
        let spec = self.spec(name)?;
        let raw = self.slice(spec);
        raw.trim()
            .parse()
            .map_err(|e| self.decode_error(spec, &raw, e))
    }

    /// Code field that may be blank.
    pub fn optional_code<T>(&self, name: &'static str) -> Result<Option<T>>
    where
        T: FromStr<Err = ModelError>,
    {
        let spec = self.spec(name)?;
        if self.slice(spec).trim().is_empty() {
            return Ok(None);
        }
        self.code(name).map(Some)
    }
}

/// Encodes fields into one line (or sub-record).
pub struct FieldWriter {
    layout: &'static RecordLayout,
    buf: Vec<u8>,
}

impl FieldWriter {
    /// Start a space-filled record, with the tag in columns 1-2 if the
    /// layout has one.
    pub fn new(layout: &'static RecordLayout) -> Self {
        let mut buf = vec![b' '; layout.width];
        if let Some(tag) = layout.tag {
            buf[..2].copy_from_slice(tag.code().as_bytes());
        }
        Self { layout, buf }
    }

    fn spec(&self, name: &'static str) -> Result<&'static FieldSpec> {
        self.layout.field(name).ok_or(Hy3Error::UnknownField {
            record: self.layout.name,
            field: name,
        })
    }

    /// Write `text` into the field, replacing all of its columns.
    fn put(&mut self, spec: &FieldSpec, text: &str, truncate: bool) -> Result<()> {
        let mut bytes = latin1_encode(text);
        let width = spec.width();
        if bytes.len() > width {
            if !truncate {
                return Err(Hy3Error::FieldEncode {
                    record: self.layout.name,
                    field: spec.name,
                    value: text.to_string(),
                    width,
                });
            }
            bytes.truncate(width);
        }

        let range = spec.range();
        let field = &mut self.buf[range];
        field.fill(b' ');
        let offset = match spec.justify {
            Justify::Left => 0,
            Justify::Right => width - bytes.len(),
        };
        field[offset..offset + bytes.len()].copy_from_slice(&bytes);
        Ok(())
    }

    /// Text field. Over-long text is truncated to the field width.
    pub fn string(&mut self, name: &'static str, value: &str) -> Result<()> {
        let spec = self.spec(name)?;
        self.put(spec, value, true)
    }

    /// Unsigned integer field.
    pub fn int(&mut self, name: &'static str, value: u32) -> Result<()> {
        let spec = self.spec(name)?;
        self.put(spec, &value.to_string(), false)
    }

    /// Decimal field in shortest form (`5`, `12.5`).
    pub fn float(&mut self, name: &'static str, value: f32) -> Result<()> {
        let spec = self.spec(name)?;
        self.put(spec, &value.to_string(), false)
    }

    /// Race time, rendered according to the field's time kind.
    pub fn time(&mut self, name: &'static str, value: Time) -> Result<()> {
        let spec = self.spec(name)?;
        let text = match spec.kind {
            FieldKind::DefaultTime => value.to_fixed_default(),
            FieldKind::PlungerTime => value.to_fixed_plunger(),
            _ => value.to_fixed(),
        };
        self.put(spec, &text, false)
    }

    /// Reaction time.
    pub fn reaction_time(&mut self, name: &'static str, value: ReactionTime) -> Result<()> {
        let spec = self.spec(name)?;
        self.put(spec, &value.to_fixed(), false)
    }

    /// Stroke as its numeric code.
    pub fn stroke(&mut self, name: &'static str, value: Stroke) -> Result<()> {
        self.int(name, value.code())
    }

    /// Code field; `None` leaves it blank.
    pub fn code(&mut self, name: &'static str, value: Option<&str>) -> Result<()> {
        let spec = self.spec(name)?;
        self.put(spec, value.unwrap_or(""), false)
    }

    /// Pre-encoded field content. Fails rather than truncating.
    pub fn raw(&mut self, name: &'static str, value: &str) -> Result<()> {
        let spec = self.spec(name)?;
        self.put(spec, value, false)
    }

    /// The encoded bytes (layout width).
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Decode bytes one-to-one as Latin-1 chars.
pub fn latin1_decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Encode chars one-to-one as bytes; chars outside Latin-1 become `?`.
pub fn latin1_encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| u8::try_from(u32::from(ch)).unwrap_or(b'?'))
        .collect()
}
