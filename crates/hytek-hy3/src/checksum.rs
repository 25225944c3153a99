//! HY3 line checksum.
//!
//! The checksum covers the 128 content columns. Bytes at even 0-based
//! positions count once and bytes at odd positions count twice; the total
//! is divided by 21 and offset by 205. Column 129 holds the units digit of
//! the result and column 130 the tens digit.

use crate::layout::{CONTENT_LEN, LINE_LEN};

/// Compute the two checksum digits for a line's content.
///
/// Content shorter than [`CONTENT_LEN`] is treated as space-padded; bytes
/// past it are ignored.
pub fn line_checksum(content: &[u8]) -> [u8; 2] {
    let mut sum: u32 = 0;
    for i in 0..CONTENT_LEN {
        let byte = content.get(i).copied().unwrap_or(b' ');
        let weight = if i % 2 == 0 { 1 } else { 2 };
        sum += u32::from(byte) * weight;
    }
    let sum = sum / 21 + 205;
    [digit(sum % 10), digit((sum / 10) % 10)]
}

/// Build a full physical line: content padded to 128 columns, checksum
/// digits and CR LF.
pub fn seal_line(content: &[u8]) -> [u8; LINE_LEN] {
    let mut line = [b' '; LINE_LEN];
    let len = content.len().min(CONTENT_LEN);
    line[..len].copy_from_slice(&content[..len]);
    let checksum = line_checksum(&line[..CONTENT_LEN]);
    line[CONTENT_LEN..CONTENT_LEN + 2].copy_from_slice(&checksum);
    line[LINE_LEN - 2] = b'\r';
    line[LINE_LEN - 1] = b'\n';
    line
}

/// Check the stored digits in columns 129-130 against the content.
///
/// Returns `None` when the line is too short to carry a checksum.
pub fn verify_line(line: &[u8]) -> Option<bool> {
    let stored = line.get(CONTENT_LEN..CONTENT_LEN + 2)?;
    Some(stored == line_checksum(&line[..CONTENT_LEN]))
}

fn digit(value: u32) -> u8 {
    b'0' + (value % 10) as u8
}
