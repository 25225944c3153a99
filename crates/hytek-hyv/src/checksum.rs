//! HYV line checksums.
//!
//! The token is built from the character codes of every field (separators
//! excluded): the sum is divided by 7, offset by 205 and written as at least
//! four digits `c`. The token is `c[3] c[0] c[1] c[2]` followed by the
//! character holding the third byte of the line it seals.

/// Compute the checksum token for a line without its checksum field.
pub fn line_checksum(line: &str) -> String {
    let sum: u32 = line
        .split(';')
        .flat_map(str::chars)
        .map(u32::from)
        .sum();
    let digits = format!("{:04}", sum / 7 + 205);

    let mut token = String::with_capacity(5);
    token.push_str(&digits[3..4]);
    token.push_str(&digits[..3]);
    token.extend(third_byte_char(line));
    token
}

/// The character covering byte offset 2, if the line is that long.
fn third_byte_char(line: &str) -> Option<char> {
    line.char_indices()
        .find(|&(start, c)| start + c.len_utf8() > 2)
        .map(|(_, c)| c)
}

/// Check a token against the line it claims to seal.
pub fn verify(line: &str, token: &str) -> bool {
    line_checksum(line) == token
}
