//! Ban line parsing.
//!
//! A data line is colon separated and comes in two shapes:
//! - `subject:expiration`
//! - `admin:subject:expiration`
//!
//! The expiration field may carry annotations before the timestamp; only the
//! run of ASCII digits at the very end of the field is used.

use crate::domain::model::{BanFormat, BanRecord};
use crate::utils::error::BanParseError;

pub const COMMENT_PREFIX: &str = "//";
pub const SEGMENT_DELIMITER: char = ':';

/// Returns the maximal suffix of `text` made only of ASCII digits.
pub fn trailing_digits(text: &str) -> &str {
    let start = text
        .bytes()
        .rposition(|b| !b.is_ascii_digit())
        .map_or(0, |i| i + 1);
    &text[start..]
}

/// Parses the trailing digit run of `text` as a Unix timestamp.
pub fn parse_expiration(text: &str) -> Result<i64, BanParseError> {
    let digits = trailing_digits(text);
    if digits.is_empty() {
        return Err(BanParseError::NoTrailingDigits {
            text: text.to_string(),
        });
    }

    digits
        .parse::<i64>()
        .map_err(|source| BanParseError::InvalidTimestamp {
            digits: digits.to_string(),
            source,
        })
}

pub fn is_ignored(line: &str) -> bool {
    line.is_empty() || line.starts_with(COMMENT_PREFIX)
}

/// Parses one line of a ban list.
///
/// `Ok(None)` means the line carries no ban: a comment, a blank line, or a
/// line whose segment count matches neither format.
pub fn parse_ban_line(line: &str) -> Result<Option<BanRecord>, BanParseError> {
    if is_ignored(line) {
        return Ok(None);
    }

    let segments: Vec<&str> = line.split(SEGMENT_DELIMITER).collect();
    let (format, subject, expiration_text) = match segments.as_slice() {
        [subject, expiration] => (BanFormat::Simple, *subject, *expiration),
        [_admin, subject, expiration] => (BanFormat::Complex, *subject, *expiration),
        _ => return Ok(None),
    };

    let expiration = parse_expiration(expiration_text)?;

    Ok(Some(BanRecord {
        subject_id: subject.trim().to_string(),
        expiration,
        format,
        original_text: line.to_string(),
        line: 0,
    }))
}
