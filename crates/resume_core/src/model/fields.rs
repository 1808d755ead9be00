//! Field bag input and text/date validation helpers.
//!
//! Callers hand over submitted form data as plain strings keyed by field
//! name. Everything in here turns those strings into typed, length-checked
//! values or a `ValidationError` naming the offending field.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use thiserror::Error;

/// Pre-extracted key/value form data.
pub type FieldBag = BTreeMap<String, String>;

/// Storage and wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted year range. Stored dates stay fixed-width, so TEXT order is date order.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// A field bag or draft failed a constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("field `{0}` is required")]
    MissingField(&'static str),
    #[error("field `{field}` exceeds {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    #[error("field `{field}` is not a valid YYYY-MM-DD date: `{value}`")]
    InvalidDate { field: &'static str, value: String },
    #[error("end_date {end} is earlier than start_date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// Trims `value` and enforces a non-blank, bounded text field.
pub fn required_text(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    check_length(field, trimmed, max_chars)?;
    Ok(trimmed.to_string())
}

/// Trims `value`; blank input becomes `None`.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => {
            check_length(field, trimmed, max_chars)?;
            Ok(Some(trimmed.to_string()))
        }
    }
}

/// Parses a zero-padded ISO `YYYY-MM-DD` date.
///
/// Signed, short or five-digit years are rejected.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    let invalid = || ValidationError::InvalidDate {
        field,
        value: trimmed.to_string(),
    };
    if !is_fixed_width_date(trimmed) {
        return Err(invalid());
    }
    let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| invalid())?;
    check_date_range(field, date)?;
    Ok(date)
}

/// Rejects dates whose year falls outside `MIN_YEAR..=MAX_YEAR`.
pub fn check_date_range(field: &'static str, date: NaiveDate) -> Result<(), ValidationError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Ok(());
    }
    Err(ValidationError::InvalidDate {
        field,
        value: date.to_string(),
    })
}

/// Formats a date the way it is stored.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn field<'a>(fields: &'a FieldBag, name: &str) -> Option<&'a str> {
    fields.get(name).map(String::as_str)
}

pub(crate) fn required_date(
    fields: &FieldBag,
    name: &'static str,
) -> Result<NaiveDate, ValidationError> {
    match field(fields, name).map(str::trim) {
        None | Some("") => Err(ValidationError::MissingField(name)),
        Some(value) => parse_date(name, value),
    }
}

pub(crate) fn optional_date(
    fields: &FieldBag,
    name: &'static str,
) -> Result<Option<NaiveDate>, ValidationError> {
    match field(fields, name).map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(name, value).map(Some),
    }
}

fn is_fixed_width_date(value: &str) -> bool {
    value.len() == 10
        && value.bytes().enumerate().all(|(index, byte)| match index {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

fn check_length(field: &'static str, value: &str, max_chars: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max_chars {
        return Err(ValidationError::TooLong {
            field,
            max: max_chars,
            actual,
        });
    }
    Ok(())
}
