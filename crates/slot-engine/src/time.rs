//! Time-of-day and timestamp parsing/formatting, plus the interval overlap rule.
//!
//! Format strings use `chrono` strftime syntax: `%H:%M` is the `HH:mm` wall-clock
//! form, `%d-%m-%Y` is the `DD-MM-YYYY` date key.

use std::fmt::Write;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{Result, SlotError};

/// Default time-of-day format (`HH:mm`).
pub const TIME_FORMAT: &str = "%H:%M";

/// Default calendar date format (`DD-MM-YYYY`).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Canonical appointment timestamp format (`YYYY-MM-DDTHH:mm:ss`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// `%.f` also matches an absent fractional part.
const ACCEPTED_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// A time-of-day interval. `start <= end` is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }
}

/// Anything [`format_time`] can render. Raw strings are parsed as timestamps first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeInput<'a> {
    Time(NaiveTime),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Raw(&'a str),
}

impl From<NaiveTime> for TimeInput<'_> {
    fn from(value: NaiveTime) -> Self {
        TimeInput::Time(value)
    }
}

impl From<NaiveDate> for TimeInput<'_> {
    fn from(value: NaiveDate) -> Self {
        TimeInput::Date(value)
    }
}

impl From<NaiveDateTime> for TimeInput<'_> {
    fn from(value: NaiveDateTime) -> Self {
        TimeInput::Timestamp(value)
    }
}

impl<'a> From<&'a str> for TimeInput<'a> {
    fn from(value: &'a str) -> Self {
        TimeInput::Raw(value)
    }
}

/// Drop seconds and sub-second precision.
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

/// Parse a time-of-day string under `format`, truncated to minute precision.
///
/// # Errors
/// Returns `SlotError::Parse` if `text` does not conform to `format`.
pub fn parse_time_of_day(text: &str, format: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(text, format)
        .map(truncate_to_minute)
        .map_err(|_| SlotError::parse(text, format))
}

/// Parse an `HH:mm` time-of-day string.
pub fn parse_time(text: &str) -> Result<NaiveTime> {
    parse_time_of_day(text, TIME_FORMAT)
}

/// Parse an appointment timestamp (`YYYY-MM-DDTHH:mm:ss`).
///
/// Fractional seconds and the minute-only form `YYYY-MM-DDTHH:mm` are accepted too.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    ACCEPTED_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .ok_or_else(|| SlotError::parse(text, TIMESTAMP_FORMAT))
}

/// Render a time-of-day, date or timestamp value under `format`.
///
/// # Errors
/// Returns `SlotError::Parse` if a raw string is not a valid timestamp, and
/// `SlotError::Format` if `format` asks for fields the value does not carry
/// (e.g. `%Y` on a time-of-day) or contains an unknown specifier.
pub fn format_time<'a>(value: impl Into<TimeInput<'a>>, format: &str) -> Result<String> {
    let mut out = String::new();
    let written = match value.into() {
        TimeInput::Time(time) => write!(out, "{}", time.format(format)),
        TimeInput::Date(date) => write!(out, "{}", date.format(format)),
        TimeInput::Timestamp(ts) => write!(out, "{}", ts.format(format)),
        TimeInput::Raw(text) => {
            let ts = parse_timestamp(text)?;
            write!(out, "{}", ts.format(format))
        }
    };
    written.map_err(|_| SlotError::Format(format!("cannot render value with '{}'", format)))?;
    Ok(out)
}

/// Strict open-interval overlap: `a.start < b.end && a.end > b.start`.
///
/// Intervals that only touch at an endpoint do not overlap.
pub fn intervals_overlap(a: &TimeRange, b: &TimeRange) -> bool {
    a.start < b.end && a.end > b.start
}
