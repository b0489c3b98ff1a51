// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Text encodings for dates, times of day, and wall-clock timestamps.
//!
//! Timestamps are zero-padded `YYYY-MM-DD HH:MM:SS` so that lexicographic
//! order equals chronological order.

use crate::error::DomainError;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Parses a time of day given as `HH:MM` or `HH:MM:SS`.
///
/// # Errors
///
/// Returns `DomainError::TimeParseError` if the string is not a valid time.
pub fn parse_time(value: &str) -> Result<Time, DomainError> {
    let trimmed: &str = value.trim();
    let parsed = if trimmed.len() <= 5 {
        Time::parse(trimmed, format_description!("[hour]:[minute]"))
    } else {
        Time::parse(trimmed, format_description!("[hour]:[minute]:[second]"))
    };
    parsed.map_err(|e| DomainError::TimeParseError {
        time_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Parses a `YYYY-MM-DD HH:MM:SS` timestamp.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid timestamp.
pub fn parse_timestamp(value: &str) -> Result<PrimitiveDateTime, DomainError> {
    PrimitiveDateTime::parse(
        value.trim(),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
    .map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Formats a time of day as `HH:MM:SS`.
#[must_use]
pub fn format_time(time: Time) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS`.
#[must_use]
pub fn format_timestamp(timestamp: PrimitiveDateTime) -> String {
    format!(
        "{} {}",
        format_date(timestamp.date()),
        format_time(timestamp.time())
    )
}
