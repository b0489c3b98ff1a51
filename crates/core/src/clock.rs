// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Local wall-clock time.
//!
//! Reservations store naive local timestamps, so "now" must be read in the
//! service area's timezone before it is compared against them.

use crate::error::CoreError;
use chrono::{Datelike, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;
use time::{Date, Month, PrimitiveDateTime, Time};

/// A source of the current local time.
pub trait Clock: Send + Sync {
    /// Returns the current local wall-clock time.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ClockUnavailable` if the local time cannot be
    /// represented.
    fn now(&self) -> Result<PrimitiveDateTime, CoreError>;
}

/// Reads the system clock and converts it to a fixed IANA timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Creates a clock from an IANA timezone name such as `Asia/Seoul`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTimezone` if the name is unknown.
    pub fn from_timezone_name(name: &str) -> Result<Self, CoreError> {
        let tz: Tz = name
            .parse()
            .map_err(|_| CoreError::InvalidTimezone(name.to_string()))?;
        Ok(Self::new(tz))
    }

    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Result<PrimitiveDateTime, CoreError> {
        let local: NaiveDateTime = Utc::now().with_timezone(&self.tz).naive_local();
        naive_to_primitive(&local).ok_or_else(|| CoreError::ClockUnavailable {
            timezone: self.tz.name().to_string(),
            local: local.to_string(),
        })
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: PrimitiveDateTime,
}

impl FixedClock {
    #[must_use]
    pub const fn new(now: PrimitiveDateTime) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Result<PrimitiveDateTime, CoreError> {
        Ok(self.now)
    }
}

/// Converts a chrono naive timestamp to a `time` one, truncated to the second.
#[must_use]
pub fn naive_to_primitive(value: &NaiveDateTime) -> Option<PrimitiveDateTime> {
    let month: Month = u8::try_from(value.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())?;
    let day: u8 = u8::try_from(value.day()).ok()?;
    let date: Date = Date::from_calendar_date(value.year(), month, day).ok()?;

    let hour: u8 = u8::try_from(value.hour()).ok()?;
    let minute: u8 = u8::try_from(value.minute()).ok()?;
    let second: u8 = u8::try_from(value.second()).ok()?;
    let time: Time = Time::from_hms(hour, minute, second).ok()?;

    Some(PrimitiveDateTime::new(date, time))
}
