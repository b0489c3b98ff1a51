// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service intervals and buffer-aware overlap checks.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::{Date, Duration, PrimitiveDateTime, Time};

/// A half-open `[start, end)` period of technician work on a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceInterval {
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
}

impl ServiceInterval {
    /// Creates an interval from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidServiceInterval` if `end` is not after
    /// `start` or the interval crosses midnight.
    pub fn new(start: PrimitiveDateTime, end: PrimitiveDateTime) -> Result<Self, DomainError> {
        if end <= start || end.date() != start.date() {
            return Err(DomainError::InvalidServiceInterval {
                service_start: start,
                service_end: end,
            });
        }
        Ok(Self { start, end })
    }

    /// Creates the interval of a job starting at `date` + `start_time` that
    /// lasts `duration_minutes`.
    ///
    /// # Errors
    ///
    /// Returns an error if the end overflows or falls on another day.
    pub fn starting_at(
        date: Date,
        start_time: Time,
        duration_minutes: u32,
    ) -> Result<Self, DomainError> {
        let start: PrimitiveDateTime = PrimitiveDateTime::new(date, start_time);
        let end: PrimitiveDateTime = start
            .checked_add(Duration::minutes(i64::from(duration_minutes)))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("adding {duration_minutes} minutes to {start}"),
            })?;
        Self::new(start, end)
    }

    /// Returns the start of the interval.
    #[must_use]
    pub const fn start(&self) -> PrimitiveDateTime {
        self.start
    }

    /// Returns the end of the interval.
    #[must_use]
    pub const fn end(&self) -> PrimitiveDateTime {
        self.end
    }

    /// Returns the calendar date the interval falls on.
    #[must_use]
    pub const fn date(&self) -> Date {
        self.start.date()
    }

    /// Returns true if the two intervals share any instant.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns true if this interval intersects `existing` once `existing`
    /// is widened by `buffer` on both ends.
    ///
    /// A job may start exactly `buffer` after an existing job ends.
    #[must_use]
    pub fn conflicts_with(&self, existing: &Self, buffer: Duration) -> bool {
        let starts_before_buffered_end: bool = existing
            .end
            .checked_add(buffer)
            .is_none_or(|buffered_end| self.start < buffered_end);
        let ends_after_buffered_start: bool = existing
            .start
            .checked_sub(buffer)
            .is_none_or(|buffered_start| buffered_start < self.end);
        starts_before_buffered_end && ends_after_buffered_start
    }
}
