// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tunable booking rules: travel buffer, notice periods, and the slot grid.
//!
//! ## Defaults
//!
//! - Buffer: 60 minutes on both sides of every existing job
//! - Minimum notice: 3 hours between "now" and a service start
//! - Customer cancellation window: 24 hours before service start
//! - Slot grid: 09:00 through 17:00 inclusive, every 60 minutes
//! - Longest availability query: 31 days

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::macros::time;
use time::{Date, Duration, PrimitiveDateTime, Time};

const DEFAULT_BUFFER_MINUTES: u32 = 60;
const DEFAULT_MINIMUM_NOTICE_MINUTES: u32 = 180;
const DEFAULT_CANCELLATION_WINDOW_MINUTES: u32 = 24 * 60;
const DEFAULT_SLOT_STEP_MINUTES: u32 = 60;
const DEFAULT_MAX_RANGE_DAYS: u32 = 31;

/// Booking rules applied by the availability engine, the booking
/// transaction, and customer cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPolicy {
    buffer_minutes: u32,
    minimum_notice_minutes: u32,
    cancellation_window_minutes: u32,
    first_slot: Time,
    last_slot: Time,
    slot_step_minutes: u32,
    max_range_days: u32,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            buffer_minutes: DEFAULT_BUFFER_MINUTES,
            minimum_notice_minutes: DEFAULT_MINIMUM_NOTICE_MINUTES,
            cancellation_window_minutes: DEFAULT_CANCELLATION_WINDOW_MINUTES,
            first_slot: time!(9:00),
            last_slot: time!(17:00),
            slot_step_minutes: DEFAULT_SLOT_STEP_MINUTES,
            max_range_days: DEFAULT_MAX_RANGE_DAYS,
        }
    }
}

impl BookingPolicy {
    /// Creates a policy with custom timing rules and the default slot grid.
    #[must_use]
    pub fn new(
        buffer_minutes: u32,
        minimum_notice_minutes: u32,
        cancellation_window_minutes: u32,
    ) -> Self {
        Self {
            buffer_minutes,
            minimum_notice_minutes,
            cancellation_window_minutes,
            ..Self::default()
        }
    }

    /// Replaces the slot grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the step is zero or the last slot precedes the first.
    pub fn with_slot_grid(
        self,
        first_slot: Time,
        last_slot: Time,
        slot_step_minutes: u32,
    ) -> Result<Self, DomainError> {
        if slot_step_minutes == 0 {
            return Err(DomainError::InvalidBookingPolicy {
                reason: String::from("slot step must be greater than 0 minutes"),
            });
        }
        if last_slot < first_slot {
            return Err(DomainError::InvalidBookingPolicy {
                reason: format!("last slot {last_slot} is before first slot {first_slot}"),
            });
        }
        Ok(Self {
            first_slot,
            last_slot,
            slot_step_minutes,
            ..self
        })
    }

    /// Replaces the longest accepted availability range.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_range_days` is zero.
    pub fn with_max_range_days(self, max_range_days: u32) -> Result<Self, DomainError> {
        if max_range_days == 0 {
            return Err(DomainError::InvalidBookingPolicy {
                reason: String::from("maximum range must be at least 1 day"),
            });
        }
        Ok(Self {
            max_range_days,
            ..self
        })
    }

    #[must_use]
    pub const fn buffer_minutes(&self) -> u32 {
        self.buffer_minutes
    }

    #[must_use]
    pub const fn minimum_notice_minutes(&self) -> u32 {
        self.minimum_notice_minutes
    }

    #[must_use]
    pub const fn cancellation_window_minutes(&self) -> u32 {
        self.cancellation_window_minutes
    }

    #[must_use]
    pub const fn max_range_days(&self) -> u32 {
        self.max_range_days
    }

    /// Returns the travel buffer as a duration.
    #[must_use]
    pub fn buffer(&self) -> Duration {
        Duration::minutes(i64::from(self.buffer_minutes))
    }

    /// Returns the earliest service start accepted at `now`.
    #[must_use]
    pub fn earliest_start(&self, now: PrimitiveDateTime) -> PrimitiveDateTime {
        now.checked_add(Duration::minutes(i64::from(self.minimum_notice_minutes)))
            .unwrap_or(PrimitiveDateTime::MAX)
    }

    /// Returns true if a service starting at `service_start` violates the
    /// minimum notice at `now`.
    #[must_use]
    pub fn is_too_close(&self, service_start: PrimitiveDateTime, now: PrimitiveDateTime) -> bool {
        service_start < self.earliest_start(now)
    }

    /// Returns the last moment a customer may cancel a service starting at
    /// `service_start`.
    #[must_use]
    pub fn cancellation_deadline(&self, service_start: PrimitiveDateTime) -> PrimitiveDateTime {
        service_start
            .checked_sub(Duration::minutes(i64::from(
                self.cancellation_window_minutes,
            )))
            .unwrap_or(PrimitiveDateTime::MIN)
    }

    /// Returns the span in which an existing job can conflict with a job
    /// running from `start` to `end`: the job widened by the buffer on both
    /// sides.
    #[must_use]
    pub fn conflict_window(
        &self,
        start: PrimitiveDateTime,
        end: PrimitiveDateTime,
    ) -> (PrimitiveDateTime, PrimitiveDateTime) {
        let buffer: Duration = self.buffer();
        (
            start.checked_sub(buffer).unwrap_or(PrimitiveDateTime::MIN),
            end.checked_add(buffer).unwrap_or(PrimitiveDateTime::MAX),
        )
    }

    /// Returns the conflict window of every job that fits inside the dates
    /// `[start_date, end_date]`, from the first midnight to the midnight after
    /// `end_date`.
    #[must_use]
    pub fn date_conflict_window(
        &self,
        start_date: Date,
        end_date: Date,
    ) -> (PrimitiveDateTime, PrimitiveDateTime) {
        let start: PrimitiveDateTime = PrimitiveDateTime::new(start_date, Time::MIDNIGHT);
        let end: PrimitiveDateTime = end_date
            .next_day()
            .map_or(PrimitiveDateTime::MAX, |next| {
                PrimitiveDateTime::new(next, Time::MIDNIGHT)
            });
        self.conflict_window(start, end)
    }

    /// Returns the candidate start times of one day, in order.
    #[must_use]
    pub fn slot_times(&self) -> Vec<Time> {
        let step: Duration = Duration::minutes(i64::from(self.slot_step_minutes.max(1)));
        let mut slots: Vec<Time> = Vec::new();
        let mut current: Time = self.first_slot;
        loop {
            slots.push(current);
            let next: Time = current + step;
            // Time wraps at midnight.
            if next <= current || next > self.last_slot {
                break;
            }
            current = next;
        }
        slots
    }

    /// Returns every date of the inclusive range `[start_date, end_date]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is reversed or longer than the maximum.
    pub fn dates_in_range(&self, start_date: Date, end_date: Date) -> Result<Vec<Date>, DomainError> {
        if end_date < start_date {
            return Err(DomainError::InvalidDateRange {
                reason: format!("end date {end_date} is before start date {start_date}"),
            });
        }
        let span_days: i64 = (end_date - start_date).whole_days() + 1;
        if span_days > i64::from(self.max_range_days) {
            return Err(DomainError::InvalidDateRange {
                reason: format!(
                    "range of {span_days} days exceeds the maximum of {} days",
                    self.max_range_days
                ),
            });
        }

        let mut dates: Vec<Date> = Vec::new();
        let mut current: Date = start_date;
        while current <= end_date {
            dates.push(current);
            match current.next_day() {
                Some(next) => current = next,
                None => break,
            }
        }
        Ok(dates)
    }
}
