// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The availability engine.
//!
//! For every date of a range and every grid slot, decide whether a job of the
//! requested duration could be booked there. Only unbookable slots are
//! reported; a slot absent from the result is open.
//!
//! The checks run in a fixed order and the first failing one names the
//! reason:
//!
//! 1. The slot starts before `now + minimum notice` → `TOO_CLOSE_OR_PAST`
//! 2. No active technician has a shift covering the whole job → `NO_ENGINEER_SHIFT`
//! 3. Every technician on shift has a conflicting job → `FULLY_BOOKED`

use crate::error::CoreError;
use time::{Date, PrimitiveDateTime, Time};
use visit_booking_domain::{
    BookingPolicy, BusySchedule, DisabledReason, DisabledSlot, DurationPolicy, ServiceInterval,
    Technician, eligible_technicians, technicians_on_shift,
};

/// A read-only snapshot of the schedule the engine evaluates slots against.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityEngine<'a> {
    policy: &'a BookingPolicy,
    technicians: &'a [Technician],
    busy: &'a BusySchedule,
}

impl<'a> AvailabilityEngine<'a> {
    /// Creates an engine over the given technicians and their occupied intervals.
    #[must_use]
    pub const fn new(
        policy: &'a BookingPolicy,
        technicians: &'a [Technician],
        busy: &'a BusySchedule,
    ) -> Self {
        Self {
            policy,
            technicians,
            busy,
        }
    }

    /// Returns every disabled slot in `[start_date, end_date]`, ordered by
    /// date then time.
    ///
    /// # Errors
    ///
    /// Returns an error if the date range is reversed or exceeds the
    /// policy's maximum range.
    pub fn disabled_slots(
        &self,
        duration: &DurationPolicy,
        start_date: Date,
        end_date: Date,
        now: PrimitiveDateTime,
    ) -> Result<Vec<DisabledSlot>, CoreError> {
        let dates: Vec<Date> = self.policy.dates_in_range(start_date, end_date)?;
        let slot_times: Vec<Time> = self.policy.slot_times();

        let mut disabled: Vec<DisabledSlot> = Vec::new();
        for date in dates {
            for time in &slot_times {
                if let Some(reason) = self.evaluate_slot(duration, date, *time, now) {
                    disabled.push(DisabledSlot {
                        date,
                        time: *time,
                        reason,
                    });
                }
            }
        }
        Ok(disabled)
    }

    /// Returns why a single slot is unbookable, or `None` if it is open.
    #[must_use]
    pub fn evaluate_slot(
        &self,
        duration: &DurationPolicy,
        date: Date,
        time: Time,
        now: PrimitiveDateTime,
    ) -> Option<DisabledReason> {
        if self.policy.is_too_close(PrimitiveDateTime::new(date, time), now) {
            return Some(DisabledReason::TooCloseOrPast);
        }

        // A job running past midnight cannot fit inside any shift.
        let Ok(interval) = duration.interval_at(date, time) else {
            return Some(DisabledReason::NoEngineerShift);
        };

        if technicians_on_shift(self.technicians, &interval).is_empty() {
            return Some(DisabledReason::NoEngineerShift);
        }

        if self.eligible_for(&interval).is_empty() {
            return Some(DisabledReason::FullyBooked);
        }

        None
    }

    /// Returns the technicians who could take a job over `interval`.
    #[must_use]
    pub fn eligible_for(&self, interval: &ServiceInterval) -> Vec<i64> {
        eligible_technicians(
            self.technicians,
            interval,
            self.busy,
            self.policy.buffer(),
        )
    }
}
