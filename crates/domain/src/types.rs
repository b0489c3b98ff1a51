// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::interval::ServiceInterval;
use crate::reservation_status::ReservationStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, PrimitiveDateTime, Time};

/// Returns the day-of-week index used by shift windows (`0 = Sunday … 6 = Saturday`).
#[must_use]
pub fn day_of_week(date: Date) -> u8 {
    date.weekday().number_days_from_sunday()
}

/// A recurring weekly working window for one technician.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftWindow {
    day_of_week: u8,
    start_time: Time,
    end_time: Time,
}

impl ShiftWindow {
    /// Creates a new shift window.
    ///
    /// # Arguments
    ///
    /// * `day_of_week` - `0 = Sunday … 6 = Saturday`
    /// * `start_time` - First minute of work
    /// * `end_time` - Time by which all work must be finished
    ///
    /// # Errors
    ///
    /// Returns an error if the weekday is out of range or the window is empty.
    pub fn new(day_of_week: u8, start_time: Time, end_time: Time) -> Result<Self, DomainError> {
        if day_of_week > 6 {
            return Err(DomainError::InvalidDayOfWeek(day_of_week));
        }
        if end_time <= start_time {
            return Err(DomainError::InvalidShiftWindow {
                reason: format!("end time {end_time} must be after start time {start_time}"),
            });
        }
        Ok(Self {
            day_of_week,
            start_time,
            end_time,
        })
    }

    /// Returns the day-of-week index.
    #[must_use]
    pub const fn day_of_week(&self) -> u8 {
        self.day_of_week
    }

    /// Returns the shift start.
    #[must_use]
    pub const fn start_time(&self) -> Time {
        self.start_time
    }

    /// Returns the shift end.
    #[must_use]
    pub const fn end_time(&self) -> Time {
        self.end_time
    }

    /// Returns true if the window is on the interval's weekday and fully
    /// contains `[interval.start, interval.end]`.
    #[must_use]
    pub fn covers(&self, interval: &ServiceInterval) -> bool {
        day_of_week(interval.date()) == self.day_of_week
            && self.start_time <= interval.start().time()
            && interval.end().time() <= self.end_time
    }
}

/// A field technician as seen by the booking core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technician {
    /// Canonical identifier.
    pub technician_id: i64,
    /// Display name.
    pub name: String,
    /// Skill grade label.
    pub grade: String,
    /// Inactive technicians are never assignable.
    pub is_active: bool,
    /// Weekly availability.
    pub shifts: Vec<ShiftWindow>,
}

impl Technician {
    /// Returns the shift windows for one weekday.
    pub fn shifts_on(&self, day_of_week: u8) -> impl Iterator<Item = &ShiftWindow> {
        self.shifts
            .iter()
            .filter(move |shift| shift.day_of_week() == day_of_week)
    }

    /// Returns true if the technician is active and one of their shifts covers `interval`.
    #[must_use]
    pub fn is_on_shift_for(&self, interval: &ServiceInterval) -> bool {
        self.is_active && self.shifts.iter().any(|shift| shift.covers(interval))
    }
}

/// Standard job duration for a device size class and service kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationPolicy {
    policy_id: i64,
    device_size: String,
    service_kind: String,
    duration_minutes: u32,
}

impl DurationPolicy {
    /// Creates a duration policy.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDurationMinutes` if the duration is not positive.
    pub fn new(
        policy_id: i64,
        device_size: &str,
        service_kind: &str,
        duration_minutes: i64,
    ) -> Result<Self, DomainError> {
        let minutes: u32 = u32::try_from(duration_minutes)
            .ok()
            .filter(|m| *m > 0)
            .ok_or(DomainError::InvalidDurationMinutes(duration_minutes))?;
        Ok(Self {
            policy_id,
            device_size: device_size.to_string(),
            service_kind: service_kind.to_string(),
            duration_minutes: minutes,
        })
    }

    #[must_use]
    pub const fn policy_id(&self) -> i64 {
        self.policy_id
    }

    #[must_use]
    pub fn device_size(&self) -> &str {
        &self.device_size
    }

    #[must_use]
    pub fn service_kind(&self) -> &str {
        &self.service_kind
    }

    #[must_use]
    pub const fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Returns the interval of a job under this policy starting at `date` + `start_time`.
    ///
    /// # Errors
    ///
    /// Returns an error if the job would run past midnight.
    pub fn interval_at(&self, date: Date, start_time: Time) -> Result<ServiceInterval, DomainError> {
        ServiceInterval::starting_at(date, start_time, self.duration_minutes)
    }
}

/// A booked field-service visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_id: i64,
    pub customer_id: i64,
    pub business_id: i64,
    pub device_id: i64,
    pub policy_id: i64,
    /// `None` only while the row is `PENDING`.
    pub technician_id: Option<i64>,
    pub reserved_date: Date,
    pub service_start: PrimitiveDateTime,
    pub service_end: PrimitiveDateTime,
    pub status: ReservationStatus,
    /// Set only when the reservation is canceled.
    pub cancel_reason: Option<String>,
}

impl Reservation {
    /// Returns the service interval of this reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored bounds are inconsistent.
    pub fn interval(&self) -> Result<ServiceInterval, DomainError> {
        ServiceInterval::new(self.service_start, self.service_end)
    }
}

/// Why a slot cannot be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisabledReason {
    /// Starts before `now + minimum notice`.
    TooCloseOrPast,
    /// No active technician has a shift covering the slot.
    NoEngineerShift,
    /// Every technician on shift has a conflicting job.
    FullyBooked,
}

impl DisabledReason {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TooCloseOrPast => "TOO_CLOSE_OR_PAST",
            Self::NoEngineerShift => "NO_ENGINEER_SHIFT",
            Self::FullyBooked => "FULLY_BOOKED",
        }
    }
}

impl FromStr for DisabledReason {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TOO_CLOSE_OR_PAST" => Ok(Self::TooCloseOrPast),
            "NO_ENGINEER_SHIFT" => Ok(Self::NoEngineerShift),
            "FULLY_BOOKED" => Ok(Self::FullyBooked),
            _ => Err(DomainError::InvalidDisabledReason(s.to_string())),
        }
    }
}

impl std::fmt::Display for DisabledReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A grid slot that cannot be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabledSlot {
    pub date: Date,
    pub time: Time,
    pub reason: DisabledReason,
}
