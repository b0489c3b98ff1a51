// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::reservation_status::ReservationStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Day of week outside `0..=6`.
    InvalidDayOfWeek(u8),
    /// A shift window is malformed.
    InvalidShiftWindow {
        /// Description of the validation error.
        reason: String,
    },
    /// A duration policy carries a non-positive duration.
    InvalidDurationMinutes(i64),
    /// Name is empty or invalid.
    InvalidName(String),
    /// Cancel reason is empty or too long.
    InvalidCancelReason(String),
    /// The requested date range is empty, reversed, or too long.
    InvalidDateRange {
        /// Description of the validation error.
        reason: String,
    },
    /// The booking policy parameters are inconsistent.
    InvalidBookingPolicy {
        /// Description of the validation error.
        reason: String,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to parse a time of day from a string.
    TimeParseError {
        /// The invalid time string.
        time_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// A service interval must end after it starts and within the same day.
    InvalidServiceInterval {
        /// The requested start.
        service_start: time::PrimitiveDateTime,
        /// The computed end.
        service_end: time::PrimitiveDateTime,
    },
    /// Reservation status string is not recognized.
    InvalidReservationStatus(String),
    /// Slot reason string is not recognized.
    InvalidDisabledReason(String),
    /// The requested action is not allowed from the current status.
    InvalidStatusTransition {
        /// The reservation being transitioned.
        reservation_id: i64,
        /// The status the reservation currently has.
        from: ReservationStatus,
        /// The action that was attempted.
        action: &'static str,
    },
    /// The technician has an earlier job on the same day that is not closed out.
    PreviousWorkIncomplete {
        /// The reservation that was asked to start.
        reservation_id: i64,
        /// The earlier reservation that is still open.
        blocking_reservation_id: i64,
    },
    /// The service start is inside the minimum notice period or in the past.
    TooCloseOrPast {
        /// The requested service start.
        service_start: time::PrimitiveDateTime,
        /// The earliest start that would be accepted.
        earliest_allowed: time::PrimitiveDateTime,
    },
    /// A customer tried to cancel inside the cancellation window.
    TooLateToCancel {
        /// The reservation that was asked to cancel.
        reservation_id: i64,
        /// The scheduled service start.
        service_start: time::PrimitiveDateTime,
        /// The last moment a customer cancel is accepted.
        deadline: time::PrimitiveDateTime,
    },
    /// The customer does not own the reservation.
    NotReservationOwner {
        /// The reservation.
        reservation_id: i64,
        /// The requesting customer.
        customer_id: i64,
    },
    /// The technician is not the one assigned to the reservation.
    NotAssignedTechnician {
        /// The reservation.
        reservation_id: i64,
        /// The requesting technician.
        technician_id: i64,
    },
}

impl std::fmt::Display for DomainError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDayOfWeek(day) => {
                write!(f, "Invalid day of week: {day}. Must be between 0 and 6")
            }
            Self::InvalidShiftWindow { reason } => write!(f, "Invalid shift window: {reason}"),
            Self::InvalidDurationMinutes(minutes) => {
                write!(
                    f,
                    "Invalid duration: {minutes} minutes. Must be greater than 0"
                )
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidCancelReason(msg) => write!(f, "Invalid cancel reason: {msg}"),
            Self::InvalidDateRange { reason } => write!(f, "Invalid date range: {reason}"),
            Self::InvalidBookingPolicy { reason } => {
                write!(f, "Invalid booking policy: {reason}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::TimeParseError { time_string, error } => {
                write!(f, "Failed to parse time '{time_string}': {error}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::InvalidServiceInterval {
                service_start,
                service_end,
            } => {
                write!(
                    f,
                    "Service from {service_start} to {service_end} must end after it starts and on the same day"
                )
            }
            Self::InvalidReservationStatus(status) => {
                write!(f, "Invalid reservation status: {status}")
            }
            Self::InvalidDisabledReason(reason) => {
                write!(f, "Invalid disabled slot reason: {reason}")
            }
            Self::InvalidStatusTransition {
                reservation_id,
                from,
                action,
            } => {
                write!(
                    f,
                    "Cannot {action} reservation {reservation_id}: status is {from}"
                )
            }
            Self::PreviousWorkIncomplete {
                reservation_id,
                blocking_reservation_id,
            } => {
                write!(
                    f,
                    "Cannot start reservation {reservation_id}: earlier reservation {blocking_reservation_id} on the same day is not finished"
                )
            }
            Self::TooCloseOrPast {
                service_start,
                earliest_allowed,
            } => {
                write!(
                    f,
                    "Service start {service_start} is too close or in the past; earliest allowed is {earliest_allowed}"
                )
            }
            Self::TooLateToCancel {
                reservation_id,
                service_start,
                deadline,
            } => {
                write!(
                    f,
                    "Too late to cancel reservation {reservation_id} starting {service_start}; cancellation closed at {deadline}"
                )
            }
            Self::NotReservationOwner {
                reservation_id,
                customer_id,
            } => {
                write!(
                    f,
                    "Reservation {reservation_id} does not belong to customer {customer_id}"
                )
            }
            Self::NotAssignedTechnician {
                reservation_id,
                technician_id,
            } => {
                write!(
                    f,
                    "Technician {technician_id} is not assigned to reservation {reservation_id}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
