// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates travel as `YYYY-MM-DD`, times of day as `HH:MM` or `HH:MM:SS`, and
//! timestamps as `YYYY-MM-DD HH:MM:SS` local wall-clock time.

use serde::{Deserialize, Serialize};
use visit_booking_domain::{DisabledSlot, Reservation, format_date, format_time, format_timestamp};

/// API request for the disabled slots of a date range.
///
/// Every field is optional on the wire so that a missing parameter is
/// reported as a validation error naming the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    /// First date of the range (inclusive).
    pub start_date: Option<String>,
    /// Last date of the range (inclusive).
    pub end_date: Option<String>,
    /// The duration policy of the job being planned.
    pub policy_id: Option<i64>,
}

/// One unbookable grid slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabledSlotInfo {
    pub date: String,
    pub time: String,
    /// `TOO_CLOSE_OR_PAST`, `NO_ENGINEER_SHIFT` or `FULLY_BOOKED`.
    pub reason: String,
}

impl From<&DisabledSlot> for DisabledSlotInfo {
    fn from(slot: &DisabledSlot) -> Self {
        Self {
            date: format_date(slot.date),
            time: format_time(slot.time),
            reason: slot.reason.as_str().to_string(),
        }
    }
}

/// API response for an availability query.
///
/// Slots that can be booked are absent from `disabled_slots`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub start_date: String,
    pub end_date: String,
    pub policy_id: i64,
    /// The job length the slots were evaluated with.
    pub duration_minutes: u32,
    pub disabled_slots: Vec<DisabledSlotInfo>,
}

/// API request to book a visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub customer_id: i64,
    pub business_id: i64,
    pub device_id: i64,
    pub policy_id: i64,
    /// Visit date (`YYYY-MM-DD`).
    pub reserved_date: String,
    /// Service start time of day (`HH:MM`).
    pub service_time: String,
}

/// A reservation as presented to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationInfo {
    pub reservation_id: i64,
    pub customer_id: i64,
    pub business_id: i64,
    pub device_id: i64,
    pub policy_id: i64,
    pub technician_id: Option<i64>,
    pub reserved_date: String,
    pub service_start: String,
    pub service_end: String,
    pub status: String,
    pub cancel_reason: Option<String>,
}

impl From<&Reservation> for ReservationInfo {
    fn from(reservation: &Reservation) -> Self {
        Self {
            reservation_id: reservation.reservation_id,
            customer_id: reservation.customer_id,
            business_id: reservation.business_id,
            device_id: reservation.device_id,
            policy_id: reservation.policy_id,
            technician_id: reservation.technician_id,
            reserved_date: format_date(reservation.reserved_date),
            service_start: format_timestamp(reservation.service_start),
            service_end: format_timestamp(reservation.service_end),
            status: reservation.status.as_str().to_string(),
            cancel_reason: reservation.cancel_reason.clone(),
        }
    }
}

/// API response for a successful booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReservationResponse {
    pub reservation: ReservationInfo,
    /// A success message.
    pub message: String,
}

/// API request for a technician start or complete action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianActionRequest {
    /// The acting technician; must be the one assigned.
    pub technician_id: i64,
}

/// API request to cancel a visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelReservationRequest {
    /// `customer` or `technician`.
    pub actor_type: String,
    pub actor_id: i64,
    /// Optional; blank is the same as absent.
    #[serde(default)]
    pub reason: Option<String>,
}

/// API response for a successful status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionResponse {
    pub reservation: ReservationInfo,
    /// The status before the transition.
    pub previous_status: String,
    /// A success message.
    pub message: String,
}

/// API response for a single reservation lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetReservationResponse {
    pub reservation: ReservationInfo,
    pub created_at: String,
    pub updated_at: String,
}

/// API response listing one technician's day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTechnicianReservationsResponse {
    pub technician_id: i64,
    pub date: String,
    /// Earliest first.
    pub reservations: Vec<ReservationInfo>,
}
