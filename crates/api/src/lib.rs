// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller-facing boundary of the visit booking system.
//!
//! Requests arrive as plain DTOs with string dates; handlers parse them,
//! drive the persistence layer, and return either a response DTO or an
//! `ApiError` with an explicit category.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

use visit_booking::{Clock, TechnicianSelector};
use visit_booking_domain::BookingPolicy;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    cancel_work, complete_work, create_reservation, get_reservation,
    list_technician_reservations, query_availability, start_work,
};
pub use request_response::{
    AvailabilityQuery, AvailabilityResponse, CancelReservationRequest, CreateReservationRequest,
    CreateReservationResponse, DisabledSlotInfo, GetReservationResponse,
    ListTechnicianReservationsResponse, ReservationInfo, TechnicianActionRequest,
    TransitionResponse,
};

/// Process-wide collaborators every handler needs.
#[derive(Clone, Copy)]
pub struct BookingContext<'a> {
    /// Booking rules in force.
    pub policy: &'a BookingPolicy,
    /// Source of the current local time.
    pub clock: &'a dyn Clock,
    /// Picks one technician among the eligible ones.
    pub selector: &'a dyn TechnicianSelector,
}
