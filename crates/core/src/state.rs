// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::PrimitiveDateTime;
use visit_booking_domain::{BookingPolicy, Reservation, ReservationStatus};

/// Facts a transition is checked against, read in the same transaction that
/// will write the result.
#[derive(Debug, Clone, Copy)]
pub struct TransitionContext<'a> {
    /// Current local wall-clock time.
    pub now: PrimitiveDateTime,
    /// Booking rules in force.
    pub policy: &'a BookingPolicy,
    /// Other live reservations of the assigned technician on the same date.
    pub same_day_jobs: &'a [Reservation],
}

/// The result of a successful transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The reservation as it must be written back.
    pub reservation: Reservation,
    /// The status before the transition.
    pub previous_status: ReservationStatus,
}
