// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;
use time::PrimitiveDateTime;
use visit_booking_domain::DomainError;

/// Errors that can occur while computing availability, assigning a
/// technician, or transitioning a reservation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),

    /// No technician is eligible for the requested interval.
    #[error("No technician is available for service starting {service_start}")]
    NoEligibleTechnician { service_start: PrimitiveDateTime },

    /// The system clock could not be read as a local wall-clock time.
    #[error("Cannot read local time in {timezone}: {local} is out of range")]
    ClockUnavailable { timezone: String, local: String },

    /// The configured timezone name is not a known IANA zone.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}
