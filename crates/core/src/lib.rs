// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod apply;
mod assignment;
mod availability;
mod clock;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

use time::PrimitiveDateTime;
use visit_booking_domain::{BookingPolicy, DomainError, DurationPolicy, ServiceInterval};

// Re-export public types and functions
pub use apply::apply;
pub use assignment::{FirstEligibleSelector, RandomSelector, TechnicianSelector, plan_assignment};
pub use availability::AvailabilityEngine;
pub use clock::{Clock, FixedClock, SystemClock, naive_to_primitive};
pub use command::{Actor, Command};
pub use error::CoreError;
pub use state::{TransitionContext, TransitionResult};

/// Validates a requested service start and computes the job interval.
///
/// This is the fail-fast check run before the booking transaction opens.
///
/// # Arguments
///
/// * `policy` - The booking rules in force
/// * `duration` - The duration policy of the job
/// * `reserved_date` - The visit date
/// * `start_time` - The requested start time of day
/// * `now` - The current local time
///
/// # Errors
///
/// Returns an error if:
/// - The start is inside the minimum notice period or in the past
/// - The job would not finish on the same day
pub fn validate_requested_start(
    policy: &BookingPolicy,
    duration: &DurationPolicy,
    reserved_date: time::Date,
    start_time: time::Time,
    now: PrimitiveDateTime,
) -> Result<ServiceInterval, DomainError> {
    let service_start: PrimitiveDateTime = PrimitiveDateTime::new(reserved_date, start_time);
    if policy.is_too_close(service_start, now) {
        return Err(DomainError::TooCloseOrPast {
            service_start,
            earliest_allowed: policy.earliest_start(now),
        });
    }
    duration.interval_at(reserved_date, start_time)
}
