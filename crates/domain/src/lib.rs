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

mod booking_policy;
mod eligibility;
mod error;
mod formats;
mod interval;
mod reservation_status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use booking_policy::BookingPolicy;
pub use eligibility::{BusySchedule, eligible_technicians, technicians_on_shift};
pub use error::DomainError;
pub use formats::{
    format_date, format_time, format_timestamp, parse_date, parse_time, parse_timestamp,
};
pub use interval::ServiceInterval;
pub use reservation_status::ReservationStatus;
pub use types::{
    DisabledReason, DisabledSlot, DurationPolicy, Reservation, ShiftWindow, Technician,
    day_of_week,
};
pub use validation::{MAX_CANCEL_REASON_LEN, MAX_NAME_LEN, validate_cancel_reason, validate_name};
