// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use time::macros::{datetime, time};
use time::PrimitiveDateTime;
use visit_booking::{FirstEligibleSelector, FixedClock};
use visit_booking_domain::{BookingPolicy, ShiftWindow};
use visit_booking_persistence::Persistence;

use crate::{BookingContext, CreateReservationRequest, ReservationInfo, create_reservation};

/// Identifiers of the reference data seeded by `setup`.
pub struct Seed {
    pub customer_id: i64,
    pub business_id: i64,
    pub device_id: i64,
    /// One-hour cleaning.
    pub policy_id: i64,
    pub technician_ids: Vec<i64>,
}

/// Booking rules and a frozen clock.
pub struct Env {
    pub policy: BookingPolicy,
    pub clock: FixedClock,
}

impl Env {
    pub fn at(now: PrimitiveDateTime) -> Self {
        Self {
            policy: BookingPolicy::default(),
            clock: FixedClock::new(now),
        }
    }

    pub fn ctx(&self) -> BookingContext<'_> {
        BookingContext {
            policy: &self.policy,
            clock: &self.clock,
            selector: &FirstEligibleSelector,
        }
    }
}

/// The Friday before 2026-10-19, which is a Monday.
pub fn create_test_env() -> Env {
    Env::at(datetime!(2026-10-16 12:00))
}

/// Seeds one customer, business, device, a one-hour policy, and
/// `technician_count` technicians working Mondays 09:00-18:00.
pub fn setup(technician_count: usize) -> (Persistence, Seed) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let customer_id: i64 = persistence.register_customer("Kim Soo-jin").unwrap();
    let business_id: i64 = persistence
        .register_business(customer_id, "Mapo Bakery")
        .unwrap();
    let device_id: i64 = persistence
        .register_device(business_id, "MEDIUM", "Ice maker")
        .unwrap();
    let policy_id: i64 = persistence
        .register_duration_policy("MEDIUM", "CLEANING", 60)
        .unwrap()
        .policy_id();

    let monday: ShiftWindow = ShiftWindow::new(1, time!(9:00), time!(18:00)).unwrap();
    let technician_ids: Vec<i64> = (0..technician_count)
        .map(|index| {
            let technician_id: i64 = persistence
                .register_technician(&format!("Technician {index}"), "senior")
                .unwrap();
            persistence.add_shift_window(technician_id, &monday).unwrap();
            technician_id
        })
        .collect();

    (
        persistence,
        Seed {
            customer_id,
            business_id,
            device_id,
            policy_id,
            technician_ids,
        },
    )
}

pub fn booking_request(seed: &Seed, reserved_date: &str, service_time: &str) -> CreateReservationRequest {
    CreateReservationRequest {
        customer_id: seed.customer_id,
        business_id: seed.business_id,
        device_id: seed.device_id,
        policy_id: seed.policy_id,
        reserved_date: reserved_date.to_string(),
        service_time: service_time.to_string(),
    }
}

/// Books Monday 2026-10-19 at `service_time` and returns the reservation.
pub fn book_monday(
    persistence: &mut Persistence,
    env: &Env,
    seed: &Seed,
    service_time: &str,
) -> ReservationInfo {
    create_reservation(
        persistence,
        &env.ctx(),
        &booking_request(seed, "2026-10-19", service_time),
    )
    .unwrap()
    .reservation
}
