// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;
mod reservation_query_tests;

use time::macros::{date, datetime, time};
use time::{Date, PrimitiveDateTime, Time};
use visit_booking::FirstEligibleSelector;
use visit_booking_domain::{BookingPolicy, Reservation, ShiftWindow};

use crate::{BookingRequest, Persistence, PersistenceError};

/// 2026-10-19 is a Monday.
pub const MONDAY: Date = date!(2026 - 10 - 19);

/// Reference data shared by most persistence tests.
pub struct Fixture {
    pub persistence: Persistence,
    pub customer_id: i64,
    pub business_id: i64,
    pub device_id: i64,
    /// One-hour cleaning.
    pub policy_id: i64,
    pub technician_ids: Vec<i64>,
}

impl Fixture {
    pub fn request(&self, service_time: Time) -> BookingRequest {
        BookingRequest {
            customer_id: self.customer_id,
            business_id: self.business_id,
            device_id: self.device_id,
            policy_id: self.policy_id,
            reserved_date: MONDAY,
            service_time,
        }
    }

    pub fn book(&mut self, service_time: Time) -> Result<Reservation, PersistenceError> {
        let request: BookingRequest = self.request(service_time);
        self.persistence.create_and_assign(
            &request,
            &BookingPolicy::default(),
            create_test_now(),
            &FirstEligibleSelector,
        )
    }
}

/// Registers one customer with a business and a device, a one-hour policy,
/// and `technician_count` technicians working Mondays 09:00-18:00.
pub fn seed_reference_data(
    persistence: &mut Persistence,
    technician_count: usize,
) -> Result<(i64, i64, i64, i64, Vec<i64>), PersistenceError> {
    let customer_id: i64 = persistence.register_customer("Lee Min-ji")?;
    let business_id: i64 = persistence.register_business(customer_id, "Gangnam Cafe")?;
    let device_id: i64 = persistence.register_device(business_id, "MEDIUM", "Ice maker")?;
    let policy_id: i64 = persistence
        .register_duration_policy("MEDIUM", "CLEANING", 60)?
        .policy_id();

    let monday_shift: ShiftWindow = ShiftWindow::new(1, time!(9:00), time!(18:00))?;
    let mut technician_ids: Vec<i64> = Vec::new();
    for index in 0..technician_count {
        let technician_id: i64 =
            persistence.register_technician(&format!("Technician {index}"), "senior")?;
        persistence.add_shift_window(technician_id, &monday_shift)?;
        technician_ids.push(technician_id);
    }

    Ok((
        customer_id,
        business_id,
        device_id,
        policy_id,
        technician_ids,
    ))
}

pub fn create_fixture(technician_count: usize) -> Fixture {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let (customer_id, business_id, device_id, policy_id, technician_ids) =
        seed_reference_data(&mut persistence, technician_count).unwrap();
    Fixture {
        persistence,
        customer_id,
        business_id,
        device_id,
        policy_id,
        technician_ids,
    }
}

/// The Friday before the test Monday.
pub const fn create_test_now() -> PrimitiveDateTime {
    datetime!(2026-10-16 12:00)
}
