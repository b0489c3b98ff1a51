// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::{date, datetime, time};
use time::{Date, PrimitiveDateTime, Time};
use visit_booking_domain::{
    BookingPolicy, DurationPolicy, Reservation, ReservationStatus, ShiftWindow, Technician,
};

/// 2026-10-19 is a Monday.
pub const MONDAY: Date = date!(2026 - 10 - 19);

pub fn create_test_policy() -> BookingPolicy {
    BookingPolicy::default()
}

/// A one-hour job.
pub fn create_test_duration() -> DurationPolicy {
    DurationPolicy::new(1, "MEDIUM", "CLEANING", 60).unwrap()
}

/// An active technician working Mondays 09:00-18:00.
pub fn create_test_technician(technician_id: i64) -> Technician {
    Technician {
        technician_id,
        name: format!("Technician {technician_id}"),
        grade: String::from("senior"),
        is_active: true,
        shifts: vec![ShiftWindow::new(1, time!(9:00), time!(18:00)).unwrap()],
    }
}

/// A confirmed one-hour Monday job for customer 100 and technician 1.
pub fn create_test_reservation(reservation_id: i64, start: Time) -> Reservation {
    let service_start: PrimitiveDateTime = PrimitiveDateTime::new(MONDAY, start);
    Reservation {
        reservation_id,
        customer_id: 100,
        business_id: 200,
        device_id: 300,
        policy_id: 1,
        technician_id: Some(1),
        reserved_date: MONDAY,
        service_start,
        service_end: service_start + time::Duration::hours(1),
        status: ReservationStatus::Confirmed,
        cancel_reason: None,
    }
}

/// The Friday before the test Monday, far outside every window.
pub fn create_test_now() -> PrimitiveDateTime {
    datetime!(2026-10-16 12:00)
}
