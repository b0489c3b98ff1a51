// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::{date, datetime, time};
use visit_booking::{Actor, Command, FirstEligibleSelector};
use visit_booking_domain::{BookingPolicy, Reservation, ServiceInterval, ShiftWindow};

use crate::tests::{Fixture, MONDAY, create_fixture, create_test_now};
use crate::{BookingRequest, PersistenceError, ReservationData, ScheduleSnapshot};

#[test]
fn test_get_reservation_includes_timestamps() {
    let mut fixture: Fixture = create_fixture(1);
    let booked: Reservation = fixture.book(time!(10:00)).unwrap();

    let data: ReservationData = fixture
        .persistence
        .get_reservation(booked.reservation_id)
        .unwrap();

    assert_eq!(data.reservation, booked);
    assert!(!data.created_at.is_empty());
    assert!(!data.updated_at.is_empty());
}

#[test]
fn test_get_missing_reservation() {
    let mut fixture: Fixture = create_fixture(1);
    assert_eq!(
        fixture.persistence.get_reservation(31).unwrap_err(),
        PersistenceError::ReservationNotFound(31)
    );
}

#[test]
fn test_soft_deleted_reservation_is_invisible() {
    let mut fixture: Fixture = create_fixture(1);
    let booked: Reservation = fixture.book(time!(10:00)).unwrap();
    let technician_id: i64 = booked.technician_id.unwrap();

    fixture
        .persistence
        .soft_delete_reservation(booked.reservation_id)
        .unwrap();

    assert_eq!(
        fixture
            .persistence
            .get_reservation(booked.reservation_id)
            .unwrap_err(),
        PersistenceError::ReservationNotFound(booked.reservation_id)
    );
    assert!(
        fixture
            .persistence
            .list_technician_reservations(technician_id, MONDAY)
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        fixture
            .persistence
            .soft_delete_reservation(booked.reservation_id)
            .unwrap_err(),
        PersistenceError::ReservationNotFound(booked.reservation_id)
    );
    // The row itself is kept.
    assert_eq!(fixture.persistence.count_reservation_rows().unwrap(), 1);
}

#[test]
fn test_technician_day_is_listed_earliest_first() {
    let mut fixture: Fixture = create_fixture(1);
    let afternoon: Reservation = fixture.book(time!(15:00)).unwrap();
    let morning: Reservation = fixture.book(time!(9:00)).unwrap();
    let noon: Reservation = fixture.book(time!(12:00)).unwrap();
    let technician_id: i64 = morning.technician_id.unwrap();

    let listed: Vec<i64> = fixture
        .persistence
        .list_technician_reservations(technician_id, MONDAY)
        .unwrap()
        .into_iter()
        .map(|r| r.reservation_id)
        .collect();

    assert_eq!(
        listed,
        vec![
            morning.reservation_id,
            noon.reservation_id,
            afternoon.reservation_id
        ]
    );
    assert!(
        fixture
            .persistence
            .list_technician_reservations(technician_id, date!(2026 - 10 - 20))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_schedule_holds_only_blocking_reservations() {
    let mut fixture: Fixture = create_fixture(1);
    let morning: Reservation = fixture.book(time!(9:00)).unwrap();
    let afternoon: Reservation = fixture.book(time!(14:00)).unwrap();
    let technician_id: i64 = morning.technician_id.unwrap();
    let customer_id: i64 = fixture.customer_id;
    fixture
        .persistence
        .apply_transition(
            afternoon.reservation_id,
            Command::CancelWork {
                actor: Actor::Customer(customer_id),
                reason: Some(String::from("double booked")),
            },
            &BookingPolicy::default(),
            create_test_now(),
        )
        .unwrap();

    let snapshot: ScheduleSnapshot = fixture
        .persistence
        .load_schedule(MONDAY, MONDAY, &BookingPolicy::default())
        .unwrap();

    assert_eq!(snapshot.technicians.len(), 1);
    assert_eq!(
        snapshot.busy.intervals_for(technician_id),
        &[ServiceInterval::new(
            datetime!(2026-10-19 9:00),
            datetime!(2026-10-19 10:00)
        )
        .unwrap()]
    );
}

#[test]
fn test_schedule_range_excludes_other_dates() {
    let mut fixture: Fixture = create_fixture(1);
    let booked: Reservation = fixture.book(time!(10:00)).unwrap();
    let technician_id: i64 = booked.technician_id.unwrap();

    let snapshot: ScheduleSnapshot = fixture
        .persistence
        .load_schedule(
            date!(2026 - 10 - 20),
            date!(2026 - 10 - 25),
            &BookingPolicy::default(),
        )
        .unwrap();

    assert!(snapshot.busy.intervals_for(technician_id).is_empty());
}

#[test]
fn test_schedule_includes_previous_day_job_within_buffer() {
    let mut fixture: Fixture = create_fixture(1);
    let technician_id: i64 = fixture.technician_ids[0];
    let late_sunday: ShiftWindow = ShiftWindow::new(0, time!(21:00), time!(23:59)).unwrap();
    fixture
        .persistence
        .add_shift_window(technician_id, &late_sunday)
        .unwrap();
    let mut request: BookingRequest = fixture.request(time!(22:30));
    request.reserved_date = date!(2026 - 10 - 18);
    fixture
        .persistence
        .create_and_assign(
            &request,
            &BookingPolicy::default(),
            create_test_now(),
            &FirstEligibleSelector,
        )
        .unwrap();

    let with_buffer: ScheduleSnapshot = fixture
        .persistence
        .load_schedule(MONDAY, MONDAY, &BookingPolicy::default())
        .unwrap();
    let without_buffer: ScheduleSnapshot = fixture
        .persistence
        .load_schedule(MONDAY, MONDAY, &BookingPolicy::new(0, 180, 24 * 60))
        .unwrap();

    assert_eq!(
        with_buffer.busy.intervals_for(technician_id),
        &[ServiceInterval::new(
            datetime!(2026-10-18 22:30),
            datetime!(2026-10-18 23:30)
        )
        .unwrap()]
    );
    assert!(without_buffer.busy.intervals_for(technician_id).is_empty());
}
