// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::AvailabilityEngine;
use crate::tests::helpers::{
    MONDAY, create_test_duration, create_test_now, create_test_policy, create_test_technician,
};
use time::macros::{date, datetime, time};
use visit_booking_domain::{
    BookingPolicy, BusySchedule, DisabledReason, DisabledSlot, DomainError, DurationPolicy,
    Technician,
};

fn busy_at_ten(technician_id: i64) -> BusySchedule {
    std::iter::once((
        technician_id,
        create_test_duration()
            .interval_at(MONDAY, time!(10:00))
            .unwrap(),
    ))
    .collect()
}

#[test]
fn test_open_day_reports_nothing() {
    let policy: BookingPolicy = create_test_policy();
    let technicians: Vec<Technician> = vec![create_test_technician(1)];
    let busy: BusySchedule = BusySchedule::new();
    let engine: AvailabilityEngine<'_> = AvailabilityEngine::new(&policy, &technicians, &busy);

    let disabled: Vec<DisabledSlot> = engine
        .disabled_slots(&create_test_duration(), MONDAY, MONDAY, create_test_now())
        .unwrap();

    assert!(disabled.is_empty(), "unexpected: {disabled:?}");
}

#[test]
fn test_day_without_shifts_is_all_no_engineer_shift() {
    let policy: BookingPolicy = create_test_policy();
    let technicians: Vec<Technician> = vec![create_test_technician(1)];
    let busy: BusySchedule = BusySchedule::new();
    let engine: AvailabilityEngine<'_> = AvailabilityEngine::new(&policy, &technicians, &busy);
    let tuesday = date!(2026 - 10 - 20);

    let disabled: Vec<DisabledSlot> = engine
        .disabled_slots(&create_test_duration(), tuesday, tuesday, create_test_now())
        .unwrap();

    assert_eq!(disabled.len(), 9);
    assert!(
        disabled
            .iter()
            .all(|slot| slot.reason == DisabledReason::NoEngineerShift)
    );
}

#[test]
fn test_job_running_past_shift_end_is_no_engineer_shift() {
    let policy: BookingPolicy = create_test_policy();
    let technicians: Vec<Technician> = vec![create_test_technician(1)];
    let busy: BusySchedule = BusySchedule::new();
    let engine: AvailabilityEngine<'_> = AvailabilityEngine::new(&policy, &technicians, &busy);
    let long_job: DurationPolicy = DurationPolicy::new(2, "LARGE", "OVERHAUL", 120).unwrap();

    // Shift ends at 18:00; a 2h job fits until 16:00.
    assert_eq!(
        engine.evaluate_slot(&long_job, MONDAY, time!(16:00), create_test_now()),
        None
    );
    assert_eq!(
        engine.evaluate_slot(&long_job, MONDAY, time!(17:00), create_test_now()),
        Some(DisabledReason::NoEngineerShift)
    );
}

#[test]
fn test_buffer_marks_neighbouring_slots_fully_booked() {
    let policy: BookingPolicy = create_test_policy();
    let technicians: Vec<Technician> = vec![create_test_technician(1)];
    let busy: BusySchedule = busy_at_ten(1);
    let engine: AvailabilityEngine<'_> = AvailabilityEngine::new(&policy, &technicians, &busy);

    let disabled: Vec<DisabledSlot> = engine
        .disabled_slots(&create_test_duration(), MONDAY, MONDAY, create_test_now())
        .unwrap();

    // Existing 10:00-11:00 with a 60 minute buffer blocks 09:00, 10:00 and 11:00.
    let blocked: Vec<_> = disabled.iter().map(|slot| slot.time).collect();
    assert_eq!(blocked, vec![time!(9:00), time!(10:00), time!(11:00)]);
    assert!(
        disabled
            .iter()
            .all(|slot| slot.reason == DisabledReason::FullyBooked)
    );
}

#[test]
fn test_second_technician_keeps_slot_open() {
    let policy: BookingPolicy = create_test_policy();
    let technicians: Vec<Technician> = vec![create_test_technician(1), create_test_technician(2)];
    let busy: BusySchedule = busy_at_ten(1);
    let engine: AvailabilityEngine<'_> = AvailabilityEngine::new(&policy, &technicians, &busy);

    assert_eq!(
        engine.evaluate_slot(&create_test_duration(), MONDAY, time!(10:00), create_test_now()),
        None
    );
}

#[test]
fn test_inactive_technician_does_not_count_as_on_shift() {
    let policy: BookingPolicy = create_test_policy();
    let mut technician: Technician = create_test_technician(1);
    technician.is_active = false;
    let technicians: Vec<Technician> = vec![technician];
    let busy: BusySchedule = BusySchedule::new();
    let engine: AvailabilityEngine<'_> = AvailabilityEngine::new(&policy, &technicians, &busy);

    assert_eq!(
        engine.evaluate_slot(&create_test_duration(), MONDAY, time!(13:00), create_test_now()),
        Some(DisabledReason::NoEngineerShift)
    );
}

#[test]
fn test_minimum_notice_takes_precedence() {
    let policy: BookingPolicy = create_test_policy();
    let technicians: Vec<Technician> = vec![create_test_technician(1)];
    let busy: BusySchedule = busy_at_ten(1);
    let engine: AvailabilityEngine<'_> = AvailabilityEngine::new(&policy, &technicians, &busy);
    let now = datetime!(2026-10-19 8:30);

    let disabled: Vec<DisabledSlot> = engine
        .disabled_slots(&create_test_duration(), MONDAY, MONDAY, now)
        .unwrap();

    let reason_at = |hour: u8| {
        disabled
            .iter()
            .find(|slot| slot.time.hour() == hour)
            .map(|slot| slot.reason)
    };
    // Earliest start is 11:30.
    assert_eq!(reason_at(9), Some(DisabledReason::TooCloseOrPast));
    assert_eq!(reason_at(10), Some(DisabledReason::TooCloseOrPast));
    assert_eq!(reason_at(11), Some(DisabledReason::TooCloseOrPast));
    assert_eq!(reason_at(12), None);
}

#[test]
fn test_multi_day_range_is_ordered() {
    let policy: BookingPolicy = create_test_policy();
    let technicians: Vec<Technician> = vec![create_test_technician(1)];
    let busy: BusySchedule = BusySchedule::new();
    let engine: AvailabilityEngine<'_> = AvailabilityEngine::new(&policy, &technicians, &busy);

    // Sunday through Tuesday: Sunday and Tuesday have no shifts.
    let disabled: Vec<DisabledSlot> = engine
        .disabled_slots(
            &create_test_duration(),
            date!(2026 - 10 - 18),
            date!(2026 - 10 - 20),
            create_test_now(),
        )
        .unwrap();

    assert_eq!(disabled.len(), 18);
    assert_eq!(disabled[0].date, date!(2026 - 10 - 18));
    assert_eq!(disabled[17].date, date!(2026 - 10 - 20));
    assert!(disabled.windows(2).all(|pair| {
        (pair[0].date, pair[0].time) < (pair[1].date, pair[1].time)
    }));
}

#[test]
fn test_invalid_range_is_rejected() {
    let policy: BookingPolicy = create_test_policy();
    let technicians: Vec<Technician> = vec![];
    let busy: BusySchedule = BusySchedule::new();
    let engine: AvailabilityEngine<'_> = AvailabilityEngine::new(&policy, &technicians, &busy);

    let result = engine.disabled_slots(
        &create_test_duration(),
        date!(2026 - 10 - 20),
        date!(2026 - 10 - 19),
        create_test_now(),
    );

    assert!(matches!(
        result,
        Err(crate::CoreError::DomainViolation(
            DomainError::InvalidDateRange { .. }
        ))
    ));
}
