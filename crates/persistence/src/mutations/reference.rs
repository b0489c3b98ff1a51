// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference data registration.
//!
//! Customers, businesses, devices, technicians and duration policies belong
//! to collaborating services. These mutations let those services (and tests)
//! mirror the facts the booking core reads.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;
use visit_booking_domain::{DurationPolicy, ShiftWindow, format_time, validate_name};

use crate::backend::BookingConnection;
use crate::diesel_schema::{
    businesses, customers, devices, duration_policies, shift_windows, technicians,
};
use crate::error::PersistenceError;

/// Registers a customer.
///
/// # Errors
///
/// Returns an error if the name is invalid or the insert fails.
pub fn register_customer(conn: &mut SqliteConnection, name: &str) -> Result<i64, PersistenceError> {
    validate_name(name)?;

    diesel::insert_into(customers::table)
        .values(customers::name.eq(name))
        .execute(conn)?;

    let customer_id: i64 = conn.last_insert_id()?;
    info!(customer_id, "Registered customer");
    Ok(customer_id)
}

/// Registers a business owned by a customer.
///
/// # Errors
///
/// Returns an error if the customer does not exist or the insert fails.
pub fn register_business(
    conn: &mut SqliteConnection,
    customer_id: i64,
    name: &str,
) -> Result<i64, PersistenceError> {
    validate_name(name)?;

    let customer_exists: i64 = customers::table
        .filter(customers::customer_id.eq(customer_id))
        .count()
        .get_result(conn)?;
    if customer_exists == 0 {
        return Err(PersistenceError::CustomerNotFound(customer_id));
    }

    diesel::insert_into(businesses::table)
        .values((
            businesses::customer_id.eq(customer_id),
            businesses::name.eq(name),
        ))
        .execute(conn)?;

    let business_id: i64 = conn.last_insert_id()?;
    info!(business_id, customer_id, "Registered business");
    Ok(business_id)
}

/// Registers a device at a business.
///
/// # Errors
///
/// Returns an error if the business does not exist or the insert fails.
pub fn register_device(
    conn: &mut SqliteConnection,
    business_id: i64,
    device_size: &str,
    label: &str,
) -> Result<i64, PersistenceError> {
    validate_name(label)?;

    let business_exists: i64 = businesses::table
        .filter(businesses::business_id.eq(business_id))
        .count()
        .get_result(conn)?;
    if business_exists == 0 {
        return Err(PersistenceError::BusinessNotFound(business_id));
    }

    diesel::insert_into(devices::table)
        .values((
            devices::business_id.eq(business_id),
            devices::device_size.eq(device_size),
            devices::label.eq(label),
        ))
        .execute(conn)?;

    let device_id: i64 = conn.last_insert_id()?;
    info!(device_id, business_id, "Registered device");
    Ok(device_id)
}

/// Registers an active technician with no shifts.
///
/// # Errors
///
/// Returns an error if the name is invalid or the insert fails.
pub fn register_technician(
    conn: &mut SqliteConnection,
    name: &str,
    grade: &str,
) -> Result<i64, PersistenceError> {
    validate_name(name)?;

    diesel::insert_into(technicians::table)
        .values((
            technicians::name.eq(name),
            technicians::grade.eq(grade),
            technicians::is_active.eq(1),
        ))
        .execute(conn)?;

    let technician_id: i64 = conn.last_insert_id()?;
    info!(technician_id, grade, "Registered technician");
    Ok(technician_id)
}

/// Adds a weekly shift window to a technician.
///
/// # Errors
///
/// Returns an error if the technician does not exist or the insert fails.
pub fn add_shift_window(
    conn: &mut SqliteConnection,
    technician_id: i64,
    shift: &ShiftWindow,
) -> Result<i64, PersistenceError> {
    ensure_technician_exists(conn, technician_id)?;

    diesel::insert_into(shift_windows::table)
        .values((
            shift_windows::technician_id.eq(technician_id),
            shift_windows::day_of_week.eq(i32::from(shift.day_of_week())),
            shift_windows::start_time.eq(format_time(shift.start_time())),
            shift_windows::end_time.eq(format_time(shift.end_time())),
        ))
        .execute(conn)?;

    let shift_window_id: i64 = conn.last_insert_id()?;
    info!(
        technician_id,
        shift_window_id,
        day_of_week = shift.day_of_week(),
        "Added shift window"
    );
    Ok(shift_window_id)
}

/// Activates or deactivates a technician.
///
/// Deactivation does not touch existing reservations; it only removes the
/// technician from future eligibility.
///
/// # Errors
///
/// Returns an error if the technician does not exist or the update fails.
pub fn set_technician_active(
    conn: &mut SqliteConnection,
    technician_id: i64,
    is_active: bool,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(technicians::table)
        .filter(technicians::technician_id.eq(technician_id))
        .set(technicians::is_active.eq(i32::from(is_active)))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::TechnicianNotFound(technician_id));
    }

    info!(technician_id, is_active, "Updated technician activity");
    Ok(())
}

/// Registers a duration policy for a `(device_size, service_kind)` pair.
///
/// # Errors
///
/// Returns an error if the pair is already registered or the insert fails.
pub fn register_duration_policy(
    conn: &mut SqliteConnection,
    device_size: &str,
    service_kind: &str,
    duration_minutes: i64,
) -> Result<DurationPolicy, PersistenceError> {
    // Validate before insert; the id is filled in afterwards.
    DurationPolicy::new(0, device_size, service_kind, duration_minutes)?;

    diesel::insert_into(duration_policies::table)
        .values((
            duration_policies::device_size.eq(device_size),
            duration_policies::service_kind.eq(service_kind),
            duration_policies::duration_minutes.eq(duration_minutes),
        ))
        .execute(conn)?;

    let policy_id: i64 = conn.last_insert_id()?;
    info!(
        policy_id,
        device_size, service_kind, duration_minutes, "Registered duration policy"
    );
    Ok(DurationPolicy::new(
        policy_id,
        device_size,
        service_kind,
        duration_minutes,
    )?)
}

fn ensure_technician_exists(
    conn: &mut SqliteConnection,
    technician_id: i64,
) -> Result<(), PersistenceError> {
    let count: i64 = technicians::table
        .filter(technicians::technician_id.eq(technician_id))
        .count()
        .get_result(conn)?;
    if count == 0 {
        return Err(PersistenceError::TechnicianNotFound(technician_id));
    }
    Ok(())
}
