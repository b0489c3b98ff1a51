// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference data queries.
//!
//! These are the reads the booking core consumes from collaborating
//! services: technician calendars, duration lookups, and ownership facts.

use diesel::SqliteConnection;
use diesel::prelude::*;
use std::collections::HashMap;
use tracing::debug;
use visit_booking_domain::{DomainError, DurationPolicy, ShiftWindow, Technician, parse_time};

use crate::diesel_schema::{businesses, devices, duration_policies, shift_windows, technicians};
use crate::error::PersistenceError;

/// Raw shift row: `(technician_id, day_of_week, start_time, end_time)`.
type ShiftRow = (i64, i32, String, String);

fn shift_from_row(row: &ShiftRow) -> Result<ShiftWindow, PersistenceError> {
    let (technician_id, day_of_week, start_time, end_time) = row;
    let corrupt = |e: DomainError| {
        PersistenceError::CorruptRow(format!("shift of technician {technician_id}: {e}"))
    };

    let day: u8 = u8::try_from(*day_of_week).map_err(|_| {
        PersistenceError::CorruptRow(format!(
            "shift of technician {technician_id}: day of week {day_of_week}"
        ))
    })?;
    let start = parse_time(start_time).map_err(corrupt)?;
    let end = parse_time(end_time).map_err(corrupt)?;
    ShiftWindow::new(day, start, end).map_err(corrupt)
}

/// Retrieves the weekly shift windows of one technician.
///
/// # Errors
///
/// Returns an error if the technician does not exist or a row is invalid.
pub fn get_technician_shifts(
    conn: &mut SqliteConnection,
    technician_id: i64,
) -> Result<Vec<ShiftWindow>, PersistenceError> {
    debug!(technician_id, "Loading technician shifts");

    let exists: Option<i64> = technicians::table
        .filter(technicians::technician_id.eq(technician_id))
        .select(technicians::technician_id)
        .first::<i64>(conn)
        .optional()
        .map_err(|e| PersistenceError::Storage(format!("get_technician_shifts: {e}")))?;
    if exists.is_none() {
        return Err(PersistenceError::TechnicianNotFound(technician_id));
    }

    let rows: Vec<ShiftRow> = shift_windows::table
        .filter(shift_windows::technician_id.eq(technician_id))
        .order((shift_windows::day_of_week.asc(), shift_windows::start_time.asc()))
        .select((
            shift_windows::technician_id,
            shift_windows::day_of_week,
            shift_windows::start_time,
            shift_windows::end_time,
        ))
        .load::<ShiftRow>(conn)
        .map_err(|e| PersistenceError::Storage(format!("get_technician_shifts: {e}")))?;

    rows.iter().map(shift_from_row).collect()
}

/// Retrieves every active technician with all of their shift windows.
///
/// Technicians are returned in ID order so selection inputs are stable.
///
/// # Errors
///
/// Returns an error if the query fails or a row is invalid.
pub fn list_active_technicians_with_shifts(
    conn: &mut SqliteConnection,
) -> Result<Vec<Technician>, PersistenceError> {
    let rows: Vec<(i64, String, String)> = technicians::table
        .filter(technicians::is_active.eq(1))
        .order(technicians::technician_id.asc())
        .select((technicians::technician_id, technicians::name, technicians::grade))
        .load::<(i64, String, String)>(conn)
        .map_err(|e| {
            PersistenceError::Storage(format!("list_active_technicians_with_shifts: {e}"))
        })?;

    let shift_rows: Vec<ShiftRow> = shift_windows::table
        .inner_join(technicians::table)
        .filter(technicians::is_active.eq(1))
        .order((
            shift_windows::technician_id.asc(),
            shift_windows::day_of_week.asc(),
            shift_windows::start_time.asc(),
        ))
        .select((
            shift_windows::technician_id,
            shift_windows::day_of_week,
            shift_windows::start_time,
            shift_windows::end_time,
        ))
        .load::<ShiftRow>(conn)
        .map_err(|e| {
            PersistenceError::Storage(format!("list_active_technicians_with_shifts: {e}"))
        })?;

    let mut shifts_by_technician: HashMap<i64, Vec<ShiftWindow>> = HashMap::new();
    for row in &shift_rows {
        shifts_by_technician
            .entry(row.0)
            .or_default()
            .push(shift_from_row(row)?);
    }

    debug!(count = rows.len(), "Loaded active technicians");

    Ok(rows
        .into_iter()
        .map(|(technician_id, name, grade)| Technician {
            technician_id,
            name,
            grade,
            is_active: true,
            shifts: shifts_by_technician
                .remove(&technician_id)
                .unwrap_or_default(),
        })
        .collect())
}

/// Retrieves a duration policy by ID.
///
/// # Errors
///
/// Returns `PersistenceError::PolicyNotFound` if no such policy exists.
pub fn get_duration_policy(
    conn: &mut SqliteConnection,
    policy_id: i64,
) -> Result<DurationPolicy, PersistenceError> {
    let row: Option<(String, String, i64)> = duration_policies::table
        .filter(duration_policies::policy_id.eq(policy_id))
        .select((
            duration_policies::device_size,
            duration_policies::service_kind,
            duration_policies::duration_minutes,
        ))
        .first::<(String, String, i64)>(conn)
        .optional()
        .map_err(|e| PersistenceError::Storage(format!("get_duration_policy: {e}")))?;

    let (device_size, service_kind, duration_minutes) =
        row.ok_or(PersistenceError::PolicyNotFound(policy_id))?;

    DurationPolicy::new(policy_id, &device_size, &service_kind, duration_minutes).map_err(|e| {
        PersistenceError::CorruptRow(format!("duration policy {policy_id}: {e}"))
    })
}

/// Returns the owning customer of a business.
///
/// # Errors
///
/// Returns `PersistenceError::BusinessNotFound` if the business does not exist.
pub fn get_business_owner(
    conn: &mut SqliteConnection,
    business_id: i64,
) -> Result<i64, PersistenceError> {
    businesses::table
        .filter(businesses::business_id.eq(business_id))
        .select(businesses::customer_id)
        .first::<i64>(conn)
        .optional()
        .map_err(|e| PersistenceError::Storage(format!("get_business_owner: {e}")))?
        .ok_or(PersistenceError::BusinessNotFound(business_id))
}

/// Returns true if the business exists and belongs to the customer.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn check_business_ownership(
    conn: &mut SqliteConnection,
    business_id: i64,
    customer_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = businesses::table
        .filter(businesses::business_id.eq(business_id))
        .filter(businesses::customer_id.eq(customer_id))
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::Storage(format!("check_business_ownership: {e}")))?;
    Ok(count > 0)
}

/// Returns true if the device exists and is registered to the business.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn device_belongs_to_business(
    conn: &mut SqliteConnection,
    device_id: i64,
    business_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = devices::table
        .filter(devices::device_id.eq(device_id))
        .filter(devices::business_id.eq(business_id))
        .count()
        .get_result(conn)
        .map_err(|e| {
            PersistenceError::Storage(format!("device_belongs_to_business: {e}"))
        })?;
    Ok(count > 0)
}
