// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reservation queries.
//!
//! Soft-deleted rows (`deleted_at IS NOT NULL`) are invisible to every query
//! in this module. `PENDING` rows only exist inside an open booking
//! transaction and are never returned either.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::{Date, PrimitiveDateTime};
use tracing::debug;
use visit_booking_domain::{
    BusySchedule, Reservation, ReservationStatus, ServiceInterval, format_date, format_timestamp,
    parse_timestamp,
};

use crate::data_models::{ReservationData, ReservationRow};
use crate::diesel_schema::reservations;
use crate::error::PersistenceError;

/// Statuses that occupy a technician's time.
const BLOCKING_STATUSES: [&str; 2] = [
    ReservationStatus::Confirmed.as_str(),
    ReservationStatus::Start.as_str(),
];

/// Retrieves a reservation by ID.
///
/// # Errors
///
/// Returns `PersistenceError::ReservationNotFound` if the reservation does
/// not exist, was soft-deleted, or is still pending.
pub fn get_reservation(
    conn: &mut SqliteConnection,
    reservation_id: i64,
) -> Result<ReservationData, PersistenceError> {
    let row: Option<ReservationRow> = reservations::table
        .filter(reservations::reservation_id.eq(reservation_id))
        .filter(reservations::deleted_at.is_null())
        .filter(reservations::status.ne(ReservationStatus::Pending.as_str()))
        .select(ReservationRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::Storage(format!("get_reservation: {e}")))?;

    row.ok_or(PersistenceError::ReservationNotFound(reservation_id))?
        .into_data()
}

/// Retrieves every reservation of a technician on one date, earliest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is invalid.
pub fn list_technician_reservations(
    conn: &mut SqliteConnection,
    technician_id: i64,
    date: Date,
) -> Result<Vec<Reservation>, PersistenceError> {
    debug!(technician_id, %date, "Listing technician reservations");

    reservations::table
        .filter(reservations::technician_id.eq(technician_id))
        .filter(reservations::reserved_date.eq(format_date(date)))
        .filter(reservations::deleted_at.is_null())
        .filter(reservations::status.ne(ReservationStatus::Pending.as_str()))
        .order((
            reservations::service_start.asc(),
            reservations::reservation_id.asc(),
        ))
        .select(ReservationRow::as_select())
        .load::<ReservationRow>(conn)
        .map_err(|e| PersistenceError::Storage(format!("list_technician_reservations: {e}")))?
        .into_iter()
        .map(ReservationRow::into_reservation)
        .collect()
}

/// Loads the occupied intervals of every technician that end after
/// `window_start` and start before `window_end`.
///
/// Only `CONFIRMED` and `START` reservations occupy time. Callers widen the
/// window by the travel buffer, so jobs on a neighbouring date whose buffer
/// reaches across midnight are included.
///
/// # Errors
///
/// Returns an error if the query fails or a row is invalid.
pub fn load_busy_schedule(
    conn: &mut SqliteConnection,
    window_start: PrimitiveDateTime,
    window_end: PrimitiveDateTime,
) -> Result<BusySchedule, PersistenceError> {
    let rows: Vec<(i64, Option<i64>, String, String)> = reservations::table
        .filter(reservations::service_end.gt(format_timestamp(window_start)))
        .filter(reservations::service_start.lt(format_timestamp(window_end)))
        .filter(reservations::status.eq_any(BLOCKING_STATUSES))
        .filter(reservations::deleted_at.is_null())
        .select((
            reservations::reservation_id,
            reservations::technician_id,
            reservations::service_start,
            reservations::service_end,
        ))
        .load::<(i64, Option<i64>, String, String)>(conn)
        .map_err(|e| PersistenceError::Storage(format!("load_busy_schedule: {e}")))?;

    debug!(
        busy_count = rows.len(),
        %window_start,
        %window_end,
        "Loaded busy schedule"
    );

    let mut schedule: BusySchedule = BusySchedule::new();
    for (reservation_id, technician_id, service_start, service_end) in rows {
        let Some(technician_id) = technician_id else {
            return Err(PersistenceError::CorruptRow(format!(
                "reservation {reservation_id}: blocking status without technician"
            )));
        };
        let interval: ServiceInterval = parse_timestamp(&service_start)
            .and_then(|start| {
                parse_timestamp(&service_end).and_then(|end| ServiceInterval::new(start, end))
            })
            .map_err(|e| PersistenceError::CorruptRow(format!("reservation {reservation_id}: {e}")))?;
        schedule.add(technician_id, interval);
    }
    Ok(schedule)
}
