// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reservation status transitions.
//!
//! Each transition re-reads the reservation inside its own immediate
//! transaction, checks it with the pure `apply` function, and writes exactly
//! one row.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::PrimitiveDateTime;
use tracing::info;
use visit_booking::{Command, TransitionContext, TransitionResult, apply};
use visit_booking_domain::{BookingPolicy, Reservation};

use crate::diesel_schema::reservations;
use crate::error::PersistenceError;
use crate::queries::reservations::{get_reservation, list_technician_reservations};

/// Applies a start, complete or cancel command to a reservation.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `reservation_id` - The reservation to transition
/// * `command` - The requested transition
/// * `policy` - The booking rules in force
/// * `now` - The current local time
///
/// # Errors
///
/// Returns an error if the reservation does not exist, the transition is
/// rejected (nothing is written), or the database fails.
pub fn apply_transition(
    conn: &mut SqliteConnection,
    reservation_id: i64,
    command: Command,
    policy: &BookingPolicy,
    now: PrimitiveDateTime,
) -> Result<TransitionResult, PersistenceError> {
    let action: &'static str = command.action();

    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let current: Reservation = get_reservation(conn, reservation_id)?.reservation;

        let same_day_jobs: Vec<Reservation> = match current.technician_id {
            Some(technician_id) => {
                list_technician_reservations(conn, technician_id, current.reserved_date)?
            }
            None => Vec::new(),
        };

        let ctx: TransitionContext<'_> = TransitionContext {
            now,
            policy,
            same_day_jobs: &same_day_jobs,
        };
        let result: TransitionResult = apply(&current, command, &ctx)?;

        let updated: usize = diesel::update(reservations::table)
            .filter(reservations::reservation_id.eq(reservation_id))
            .filter(reservations::status.eq(result.previous_status.as_str()))
            .filter(reservations::deleted_at.is_null())
            .set((
                reservations::status.eq(result.reservation.status.as_str()),
                reservations::cancel_reason.eq(result.reservation.cancel_reason.as_deref()),
                reservations::updated_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
                    "CURRENT_TIMESTAMP",
                )),
            ))
            .execute(conn)?;
        if updated != 1 {
            return Err(PersistenceError::Storage(format!(
                "expected to update 1 reservation, updated {updated}"
            )));
        }

        info!(
            reservation_id,
            action,
            from = %result.previous_status,
            to = %result.reservation.status,
            "Reservation transitioned"
        );
        Ok(result)
    })
}

/// Marks a reservation as deleted. Deleted reservations are invisible to
/// every query and free their technician's time.
///
/// # Errors
///
/// Returns an error if the reservation does not exist or is already deleted.
pub fn soft_delete_reservation(
    conn: &mut SqliteConnection,
    reservation_id: i64,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(reservations::table)
        .filter(reservations::reservation_id.eq(reservation_id))
        .filter(reservations::deleted_at.is_null())
        .set(
            reservations::deleted_at.eq(diesel::dsl::sql::<
                diesel::sql_types::Nullable<diesel::sql_types::Text>,
            >("CURRENT_TIMESTAMP")),
        )
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::ReservationNotFound(reservation_id));
    }

    info!(reservation_id, "Reservation soft-deleted");
    Ok(())
}
