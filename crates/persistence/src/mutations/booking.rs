// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The create-and-assign booking transaction.
//!
//! ## Sequence
//!
//! 1. Outside any transaction: the policy, business and device exist and
//!    belong together, the start respects minimum notice, the job ends on
//!    the same day, and the business belongs to the customer.
//! 2. `BEGIN IMMEDIATE`: insert the reservation as `PENDING`.
//! 3. Read active technicians and every busy interval within one buffer of
//!    the job (including the neighbouring dates) under the write lock and evaluate the eligibility predicate.
//! 4. No candidate: return an error, which rolls back the `PENDING` row.
//! 5. Otherwise assign the selected technician, mark `CONFIRMED`, commit.
//!
//! Because the write lock is held from step 2, two concurrent bookings for
//! the same technician and time serialize; the second one sees the first
//! one's `CONFIRMED` row and finds nobody eligible.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::PrimitiveDateTime;
use tracing::{debug, info, warn};
use visit_booking::{CoreError, TechnicianSelector, plan_assignment, validate_requested_start};
use visit_booking_domain::{
    BookingPolicy, BusySchedule, DurationPolicy, Reservation, ReservationStatus,
    ServiceInterval, Technician, format_date, format_timestamp,
};

use crate::backend::BookingConnection;
use crate::data_models::BookingRequest;
use crate::diesel_schema::reservations;
use crate::error::PersistenceError;
use crate::queries::reference::{
    device_belongs_to_business, get_business_owner, get_duration_policy,
    list_active_technicians_with_shifts,
};
use crate::queries::reservations::{get_reservation, load_busy_schedule};

/// Creates a reservation and assigns one eligible technician atomically.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `request` - What to book and for whom
/// * `policy` - The booking rules in force
/// * `now` - The current local time
/// * `selector` - Chooses among eligible technicians
///
/// # Errors
///
/// Returns an error if:
/// - The policy, business or device does not exist
/// - The business belongs to another customer
/// - The start is too close or in the past, or the job crosses midnight
/// - No technician is eligible (nothing is persisted)
/// - The database fails
pub fn create_and_assign(
    conn: &mut SqliteConnection,
    request: &BookingRequest,
    policy: &BookingPolicy,
    now: PrimitiveDateTime,
    selector: &dyn TechnicianSelector,
) -> Result<Reservation, PersistenceError> {
    let duration: DurationPolicy = get_duration_policy(conn, request.policy_id)?;
    let owner_id: i64 = get_business_owner(conn, request.business_id)?;
    if !device_belongs_to_business(conn, request.device_id, request.business_id)? {
        return Err(PersistenceError::DeviceNotFound {
            device_id: request.device_id,
            business_id: request.business_id,
        });
    }

    let interval: ServiceInterval = validate_requested_start(
        policy,
        &duration,
        request.reserved_date,
        request.service_time,
        now,
    )?;

    if owner_id != request.customer_id {
        return Err(PersistenceError::BusinessNotOwned {
            business_id: request.business_id,
            customer_id: request.customer_id,
        });
    }

    let reservation_id: i64 = conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(reservations::table)
            .values((
                reservations::customer_id.eq(request.customer_id),
                reservations::business_id.eq(request.business_id),
                reservations::device_id.eq(request.device_id),
                reservations::policy_id.eq(request.policy_id),
                reservations::reserved_date.eq(format_date(request.reserved_date)),
                reservations::service_start.eq(format_timestamp(interval.start())),
                reservations::service_end.eq(format_timestamp(interval.end())),
                reservations::status.eq(ReservationStatus::Pending.as_str()),
            ))
            .execute(conn)?;
        let reservation_id: i64 = conn.last_insert_id()?;
        debug!(reservation_id, "Inserted pending reservation");

        let technicians: Vec<Technician> = list_active_technicians_with_shifts(conn)?;
        let (window_start, window_end) = policy.conflict_window(interval.start(), interval.end());
        let busy: BusySchedule = load_busy_schedule(conn, window_start, window_end)?;

        let technician_id: i64 =
            match plan_assignment(&technicians, &interval, &busy, policy.buffer(), selector) {
                Ok(technician_id) => technician_id,
                Err(err @ CoreError::NoEligibleTechnician { .. }) => {
                    warn!(
                        reservation_id,
                        policy_id = request.policy_id,
                        service_start = %interval.start(),
                        "No eligible technician, rolling back"
                    );
                    return Err(PersistenceError::Rejected(err));
                }
                Err(err) => return Err(PersistenceError::Rejected(err)),
            };

        let updated: usize = diesel::update(reservations::table)
            .filter(reservations::reservation_id.eq(reservation_id))
            .filter(reservations::status.eq(ReservationStatus::Pending.as_str()))
            .set((
                reservations::technician_id.eq(Some(technician_id)),
                reservations::status.eq(ReservationStatus::Confirmed.as_str()),
                reservations::updated_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
                    "CURRENT_TIMESTAMP",
                )),
            ))
            .execute(conn)?;
        if updated != 1 {
            return Err(PersistenceError::Storage(format!(
                "expected to confirm 1 pending reservation, updated {updated}"
            )));
        }

        info!(
            reservation_id,
            technician_id,
            customer_id = request.customer_id,
            service_start = %interval.start(),
            "Reservation confirmed"
        );
        Ok(reservation_id)
    })?;

    Ok(get_reservation(conn, reservation_id)?.reservation)
}
