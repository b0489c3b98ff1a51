// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Actor, Command};
use crate::error::CoreError;
use crate::state::{TransitionContext, TransitionResult};
use time::PrimitiveDateTime;
use visit_booking_domain::{DomainError, Reservation, ReservationStatus, validate_cancel_reason};

/// Applies a transition command to a reservation, producing the updated row.
///
/// This function is pure. The caller is responsible for reading
/// `reservation` and `ctx.same_day_jobs` under the write lock and for
/// writing the returned reservation in the same transaction.
///
/// # Arguments
///
/// * `reservation` - The reservation as currently persisted
/// * `command` - The requested transition
/// * `ctx` - Clock reading, booking policy, and the technician's other jobs
///
/// # Errors
///
/// Returns an error if:
/// - The acting party is not allowed to touch the reservation
/// - The current status does not allow the transition
/// - An earlier job of the same technician on the same day is still open
/// - A customer cancels inside the cancellation window
/// - The cancel reason is too long
pub fn apply(
    reservation: &Reservation,
    command: Command,
    ctx: &TransitionContext<'_>,
) -> Result<TransitionResult, CoreError> {
    let action: &'static str = command.action();
    let previous_status: ReservationStatus = reservation.status;
    let mut updated: Reservation = reservation.clone();

    match command {
        Command::StartWork { technician_id } => {
            ensure_assigned(reservation, technician_id)?;
            ensure_transition(reservation, ReservationStatus::Start, action)?;
            ensure_previous_work_closed(reservation, ctx.same_day_jobs)?;
            updated.status = ReservationStatus::Start;
        }
        Command::CompleteWork { technician_id } => {
            ensure_assigned(reservation, technician_id)?;
            ensure_transition(reservation, ReservationStatus::Completed, action)?;
            updated.status = ReservationStatus::Completed;
        }
        Command::CancelWork { actor, reason } => {
            match actor {
                Actor::Customer(customer_id) => {
                    if reservation.customer_id != customer_id {
                        return Err(DomainError::NotReservationOwner {
                            reservation_id: reservation.reservation_id,
                            customer_id,
                        }
                        .into());
                    }
                    ensure_transition(reservation, ReservationStatus::Canceled, action)?;
                    let deadline: PrimitiveDateTime =
                        ctx.policy.cancellation_deadline(reservation.service_start);
                    if ctx.now > deadline {
                        return Err(DomainError::TooLateToCancel {
                            reservation_id: reservation.reservation_id,
                            service_start: reservation.service_start,
                            deadline,
                        }
                        .into());
                    }
                }
                Actor::Technician(technician_id) => {
                    ensure_assigned(reservation, technician_id)?;
                    ensure_transition(reservation, ReservationStatus::Canceled, action)?;
                }
            }
            updated.cancel_reason = validate_cancel_reason(reason.as_deref())?;
            updated.status = ReservationStatus::Canceled;
        }
    }

    Ok(TransitionResult {
        reservation: updated,
        previous_status,
    })
}

fn ensure_assigned(reservation: &Reservation, technician_id: i64) -> Result<(), CoreError> {
    if reservation.technician_id == Some(technician_id) {
        Ok(())
    } else {
        Err(DomainError::NotAssignedTechnician {
            reservation_id: reservation.reservation_id,
            technician_id,
        }
        .into())
    }
}

fn ensure_transition(
    reservation: &Reservation,
    target: ReservationStatus,
    action: &'static str,
) -> Result<(), CoreError> {
    if reservation.status.can_transition_to(target) {
        Ok(())
    } else {
        Err(DomainError::InvalidStatusTransition {
            reservation_id: reservation.reservation_id,
            from: reservation.status,
            action,
        }
        .into())
    }
}

/// A technician works their day in order: any earlier job on the same date
/// must be completed or canceled before the next one starts.
fn ensure_previous_work_closed(
    reservation: &Reservation,
    same_day_jobs: &[Reservation],
) -> Result<(), CoreError> {
    let blocking: Option<&Reservation> = same_day_jobs
        .iter()
        .filter(|job| job.reservation_id != reservation.reservation_id)
        .filter(|job| job.technician_id == reservation.technician_id)
        .filter(|job| job.reserved_date == reservation.reserved_date)
        .filter(|job| job.service_start < reservation.service_start)
        .filter(|job| !job.status.is_terminal())
        .min_by_key(|job| job.service_start);

    match blocking {
        Some(job) => Err(DomainError::PreviousWorkIncomplete {
            reservation_id: reservation.reservation_id,
            blocking_reservation_id: job.reservation_id,
        }
        .into()),
        None => Ok(()),
    }
}
