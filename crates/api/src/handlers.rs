// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Each handler validates and parses its request, runs the persistence
//! operation, and translates every failure into an `ApiError`. Handlers are
//! synchronous; the server decides how they are scheduled.

use time::{Date, PrimitiveDateTime, Time};
use tracing::{debug, info, warn};
use visit_booking::{Actor, AvailabilityEngine, Command, TransitionResult};
use visit_booking_domain::{
    DisabledSlot, DurationPolicy, Reservation, format_date, parse_date, parse_time,
};
use visit_booking_persistence::{
    BookingRequest, Persistence, ReservationData, ScheduleSnapshot,
};

use crate::BookingContext;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AvailabilityQuery, AvailabilityResponse, CancelReservationRequest, CreateReservationRequest,
    CreateReservationResponse, DisabledSlotInfo, GetReservationResponse,
    ListTechnicianReservationsResponse, ReservationInfo, TechnicianActionRequest,
    TransitionResponse,
};

fn required<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("{field} is required"),
    })
}

/// Parses a date, naming the offending field on failure.
fn parse_date_field(value: &str, field: &str) -> Result<Date, ApiError> {
    parse_date(value).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: e.to_string(),
    })
}

fn parse_time_field(value: &str, field: &str) -> Result<Time, ApiError> {
    parse_time(value).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: e.to_string(),
    })
}

/// Reports the disabled slots of a date range for one duration policy.
///
/// The answer is advisory: it is computed from a consistent read without
/// the write lock, and a later booking re-checks eligibility.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `ctx` - Booking rules and clock
/// * `query` - The requested range and policy
///
/// # Errors
///
/// Returns an error if:
/// - A parameter is missing or malformed
/// - The range is reversed or longer than the configured maximum
/// - The duration policy does not exist
/// - The schedule cannot be read
pub fn query_availability(
    persistence: &mut Persistence,
    ctx: &BookingContext<'_>,
    query: &AvailabilityQuery,
) -> Result<AvailabilityResponse, ApiError> {
    let start_date: Date =
        parse_date_field(required(query.start_date.as_deref(), "start_date")?, "start_date")?;
    let end_date: Date =
        parse_date_field(required(query.end_date.as_deref(), "end_date")?, "end_date")?;
    let policy_id: i64 = required(query.policy_id, "policy_id")?;

    // Reject bad ranges before touching the database.
    ctx.policy
        .dates_in_range(start_date, end_date)
        .map_err(translate_domain_error)?;

    let duration: DurationPolicy = persistence
        .get_duration_policy(policy_id)
        .map_err(translate_persistence_error)?;
    let snapshot: ScheduleSnapshot = persistence
        .load_schedule(start_date, end_date, ctx.policy)
        .map_err(translate_persistence_error)?;

    let now: PrimitiveDateTime = ctx.clock.now().map_err(translate_core_error)?;
    let engine: AvailabilityEngine<'_> =
        AvailabilityEngine::new(ctx.policy, &snapshot.technicians, &snapshot.busy);
    let disabled: Vec<DisabledSlot> = engine
        .disabled_slots(&duration, start_date, end_date, now)
        .map_err(translate_core_error)?;

    debug!(
        policy_id,
        %start_date,
        %end_date,
        disabled_count = disabled.len(),
        "Computed availability"
    );

    Ok(AvailabilityResponse {
        start_date: format_date(start_date),
        end_date: format_date(end_date),
        policy_id,
        duration_minutes: duration.duration_minutes(),
        disabled_slots: disabled.iter().map(DisabledSlotInfo::from).collect(),
    })
}

/// Books a visit and assigns a technician.
///
/// # Errors
///
/// Returns an error if:
/// - The date or time is malformed
/// - The policy, business or device does not exist
/// - The business does not belong to the customer
/// - The start is inside the minimum notice period, or the job crosses midnight
/// - No technician is eligible
/// - The database fails
pub fn create_reservation(
    persistence: &mut Persistence,
    ctx: &BookingContext<'_>,
    request: &CreateReservationRequest,
) -> Result<CreateReservationResponse, ApiError> {
    let booking: BookingRequest = BookingRequest {
        customer_id: request.customer_id,
        business_id: request.business_id,
        device_id: request.device_id,
        policy_id: request.policy_id,
        reserved_date: parse_date_field(&request.reserved_date, "reserved_date")?,
        service_time: parse_time_field(&request.service_time, "service_time")?,
    };

    let now: PrimitiveDateTime = ctx.clock.now().map_err(translate_core_error)?;
    let reservation: Reservation = persistence
        .create_and_assign(&booking, ctx.policy, now, ctx.selector)
        .map_err(|e| {
            warn!(
                customer_id = booking.customer_id,
                policy_id = booking.policy_id,
                error = %e,
                "Booking rejected"
            );
            translate_persistence_error(e)
        })?;

    let message: String = format!(
        "Reservation {} confirmed for {}",
        reservation.reservation_id,
        format_date(reservation.reserved_date)
    );
    Ok(CreateReservationResponse {
        reservation: ReservationInfo::from(&reservation),
        message,
    })
}

fn run_transition(
    persistence: &mut Persistence,
    ctx: &BookingContext<'_>,
    reservation_id: i64,
    command: Command,
) -> Result<TransitionResponse, ApiError> {
    let action: &'static str = command.action();
    let now: PrimitiveDateTime = ctx.clock.now().map_err(translate_core_error)?;
    let result: TransitionResult = persistence
        .apply_transition(reservation_id, command, ctx.policy, now)
        .map_err(|e| {
            warn!(reservation_id, action, error = %e, "Transition rejected");
            translate_persistence_error(e)
        })?;

    info!(
        reservation_id,
        action,
        status = %result.reservation.status,
        "Transition applied"
    );

    Ok(TransitionResponse {
        message: format!(
            "Reservation {reservation_id} moved from {} to {}",
            result.previous_status, result.reservation.status
        ),
        previous_status: result.previous_status.as_str().to_string(),
        reservation: ReservationInfo::from(&result.reservation),
    })
}

/// Marks a confirmed visit as started by its assigned technician.
///
/// # Errors
///
/// Returns an error if the reservation does not exist, the technician is not
/// assigned to it, it is not confirmed, or an earlier job of the same
/// technician that day is still open.
pub fn start_work(
    persistence: &mut Persistence,
    ctx: &BookingContext<'_>,
    reservation_id: i64,
    request: TechnicianActionRequest,
) -> Result<TransitionResponse, ApiError> {
    run_transition(
        persistence,
        ctx,
        reservation_id,
        Command::StartWork {
            technician_id: request.technician_id,
        },
    )
}

/// Marks a started visit as completed by its assigned technician.
///
/// # Errors
///
/// Returns an error if the reservation does not exist, the technician is not
/// assigned to it, or it has not started.
pub fn complete_work(
    persistence: &mut Persistence,
    ctx: &BookingContext<'_>,
    reservation_id: i64,
    request: TechnicianActionRequest,
) -> Result<TransitionResponse, ApiError> {
    run_transition(
        persistence,
        ctx,
        reservation_id,
        Command::CompleteWork {
            technician_id: request.technician_id,
        },
    )
}

/// Cancels a visit on behalf of its customer or assigned technician.
///
/// # Errors
///
/// Returns an error if:
/// - The actor type is unknown or the reason is too long
/// - The reservation does not exist
/// - The actor may not act on the reservation
/// - The reservation is already completed or canceled
/// - A customer cancels inside the cancellation window
pub fn cancel_work(
    persistence: &mut Persistence,
    ctx: &BookingContext<'_>,
    reservation_id: i64,
    request: CancelReservationRequest,
) -> Result<TransitionResponse, ApiError> {
    let actor: Actor = match request.actor_type.trim().to_ascii_lowercase().as_str() {
        "customer" => Actor::Customer(request.actor_id),
        "technician" => Actor::Technician(request.actor_id),
        other => {
            return Err(ApiError::InvalidInput {
                field: String::from("actor_type"),
                message: format!("Unknown actor type '{other}'; expected customer or technician"),
            });
        }
    };

    run_transition(
        persistence,
        ctx,
        reservation_id,
        Command::CancelWork {
            actor,
            reason: request.reason,
        },
    )
}

/// Retrieves one reservation.
///
/// # Errors
///
/// Returns an error if the reservation does not exist or was deleted.
pub fn get_reservation(
    persistence: &mut Persistence,
    reservation_id: i64,
) -> Result<GetReservationResponse, ApiError> {
    let data: ReservationData = persistence
        .get_reservation(reservation_id)
        .map_err(translate_persistence_error)?;

    Ok(GetReservationResponse {
        reservation: ReservationInfo::from(&data.reservation),
        created_at: data.created_at,
        updated_at: data.updated_at,
    })
}

/// Lists a technician's reservations for one date, earliest first.
///
/// # Errors
///
/// Returns an error if the date is malformed or the query fails.
pub fn list_technician_reservations(
    persistence: &mut Persistence,
    technician_id: i64,
    date: &str,
) -> Result<ListTechnicianReservationsResponse, ApiError> {
    let date: Date = parse_date_field(date, "date")?;
    let reservations: Vec<Reservation> = persistence
        .list_technician_reservations(technician_id, date)
        .map_err(translate_persistence_error)?;

    Ok(ListTechnicianReservationsResponse {
        technician_id,
        date: format_date(date),
        reservations: reservations.iter().map(ReservationInfo::from).collect(),
    })
}
