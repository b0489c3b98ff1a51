// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use visit_booking::{Clock, RandomSelector, SystemClock, TechnicianSelector};
use visit_booking_api::{
    ApiError, AvailabilityQuery, AvailabilityResponse, BookingContext, CancelReservationRequest,
    CreateReservationRequest, CreateReservationResponse, GetReservationResponse,
    ListTechnicianReservationsResponse, TechnicianActionRequest, TransitionResponse, cancel_work,
    complete_work, create_reservation, get_reservation, list_technician_reservations,
    query_availability, start_work,
};
use visit_booking_domain::BookingPolicy;
use visit_booking_persistence::Persistence;

/// Visit Booking Server - HTTP server for field-service visit booking
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// IANA timezone of the service area; reservations are local wall-clock times in it
    #[arg(short, long, default_value = "Asia/Seoul")]
    timezone: String,

    /// Idle minutes required before and after every job for travel
    #[arg(long, default_value_t = 60)]
    buffer_minutes: u32,

    /// Minutes between now and the earliest bookable service start
    #[arg(long, default_value_t = 180)]
    minimum_notice_minutes: u32,

    /// Minutes before service start after which customers can no longer cancel
    #[arg(long, default_value_t = 24 * 60)]
    cancellation_window_minutes: u32,
}

/// Application state shared across handlers.
///
/// The persistence layer is wrapped in a Mutex; each request holds it for
/// the duration of one booking or transition transaction.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    policy: BookingPolicy,
    clock: Arc<dyn Clock>,
    selector: Arc<dyn TechnicianSelector>,
}

impl AppState {
    fn booking_context(&self) -> BookingContext<'_> {
        BookingContext {
            policy: &self.policy,
            clock: self.clock.as_ref(),
            selector: self.selector.as_ref(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TechnicianDayQuery {
    date: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error category: `validation`, `not_found`, `forbidden`, `conflict` or `system`.
    error: String,
    /// The specific rule, field or resource.
    kind: String,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    body: ErrorResponse,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        // Storage detail stays in the log.
        let message: String = if status == StatusCode::INTERNAL_SERVER_ERROR {
            String::from("Internal storage error")
        } else {
            err.message().to_string()
        };
        Self {
            status,
            body: ErrorResponse {
                error: err.category().to_string(),
                kind: err.kind().to_string(),
                message,
            },
        }
    }
}

/// Handler for GET `/availability` endpoint.
async fn handle_query_availability(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, HttpError> {
    info!(
        start_date = ?query.start_date,
        end_date = ?query.end_date,
        policy_id = ?query.policy_id,
        "Handling availability request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: AvailabilityResponse =
        query_availability(&mut persistence, &app_state.booking_context(), &query)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/reservations` endpoint.
///
/// Books a visit and assigns a technician.
async fn handle_create_reservation(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<CreateReservationResponse>), HttpError> {
    info!(
        customer_id = req.customer_id,
        business_id = req.business_id,
        policy_id = req.policy_id,
        reserved_date = %req.reserved_date,
        service_time = %req.service_time,
        "Handling create_reservation request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateReservationResponse =
        create_reservation(&mut persistence, &app_state.booking_context(), &req)?;
    drop(persistence);

    info!(
        reservation_id = response.reservation.reservation_id,
        technician_id = ?response.reservation.technician_id,
        "Reservation confirmed"
    );

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/reservations/{reservation_id}` endpoint.
async fn handle_get_reservation(
    AxumState(app_state): AxumState<AppState>,
    Path(reservation_id): Path<i64>,
) -> Result<Json<GetReservationResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: GetReservationResponse = get_reservation(&mut persistence, reservation_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/reservations/{reservation_id}/start` endpoint.
async fn handle_start_work(
    AxumState(app_state): AxumState<AppState>,
    Path(reservation_id): Path<i64>,
    Json(req): Json<TechnicianActionRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    info!(
        reservation_id,
        technician_id = req.technician_id,
        "Handling start_work request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: TransitionResponse = start_work(
        &mut persistence,
        &app_state.booking_context(),
        reservation_id,
        req,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/reservations/{reservation_id}/complete` endpoint.
async fn handle_complete_work(
    AxumState(app_state): AxumState<AppState>,
    Path(reservation_id): Path<i64>,
    Json(req): Json<TechnicianActionRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    info!(
        reservation_id,
        technician_id = req.technician_id,
        "Handling complete_work request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: TransitionResponse = complete_work(
        &mut persistence,
        &app_state.booking_context(),
        reservation_id,
        req,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/reservations/{reservation_id}/cancel` endpoint.
async fn handle_cancel_work(
    AxumState(app_state): AxumState<AppState>,
    Path(reservation_id): Path<i64>,
    Json(req): Json<CancelReservationRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    info!(
        reservation_id,
        actor_type = %req.actor_type,
        actor_id = req.actor_id,
        "Handling cancel_work request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: TransitionResponse = cancel_work(
        &mut persistence,
        &app_state.booking_context(),
        reservation_id,
        req,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/technicians/{technician_id}/reservations?date=` endpoint.
async fn handle_list_technician_reservations(
    AxumState(app_state): AxumState<AppState>,
    Path(technician_id): Path<i64>,
    Query(query): Query<TechnicianDayQuery>,
) -> Result<Json<ListTechnicianReservationsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListTechnicianReservationsResponse =
        list_technician_reservations(&mut persistence, technician_id, &query.date)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/availability", get(handle_query_availability))
        .route("/reservations", post(handle_create_reservation))
        .route("/reservations/{reservation_id}", get(handle_get_reservation))
        .route("/reservations/{reservation_id}/start", post(handle_start_work))
        .route(
            "/reservations/{reservation_id}/complete",
            post(handle_complete_work),
        )
        .route("/reservations/{reservation_id}/cancel", post(handle_cancel_work))
        .route(
            "/technicians/{technician_id}/reservations",
            get(handle_list_technician_reservations),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Visit Booking Server");

    let clock: SystemClock = SystemClock::from_timezone_name(&args.timezone)?;
    let policy: BookingPolicy = BookingPolicy::new(
        args.buffer_minutes,
        args.minimum_notice_minutes,
        args.cancellation_window_minutes,
    );
    info!(
        timezone = %clock.timezone(),
        buffer_minutes = policy.buffer_minutes(),
        minimum_notice_minutes = policy.minimum_notice_minutes(),
        cancellation_window_minutes = policy.cancellation_window_minutes(),
        "Booking policy configured"
    );

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        policy,
        clock: Arc::new(clock),
        selector: Arc::new(RandomSelector),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
