// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use serde::de::DeserializeOwned;
use time::PrimitiveDateTime;
use time::macros::{datetime, time};
use tower::ServiceExt;
use visit_booking::{FirstEligibleSelector, FixedClock};
use visit_booking_domain::ShiftWindow;

struct Seed {
    customer_id: i64,
    business_id: i64,
    device_id: i64,
    policy_id: i64,
    technician_id: i64,
}

/// Helper to create test app state with in-memory persistence and a frozen clock.
fn create_test_app_state(now: PrimitiveDateTime) -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        policy: BookingPolicy::default(),
        clock: Arc::new(FixedClock::new(now)),
        selector: Arc::new(FirstEligibleSelector),
    }
}

/// Registers one customer, business, device, one-hour policy, and a
/// technician working Mondays 09:00-18:00.
async fn seed(app_state: &AppState) -> Seed {
    let mut persistence = app_state.persistence.lock().await;
    let customer_id: i64 = persistence.register_customer("Jung Ha-eun").unwrap();
    let business_id: i64 = persistence
        .register_business(customer_id, "Seongsu Roastery")
        .unwrap();
    let device_id: i64 = persistence
        .register_device(business_id, "LARGE", "Ice maker")
        .unwrap();
    let policy_id: i64 = persistence
        .register_duration_policy("LARGE", "CLEANING", 60)
        .unwrap()
        .policy_id();
    let technician_id: i64 = persistence.register_technician("Yoon", "senior").unwrap();
    persistence
        .add_shift_window(
            technician_id,
            &ShiftWindow::new(1, time!(9:00), time!(18:00)).unwrap(),
        )
        .unwrap();
    Seed {
        customer_id,
        business_id,
        device_id,
        policy_id,
        technician_id,
    }
}

fn booking_body(seed: &Seed, service_time: &str) -> CreateReservationRequest {
    CreateReservationRequest {
        customer_id: seed.customer_id,
        business_id: seed.business_id,
        device_id: seed.device_id,
        policy_id: seed.policy_id,
        reserved_date: String::from("2026-10-19"),
        service_time: service_time.to_string(),
    }
}

async fn post_json<T: Serialize>(app: &Router, uri: &str, body: &T) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get_uri(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

#[tokio::test]
async fn test_monday_booking_then_overlap_conflicts() {
    let app_state: AppState = create_test_app_state(datetime!(2026-10-16 12:00));
    let seed: Seed = seed(&app_state).await;
    let app: Router = build_router(app_state);

    let response = post_json(&app, "/reservations", &booking_body(&seed, "10:00")).await;
    assert_eq!(response.status(), HttpStatusCode::CREATED);
    let created: CreateReservationResponse = read_json(response).await;
    assert_eq!(created.reservation.status, "CONFIRMED");
    assert_eq!(created.reservation.technician_id, Some(seed.technician_id));

    let response = post_json(&app, "/reservations", &booking_body(&seed, "10:30")).await;
    assert_eq!(response.status(), HttpStatusCode::CONFLICT);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "conflict");
    assert_eq!(error.kind, "no_eligible_technician");
    assert!(!error.message.is_empty());
}

#[tokio::test]
async fn test_availability_reports_disabled_slots() {
    let app_state: AppState = create_test_app_state(datetime!(2026-10-16 12:00));
    let seed: Seed = seed(&app_state).await;
    let app: Router = build_router(app_state);
    post_json(&app, "/reservations", &booking_body(&seed, "10:00")).await;

    let response = get_uri(
        &app,
        &format!(
            "/availability?start_date=2026-10-19&end_date=2026-10-19&policy_id={}",
            seed.policy_id
        ),
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::OK);
    let availability: AvailabilityResponse = read_json(response).await;
    let reasons: Vec<(String, String)> = availability
        .disabled_slots
        .into_iter()
        .map(|s| (s.time, s.reason))
        .collect();
    assert_eq!(
        reasons,
        vec![
            (String::from("09:00:00"), String::from("FULLY_BOOKED")),
            (String::from("10:00:00"), String::from("FULLY_BOOKED")),
            (String::from("11:00:00"), String::from("FULLY_BOOKED")),
        ]
    );
}

#[tokio::test]
async fn test_availability_without_policy_is_bad_request() {
    let app: Router = build_router(create_test_app_state(datetime!(2026-10-16 12:00)));

    let response = get_uri(
        &app,
        "/availability?start_date=2026-10-19&end_date=2026-10-19",
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "validation");
    assert_eq!(error.kind, "policy_id");
}

#[tokio::test]
async fn test_unknown_reservation_is_not_found() {
    let app: Router = build_router(create_test_app_state(datetime!(2026-10-16 12:00)));

    let response = get_uri(&app, "/reservations/12345").await;

    assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "not_found");
    assert_eq!(error.kind, "reservation");
}

#[tokio::test]
async fn test_foreign_business_is_forbidden() {
    let app_state: AppState = create_test_app_state(datetime!(2026-10-16 12:00));
    let seed: Seed = seed(&app_state).await;
    let stranger: i64 = app_state
        .persistence
        .lock()
        .await
        .register_customer("Stranger")
        .unwrap();
    let app: Router = build_router(app_state);

    let mut body: CreateReservationRequest = booking_body(&seed, "10:00");
    body.customer_id = stranger;
    let response = post_json(&app, "/reservations", &body).await;

    assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_reservation_lifecycle_over_http() {
    let app_state: AppState = create_test_app_state(datetime!(2026-10-16 12:00));
    let seed: Seed = seed(&app_state).await;
    let app: Router = build_router(app_state);

    let created: CreateReservationResponse =
        read_json(post_json(&app, "/reservations", &booking_body(&seed, "10:00")).await).await;
    let id: i64 = created.reservation.reservation_id;
    let technician: TechnicianActionRequest = TechnicianActionRequest {
        technician_id: seed.technician_id,
    };

    let response = post_json(&app, &format!("/reservations/{id}/start"), &technician).await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let started: TransitionResponse = read_json(response).await;
    assert_eq!(started.reservation.status, "START");

    let response = post_json(&app, &format!("/reservations/{id}/complete"), &technician).await;
    assert_eq!(response.status(), HttpStatusCode::OK);

    let response = post_json(
        &app,
        &format!("/reservations/{id}/cancel"),
        &CancelReservationRequest {
            actor_type: String::from("technician"),
            actor_id: seed.technician_id,
            reason: Some(String::from("too late")),
        },
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::CONFLICT);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.kind, "invalid_status_transition");

    let fetched: GetReservationResponse =
        read_json(get_uri(&app, &format!("/reservations/{id}")).await).await;
    assert_eq!(fetched.reservation.status, "COMPLETED");
}

#[tokio::test]
async fn test_customer_cancel_inside_window_conflicts() {
    // Sunday 11:00, 23 hours before the Monday visit.
    let booking_state: AppState = create_test_app_state(datetime!(2026-10-16 12:00));
    let seed: Seed = seed(&booking_state).await;
    let created: CreateReservationResponse = read_json(
        post_json(
            &build_router(booking_state.clone()),
            "/reservations",
            &booking_body(&seed, "10:00"),
        )
        .await,
    )
    .await;

    let late_state: AppState = AppState {
        clock: Arc::new(FixedClock::new(datetime!(2026-10-18 11:00))),
        ..booking_state
    };
    let response = post_json(
        &build_router(late_state),
        &format!("/reservations/{}/cancel", created.reservation.reservation_id),
        &CancelReservationRequest {
            actor_type: String::from("customer"),
            actor_id: seed.customer_id,
            reason: Some(String::from("closing early")),
        },
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::CONFLICT);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.kind, "too_late_to_cancel");
}

#[tokio::test]
async fn test_cancel_body_without_reason_is_accepted() {
    let app_state: AppState = create_test_app_state(datetime!(2026-10-16 12:00));
    let seed: Seed = seed(&app_state).await;
    let app: Router = build_router(app_state);
    let created: CreateReservationResponse =
        read_json(post_json(&app, "/reservations", &booking_body(&seed, "10:00")).await).await;

    let response = post_json(
        &app,
        &format!("/reservations/{}/cancel", created.reservation.reservation_id),
        &serde_json::json!({
            "actor_type": "customer",
            "actor_id": seed.customer_id,
        }),
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::OK);
    let canceled: TransitionResponse = read_json(response).await;
    assert_eq!(canceled.reservation.status, "CANCELED");
    assert_eq!(canceled.reservation.cancel_reason, None);
}

#[tokio::test]
async fn test_technician_day_listing() {
    let app_state: AppState = create_test_app_state(datetime!(2026-10-16 12:00));
    let seed: Seed = seed(&app_state).await;
    let app: Router = build_router(app_state);
    post_json(&app, "/reservations", &booking_body(&seed, "15:00")).await;
    post_json(&app, "/reservations", &booking_body(&seed, "09:00")).await;

    let response = get_uri(
        &app,
        &format!(
            "/technicians/{}/reservations?date=2026-10-19",
            seed.technician_id
        ),
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::OK);
    let listing: ListTechnicianReservationsResponse = read_json(response).await;
    let starts: Vec<String> = listing
        .reservations
        .into_iter()
        .map(|r| r.service_start)
        .collect();
    assert_eq!(
        starts,
        vec![
            String::from("2026-10-19 09:00:00"),
            String::from("2026-10-19 15:00:00")
        ]
    );
}

#[test]
fn test_internal_errors_hide_storage_detail() {
    let http: HttpError = HttpError::from(ApiError::Internal {
        message: String::from("database is locked"),
    });

    assert_eq!(http.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(http.body.error, "system");
    assert!(!http.body.message.contains("locked"));
}

#[test]
fn test_cli_defaults() {
    let args: Args = Args::parse_from(["visit-booking-server"]);

    assert_eq!(args.port, 3000);
    assert_eq!(args.timezone, "Asia/Seoul");
    assert_eq!(args.buffer_minutes, 60);
    assert_eq!(args.minimum_notice_minutes, 180);
    assert_eq!(args.cancellation_window_minutes, 1440);
    assert!(args.database.is_none());
}
