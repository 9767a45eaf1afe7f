//! HTTP contract tests.
//!
//! Drives the router with `tower::ServiceExt::oneshot` against a controller
//! wired to in-memory doubles.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::time::Duration;
use studio_booking_testing::helpers::TestHarness;
use studio_booking_web::{build_router, AppState};
use tower::ServiceExt;

fn app(harness: &TestHarness) -> Router {
    build_router(AppState::new(harness.controller.clone()))
}

async fn send(app: Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(text) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(text.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(&body.to_string())).await
}

fn pilates_body() -> Value {
    json!({
        "name": "Pilates",
        "startDate": "01-12-2024",
        "endDate": "20-12-2024",
        "capacity": 10
    })
}

fn booking_body(member: &str, date: &str) -> Value {
    json!({ "memberName": member, "date": date, "className": "Pilates" })
}

#[tokio::test]
async fn test_register_class_returns_created_envelope() {
    let harness = TestHarness::new();

    let (status, body) = post_json(app(&harness), "/classes", &pilates_body()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "message": "Class created successfully",
            "data": {
                "id": 1,
                "name": "Pilates",
                "startDate": "01-12-2024",
                "endDate": "20-12-2024",
                "capacity": 10
            }
        })
    );
}

#[tokio::test]
async fn test_register_class_accepts_class_name_key() {
    let harness = TestHarness::new();
    let body = json!({
        "className": "Yoga",
        "startDate": "01-12-2024",
        "endDate": "01-12-2024",
        "capacity": 1
    });

    let (status, body) = post_json(app(&harness), "/classes", &body).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Yoga");
}

#[tokio::test]
async fn test_booking_flow_over_http() {
    let harness = TestHarness::new();
    post_json(app(&harness), "/classes", &pilates_body()).await;

    let (status, body) =
        post_json(app(&harness), "/bookings", &booking_body("Rahul R P", "16-12-2024")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "message": "Booking successful",
            "data": {
                "booking": {
                    "id": 1,
                    "memberName": "Rahul R P",
                    "date": "16-12-2024",
                    "className": "Pilates"
                },
                "availableSlots": 9
            }
        })
    );
}

#[tokio::test]
async fn test_client_errors_are_bad_request_with_code() {
    let harness = TestHarness::new();
    post_json(
        app(&harness),
        "/classes",
        &json!({"name": "Spin", "startDate": "01-12-2024", "endDate": "20-12-2024", "capacity": 1}),
    )
    .await;
    post_json(
        app(&harness),
        "/bookings",
        &json!({"memberName": "A", "date": "16-12-2024", "className": "Spin"}),
    )
    .await;

    let cases = [
        (
            "/classes",
            json!({"name": "Pilates", "startDate": "31-12-2024", "endDate": "01-12-2024", "capacity": 10}),
            "INVALID_RANGE",
        ),
        (
            "/classes",
            json!({"name": "Pilates", "startDate": "2024-12-01", "endDate": "20-12-2024", "capacity": 10}),
            "INVALID_DATE_FORMAT",
        ),
        (
            "/classes",
            json!({"startDate": "01-12-2024", "endDate": "20-12-2024", "capacity": 10}),
            "INVALID_FIELDS",
        ),
        ("/bookings", booking_body("Rahul R P", "25-12-2024"), "CLASS_UNAVAILABLE"),
        (
            "/bookings",
            json!({"memberName": "B", "date": "16-12-2024", "className": "Spin"}),
            "CAPACITY_EXCEEDED",
        ),
    ];

    for (uri, body, code) in cases {
        let (status, response) = post_json(app(&harness), uri, &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{code}");
        assert_eq!(response["code"], code);
        assert!(response["message"].is_string());
    }
}

#[tokio::test]
async fn test_date_format_message_names_field() {
    let harness = TestHarness::new();
    post_json(app(&harness), "/classes", &pilates_body()).await;

    let (status, body) =
        post_json(app(&harness), "/bookings", &booking_body("Rahul R P", "12/16/2024")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "code": "INVALID_DATE_FORMAT",
            "message": "Invalid date format, use DD-MM-YYYY"
        })
    );
}

#[tokio::test]
async fn test_malformed_body_is_invalid_request_body() {
    let harness = TestHarness::new();

    for raw in ["{not json", r#"{"name": "Pilates", "capacity": "ten"}"#] {
        let (status, body) = send(app(&harness), Method::POST, "/classes", Some(raw)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"code": "INVALID_REQUEST_BODY", "message": "Invalid request body"})
        );
    }
    assert_eq!(harness.controller.class_count().await, 0);
}

#[tokio::test]
async fn test_persistence_failure_is_internal_error() {
    let harness = TestHarness::new();
    harness.snapshots.fail_saves(true);

    let (status, body) = post_json(app(&harness), "/classes", &pilates_body()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"code": "PERSISTENCE_FAILURE", "message": "Failed to save class data"})
    );
}

#[tokio::test]
async fn test_wrong_method_is_405_with_error_body() {
    let harness = TestHarness::new();
    let expected = json!({"code": "METHOD_NOT_ALLOWED", "message": "Invalid request method"});

    for (method, uri) in [
        (Method::GET, "/classes"),
        (Method::PUT, "/bookings"),
        (Method::DELETE, "/health"),
    ] {
        let (status, body) = send(app(&harness), method, uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{uri}");
        assert_eq!(body, expected);
    }
}

#[tokio::test]
async fn test_booking_completes_after_client_disconnects() {
    let harness = TestHarness::new();
    post_json(app(&harness), "/classes", &pilates_body()).await;
    harness.snapshots.delay_saves(Duration::from_millis(200));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/bookings")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(booking_body("Rahul R P", "16-12-2024").to_string()))
        .unwrap();

    // Dropping the response future stands in for a client hanging up
    let outcome = tokio::time::timeout(Duration::from_millis(20), app(&harness).oneshot(request)).await;
    assert!(outcome.is_err());

    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(harness.snapshots.saved_bookings().len(), 1);
    assert_eq!(
        harness.audit.labels(),
        vec![
            "Class created successfully".to_string(),
            "Booking successful".to_string()
        ]
    );
}

#[tokio::test]
async fn test_registration_completes_after_client_disconnects() {
    let harness = TestHarness::new();
    harness.snapshots.delay_saves(Duration::from_millis(200));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/classes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(pilates_body().to_string()))
        .unwrap();

    let outcome = tokio::time::timeout(Duration::from_millis(20), app(&harness).oneshot(request)).await;
    assert!(outcome.is_err());

    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(harness.snapshots.saved_classes().len(), 1);
    assert_eq!(harness.audit.labels(), vec!["Class created successfully".to_string()]);
}

#[tokio::test]
async fn test_health_reports_collection_sizes() {
    let harness = TestHarness::new();
    post_json(app(&harness), "/classes", &pilates_body()).await;
    post_json(app(&harness), "/bookings", &booking_body("Rahul R P", "16-12-2024")).await;

    let (status, body) = send(app(&harness), Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["classes"], 1);
    assert_eq!(body["bookings"], 1);
    assert!(body["version"].is_string());
}
