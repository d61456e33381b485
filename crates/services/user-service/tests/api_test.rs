//! Integration tests for the HTTP API.
//!
//! These tests drive the full router against the in-memory repository, so
//! they need no database.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Datelike, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use domain::{calculate_age, parse_date};
use user_service_lib::build_app;
use user_service_lib::repository::InMemoryUserStore;

// =============================================================================
// Test Helpers
// =============================================================================

fn app() -> Router {
    build_app(Arc::new(InMemoryUserStore::new()), None)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn create(app: &Router, name: &str, dob: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/v1/users",
        Some(json!({ "name": name, "dob": dob })),
    )
    .await
}

fn error_message(body: &Value) -> &str {
    body["error"]["message"].as_str().unwrap_or_default()
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_user_returns_record_with_age() {
    let app = app();
    let (status, body) = create(&app, "John Doe", "1990-01-15").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "John Doe");
    assert_eq!(body["dob"], "1990-01-15");

    let expected = calculate_age(parse_date("1990-01-15").unwrap(), Utc::now().date_naive());
    assert_eq!(body["age"], expected);
}

#[tokio::test]
async fn test_create_user_empty_name() {
    let app = app();
    let (status, body) = create(&app, "", "1990-01-15").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(error_message(&body).contains("name is required"));
}

#[tokio::test]
async fn test_create_user_bad_date_format() {
    let app = app();
    let (status, body) = create(&app, "Jane Doe", "01-15-1990").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&body),
        "dateOfBirth must be in YYYY-MM-DD format; dateOfBirth cannot be in the future"
    );
}

#[tokio::test]
async fn test_create_user_future_date() {
    let app = app();
    let (status, body) = create(&app, "X", "2099-01-15").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "dateOfBirth cannot be in the future");
}

#[tokio::test]
async fn test_create_user_today_is_rejected() {
    let app = app();
    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let (status, body) = create(&app, "Newborn", &today).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("cannot be in the future"));
}

#[tokio::test]
async fn test_create_user_name_too_long() {
    let app = app();
    let (status, body) = create(&app, &"a".repeat(256), "1990-01-15").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "name must be at most 255 characters");
}

#[tokio::test]
async fn test_create_user_missing_fields() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/v1/users", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).starts_with("name is required"));
    assert!(error_message(&body).contains("dateOfBirth is required"));
}

#[tokio::test]
async fn test_create_user_malformed_body() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_rejected_create_does_not_write() {
    let app = app();
    create(&app, "", "1990-01-15").await;

    let (_, body) = send(&app, Method::GET, "/api/v1/users", None).await;
    assert_eq!(body, json!([]));
}

// =============================================================================
// Read
// =============================================================================

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = app();
    let (_, created) = create(&app, "Ann Lee", "2001-11-30").await;
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, Method::GET, &format!("/api/v1/users/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Ann Lee");
    assert_eq!(fetched["dob"], "2001-11-30");
}

#[tokio::test]
async fn test_get_user_not_found() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/v1/users/42", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(error_message(&body), "user not found");
}

#[tokio::test]
async fn test_get_user_invalid_id() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/v1/users/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "invalid user id");
}

#[tokio::test]
async fn test_list_users_is_stable_without_writes() {
    let app = app();
    create(&app, "A", "1980-02-02").await;
    create(&app, "B", "1985-03-03").await;

    let (status, first) = send(&app, Method::GET, "/api/v1/users", None).await;
    let (_, second) = send(&app, Method::GET, "/api/v1/users", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first.as_array().unwrap().len(), 2);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_list_users_empty_is_array() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/v1/users", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_user() {
    let app = app();
    let (_, created) = create(&app, "Old Name", "1990-01-15").await;
    let id = created["id"].as_i64().unwrap();

    let last_year = Utc::now().date_naive().year() - 1;
    let new_dob = format!("{}-01-01", last_year);
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/users/{}", id),
        Some(json!({ "name": "New Name", "dob": new_dob })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["name"], "New Name");
    assert_eq!(body["dob"], new_dob);
    assert_eq!(body["age"], 1);
}

#[tokio::test]
async fn test_update_missing_user() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/users/999",
        Some(json!({ "name": "Nobody", "dob": "1990-01-15" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_user_invalid_payload() {
    let app = app();
    let (_, created) = create(&app, "Keep Me", "1990-01-15").await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/users/{}", id),
        Some(json!({ "name": "", "dob": "2099-12-31" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, fetched) = send(&app, Method::GET, &format!("/api/v1/users/{}", id), None).await;
    assert_eq!(fetched["name"], "Keep Me");
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_then_get_and_delete_again() {
    let app = app();
    let (_, created) = create(&app, "Short Lived", "1990-01-15").await;
    let uri = format!("/api/v1/users/{}", created["id"]);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Infrastructure endpoints
// =============================================================================

#[tokio::test]
async fn test_health_without_database() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "in-memory");
}

#[tokio::test]
async fn test_openapi_document_lists_user_paths() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/users"].is_object());
    assert!(body["paths"]["/api/v1/users/{id}"].is_object());
}

#[tokio::test]
async fn test_openapi_document_carries_request_examples() {
    let app = app();
    let (_, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    let create = &body["components"]["schemas"]["CreateUserRequest"]["properties"];
    assert_eq!(create["name"]["example"], "John Doe");
    assert_eq!(create["dob"]["example"], "1990-01-15");
}
