//! Probe and documentation route tests.

mod helpers;

use axum::http::StatusCode;
use helpers::setup_test_app;
use serde_json::Value;

#[tokio::test]
async fn test_health_is_alive() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_ready_reports_database() {
    let app = setup_test_app().await;

    let response = app.client().get("/ready").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["database"], "ready");
}

#[tokio::test]
async fn test_ready_is_unavailable_when_store_fails() {
    let app = setup_test_app().await;
    app.repository.fail_all();

    let response = app.client().get("/ready").expect_failure().await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["status"], "not_ready");
    assert_eq!(body["database"], "not_ready");
}

#[tokio::test]
async fn test_openapi_paths_carry_route_prefix() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let paths = body["paths"].as_object().unwrap();
    assert!(paths.contains_key("/v4/oe/file/{guid}"));
    assert!(paths.contains_key("/v4/oe/objectlist/{company}/{objectType}/{objectId}"));
}
