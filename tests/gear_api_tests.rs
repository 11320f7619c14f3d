// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gear CRUD API tests.

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{create_test_app, send_json};

fn shoe_payload() -> serde_json::Value {
    json!({
        "name": "Asics Gel Kayano",
        "gear_type": "shoes",
        "max_distance_km": 800.0,
        "start_date": "2026-01-01T00:00:00Z",
        "workout_types": ["outdoor_run", "indoor_run"]
    })
}

#[tokio::test]
async fn test_health_check() {
    let (app, _state) = create_test_app().await;

    let (status, body) = send_json(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_and_list_gear() {
    let (app, _state) = create_test_app().await;

    let (status, body) = send_json(&app, "POST", "/api/gear", Some(shoe_payload())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Asics Gel Kayano");
    assert_eq!(body["gear_type"], "shoes");
    assert_eq!(body["current_distance_km"], 0.0);
    assert_eq!(body["is_active"], true);
    assert_eq!(body["version"], 1);

    let (status, body) = send_json(&app, "GET", "/api/gear", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_gear_rejects_empty_name() {
    let (app, _state) = create_test_app().await;

    let mut payload = shoe_payload();
    payload["name"] = json!("");

    let (status, body) = send_json(&app, "POST", "/api/gear", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_create_gear_rejects_non_positive_max_distance() {
    let (app, _state) = create_test_app().await;

    let mut payload = shoe_payload();
    payload["max_distance_km"] = json!(0.0);

    let (status, _body) = send_json(&app, "POST", "/api/gear", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_gear_rejects_end_before_start() {
    let (app, _state) = create_test_app().await;

    let mut payload = shoe_payload();
    payload["end_date"] = json!("2025-12-01T00:00:00Z");

    let (status, body) = send_json(&app, "POST", "/api/gear", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("end_date"));
}

#[tokio::test]
async fn test_create_gear_rejects_negative_current_distance() {
    let (app, _state) = create_test_app().await;

    let mut payload = shoe_payload();
    payload["current_distance_km"] = json!(-5.0);

    let (status, _body) = send_json(&app, "POST", "/api/gear", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_gear_bumps_version() {
    let (app, _state) = create_test_app().await;

    let (_, created) = send_json(&app, "POST", "/api/gear", Some(shoe_payload())).await;
    let id = created["id"].as_str().unwrap().to_string();

    let mut payload = shoe_payload();
    payload["name"] = json!("Asics Gel Kayano 31");
    payload["current_distance_km"] = json!(120.5);

    let (status, updated) =
        send_json(&app, "PUT", &format!("/api/gear/{}", id), Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Asics Gel Kayano 31");
    assert_eq!(updated["current_distance_km"], 120.5);
    assert!(updated["version"].as_u64().unwrap() > 1);
}

#[tokio::test]
async fn test_update_unknown_gear_returns_404() {
    let (app, _state) = create_test_app().await;

    let (status, body) = send_json(
        &app,
        "PUT",
        "/api/gear/00000000-0000-0000-0000-000000000000",
        Some(shoe_payload()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_delete_gear_hides_it_from_list() {
    let (app, _state) = create_test_app().await;

    let (_, created) = send_json(&app, "POST", "/api/gear", Some(shoe_payload())).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = send_json(&app, "DELETE", &format!("/api/gear/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, list) = send_json(&app, "GET", "/api/gear", None).await;
    assert!(list.as_array().unwrap().is_empty());

    // Deleting again: the record is gone as far as the API is concerned
    let (status, _) = send_json(&app, "DELETE", &format!("/api/gear/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_primary_gear_lookup() {
    let (app, _state) = create_test_app().await;

    let (status, _) = send_json(&app, "GET", "/api/gear/primary", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let mut payload = shoe_payload();
    payload["is_primary"] = json!(true);
    send_json(&app, "POST", "/api/gear", Some(payload)).await;

    let (status, body) = send_json(&app, "GET", "/api/gear/primary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_primary"], true);
    assert_eq!(body["name"], "Asics Gel Kayano");
}
