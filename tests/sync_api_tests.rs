// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end sync tests: gateway source -> sync engine -> stores -> API.

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{create_test_app_with_source, send_json, workout_on, ScriptedSource};

fn running_shoes() -> serde_json::Value {
    json!({
        "name": "Daily trainers",
        "gear_type": "shoes",
        "max_distance_km": 800.0,
        "start_date": "2026-01-01T00:00:00Z",
        "workout_types": ["outdoor_run"]
    })
}

#[tokio::test]
async fn test_manual_import_assigns_gear_and_reports_count() {
    let source = ScriptedSource::new(vec![workout_on(5, 10.0, "running")]);
    let (app, _state) = create_test_app_with_source(source).await;

    send_json(&app, "POST", "/api/gear", Some(running_shoes())).await;

    let (status, body) = send_json(&app, "POST", "/api/sync", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imported"], 1);
    assert!(body["last_sync"].is_string());

    // Distance landed on the gear
    let (_, gear) = send_json(&app, "GET", "/api/gear", None).await;
    assert_eq!(gear[0]["current_distance_km"], 10.0);

    // The workout shows its category and assignment
    let (_, workouts) = send_json(&app, "GET", "/api/workouts", None).await;
    let workouts = workouts.as_array().unwrap();
    assert_eq!(workouts.len(), 1);
    assert_eq!(workouts[0]["workout_type"], "outdoor_run");
    assert_eq!(workouts[0]["gear_ids"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_second_import_is_idempotent() {
    let source = ScriptedSource::new(vec![workout_on(5, 10.0, "running")]);
    let (app, _state) = create_test_app_with_source(source).await;

    send_json(&app, "POST", "/api/gear", Some(running_shoes())).await;

    let (_, first) = send_json(&app, "POST", "/api/sync", None).await;
    assert_eq!(first["imported"], 1);

    let (_, second) = send_json(&app, "POST", "/api/sync", None).await;
    assert_eq!(second["imported"], 0);

    let (_, gear) = send_json(&app, "GET", "/api/gear", None).await;
    assert_eq!(gear[0]["current_distance_km"], 10.0);
}

#[tokio::test]
async fn test_new_workouts_picked_up_on_next_import() {
    let source = ScriptedSource::new(vec![workout_on(5, 10.0, "running")]);
    let (app, _state) = create_test_app_with_source(source.clone()).await;

    let (_, first) = send_json(&app, "POST", "/api/sync", None).await;
    assert_eq!(first["imported"], 1);

    source.push(workout_on(6, 7.5, "cycling"));

    let (_, second) = send_json(&app, "POST", "/api/sync", None).await;
    assert_eq!(second["imported"], 1);

    let (_, workouts) = send_json(&app, "GET", "/api/workouts", None).await;
    assert_eq!(workouts.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_sync_status_reflects_last_sync() {
    let (app, _state) = create_test_app_with_source(ScriptedSource::new(vec![])).await;

    let (status, body) = send_json(&app, "GET", "/api/sync/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["syncing"], false);
    assert!(body["last_sync"].is_null());

    // An import with nothing new still advances the timestamp
    let (_, imported) = send_json(&app, "POST", "/api/sync", None).await;
    assert_eq!(imported["imported"], 0);

    let (_, body) = send_json(&app, "GET", "/api/sync/status", None).await;
    assert_eq!(body["syncing"], false);
    assert!(body["last_sync"].is_string());
}
