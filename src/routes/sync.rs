// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Routes for triggering and inspecting workout sync.

use crate::error::Result;
use crate::services::WorkoutSource;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

/// Sync routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/sync", post(import_workouts))
        .route("/api/sync/status", get(sync_status))
        .route("/api/source/access", post(request_source_access))
}

/// Response for a manual import.
#[derive(Serialize)]
pub struct ImportResponse {
    pub imported: usize,
    pub last_sync: Option<String>,
}

/// Manually import workouts from the health gateway.
async fn import_workouts(State(state): State<Arc<AppState>>) -> Result<Json<ImportResponse>> {
    let imported = state.sync.sync_workouts().await?;

    Ok(Json(ImportResponse {
        imported,
        last_sync: state.sync.last_sync_time().map(format_utc_rfc3339),
    }))
}

/// Current sync state.
#[derive(Serialize)]
pub struct SyncStatusResponse {
    pub syncing: bool,
    pub last_sync: Option<String>,
}

/// Report whether a sync is running and when the last one finished.
async fn sync_status(State(state): State<Arc<AppState>>) -> Json<SyncStatusResponse> {
    Json(SyncStatusResponse {
        syncing: state.sync.is_syncing(),
        last_sync: state.sync.last_sync_time().map(format_utc_rfc3339),
    })
}

/// Response for an access request.
#[derive(Serialize)]
pub struct AccessResponse {
    pub requested: bool,
}

/// Ask the gateway to run its user-facing permission flow.
///
/// Success only means the request was submitted; a privacy-preserving
/// gateway never reveals whether access was actually granted.
async fn request_source_access(State(state): State<Arc<AppState>>) -> Result<Json<AccessResponse>> {
    state.gateway.request_access().await?;
    Ok(Json(AccessResponse { requested: true }))
}
