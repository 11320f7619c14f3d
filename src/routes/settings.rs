// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Routes for user settings.
//!
//! Settings live in the durable key-value store. The background-sync flag
//! is read once at startup, so changing it takes effect on the next
//! restart; the distance unit only affects client-side formatting.

use crate::db::settings_keys;
use crate::error::Result;
use crate::units::DistanceUnit;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Settings routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/settings", get(get_settings).put(update_settings))
}

/// Current settings.
#[derive(Serialize)]
pub struct SettingsResponse {
    pub background_sync_enabled: bool,
    pub distance_unit: DistanceUnit,
}

async fn read_settings(state: &AppState) -> Result<SettingsResponse> {
    let background_sync_enabled = state
        .settings
        .get(settings_keys::BACKGROUND_SYNC_ENABLED)
        .await?
        .map(|v| v == "true")
        .unwrap_or(true);

    let distance_unit = state
        .settings
        .get(settings_keys::DISTANCE_UNIT)
        .await?
        .map(|v| DistanceUnit::from_setting(&v))
        .unwrap_or(DistanceUnit::Km);

    Ok(SettingsResponse {
        background_sync_enabled,
        distance_unit,
    })
}

/// Get current settings.
async fn get_settings(State(state): State<Arc<AppState>>) -> Result<Json<SettingsResponse>> {
    Ok(Json(read_settings(&state).await?))
}

/// Settings update payload; absent fields are left unchanged.
#[derive(Deserialize)]
pub struct SettingsPayload {
    pub background_sync_enabled: Option<bool>,
    pub distance_unit: Option<DistanceUnit>,
}

/// Update settings.
async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SettingsPayload>,
) -> Result<Json<SettingsResponse>> {
    if let Some(enabled) = payload.background_sync_enabled {
        state
            .settings
            .set(
                settings_keys::BACKGROUND_SYNC_ENABLED,
                if enabled { "true" } else { "false" },
            )
            .await?;
        tracing::info!(enabled, "Background sync setting updated");
    }

    if let Some(unit) = payload.distance_unit {
        state
            .settings
            .set(settings_keys::DISTANCE_UNIT, unit.as_setting())
            .await?;
    }

    Ok(Json(read_settings(&state).await?))
}
