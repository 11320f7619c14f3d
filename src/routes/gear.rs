// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CRUD routes for gear records.

use crate::error::{AppError, Result};
use crate::models::{Gear, GearType, WorkoutType};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Gear routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/gear", get(list_gear).post(create_gear))
        .route("/api/gear/primary", get(get_primary_gear))
        .route("/api/gear/{id}", put(update_gear).delete(delete_gear))
}

/// Create/update payload for a gear record.
#[derive(Debug, Deserialize, Validate)]
pub struct GearPayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub gear_type: GearType,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub current_distance_km: f64,
    pub max_distance_km: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub workout_types: Vec<WorkoutType>,
}

fn default_true() -> bool {
    true
}

impl GearPayload {
    /// Field validation plus the cross-field invariants the derive can't
    /// express.
    fn validate_request(&self) -> Result<()> {
        self.validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        if self.max_distance_km <= 0.0 {
            return Err(AppError::BadRequest(
                "max_distance_km must be positive".to_string(),
            ));
        }
        if let Some(end_date) = self.end_date {
            if end_date < self.start_date {
                return Err(AppError::BadRequest(
                    "end_date must not be before start_date".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// List all gear (soft-deleted records excluded).
async fn list_gear(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Gear>>> {
    Ok(Json(state.gear.fetch_all().await?))
}

/// Get the primary gear record.
async fn get_primary_gear(State(state): State<Arc<AppState>>) -> Result<Json<Gear>> {
    let gear = state
        .gear
        .fetch_primary()
        .await?
        .ok_or_else(|| AppError::NotFound("No primary gear configured".to_string()))?;
    Ok(Json(gear))
}

/// Create a new gear record.
async fn create_gear(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GearPayload>,
) -> Result<Json<Gear>> {
    payload.validate_request()?;

    let gear = Gear::new(
        payload.name,
        payload.gear_type,
        payload.current_distance_km,
        payload.max_distance_km,
        payload.notes,
        payload.is_primary,
        payload.is_active,
        payload.start_date,
        payload.end_date,
        payload.workout_types,
    );

    state.gear.create(&gear).await?;
    tracing::info!(gear_id = %gear.id, name = %gear.name, "Gear created");

    Ok(Json(gear))
}

/// Update an existing gear record.
async fn update_gear(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GearPayload>,
) -> Result<Json<Gear>> {
    payload.validate_request()?;

    let mut gear = state
        .gear
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Gear {} not found", id)))?;

    gear.name = payload.name;
    gear.gear_type = payload.gear_type;
    gear.current_distance_km = payload.current_distance_km;
    gear.max_distance_km = payload.max_distance_km;
    gear.notes = payload.notes;
    gear.is_primary = payload.is_primary;
    gear.is_active = payload.is_active;
    gear.start_date = payload.start_date;
    gear.end_date = payload.end_date;
    gear.workout_types = payload.workout_types;

    state.gear.update(&gear).await?;

    // Re-read so the response carries the bumped audit fields
    let updated = state
        .gear
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Gear {} not found", id)))?;

    Ok(Json(updated))
}

/// Response for gear deletion.
#[derive(Serialize)]
pub struct DeleteGearResponse {
    pub success: bool,
}

/// Soft-delete a gear record.
async fn delete_gear(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteGearResponse>> {
    let gear = state
        .gear
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Gear {} not found", id)))?;

    state.gear.delete(&gear).await?;
    tracing::info!(gear_id = %gear.id, name = %gear.name, "Gear deleted");

    Ok(Json(DeleteGearResponse { success: true }))
}
