// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Routes for imported workouts.

use crate::error::Result;
use crate::models::{Workout, WorkoutType};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

const DEFAULT_PAGE_SIZE: u32 = 50;
const MAX_PAGE_SIZE: u32 = 100;

/// Workout routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/workouts", get(list_workouts).delete(clear_workouts))
}

/// Pagination query parameters.
#[derive(Deserialize)]
struct ListParams {
    limit: Option<u32>,
    offset: Option<u32>,
}

/// Workout as returned by the API.
#[derive(Serialize)]
pub struct WorkoutResponse {
    pub id: Uuid,
    pub source_uuid: Uuid,
    pub workout_type: WorkoutType,
    pub distance_km: f64,
    pub start_date: String,
    pub end_date: String,
    pub gear_ids: Vec<Uuid>,
}

impl From<Workout> for WorkoutResponse {
    fn from(workout: Workout) -> Self {
        Self {
            id: workout.id,
            source_uuid: workout.source_uuid,
            workout_type: workout.workout_type(),
            distance_km: workout.distance_km,
            start_date: format_utc_rfc3339(workout.start_date),
            end_date: format_utc_rfc3339(workout.end_date),
            gear_ids: workout.gear_ids,
        }
    }
}

/// List imported workouts, newest first.
async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<WorkoutResponse>>> {
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0);

    let workouts = state.workouts.fetch_recent(limit, offset).await?;
    Ok(Json(workouts.into_iter().map(WorkoutResponse::from).collect()))
}

/// Response for clearing workouts.
#[derive(Serialize)]
pub struct ClearWorkoutsResponse {
    pub deleted: usize,
}

/// Soft-delete all imported workouts.
///
/// Their source UUIDs stay in the store, so a later sync will not
/// re-import (and re-count) the same records.
async fn clear_workouts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClearWorkoutsResponse>> {
    let all = state.workouts.fetch_all().await?;
    let live: Vec<_> = all.into_iter().filter(|w| !w.is_deleted).collect();

    if !live.is_empty() {
        state.workouts.delete_bulk(&live).await?;
    }

    tracing::info!(deleted = live.len(), "Imported workouts cleared");
    Ok(Json(ClearWorkoutsResponse {
        deleted: live.len(),
    }))
}
