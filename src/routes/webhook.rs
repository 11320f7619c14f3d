// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Webhook routes for health-gateway change events.
//!
//! The gateway verifies the subscription once with a GET handshake, then
//! POSTs an event whenever workout data changes. Events carry no workout
//! payload the engine relies on; they only wake the observation loop,
//! which re-fetches and dedupes.

use crate::AppState;
use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Webhook routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/webhook", get(verify).post(handle_event))
}

/// Webhook verification query params.
#[derive(Deserialize)]
struct VerifyParams {
    mode: String,
    challenge: String,
    verify_token: String,
}

/// Verification response.
#[derive(Serialize, Default)]
struct VerifyResponse {
    challenge: String,
}

/// Verify webhook subscription (GET).
async fn verify(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VerifyParams>,
) -> impl IntoResponse {
    if params.mode == "subscribe" && params.verify_token == state.config.webhook_verify_token {
        tracing::info!("Webhook subscription verified");
        (
            StatusCode::OK,
            Json(VerifyResponse {
                challenge: params.challenge,
            }),
        )
    } else {
        tracing::warn!(
            mode = %params.mode,
            "Webhook verification failed: invalid token"
        );
        (StatusCode::FORBIDDEN, Json(VerifyResponse::default()))
    }
}

/// Gateway webhook event payload.
#[derive(Deserialize, Debug)]
struct WebhookEvent {
    /// "workout.created", "workout.updated", ...
    event_type: String,
}

/// Handle incoming webhook events (POST).
async fn handle_event(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<serde_json::Value>,
) -> StatusCode {
    let event: WebhookEvent = match serde_json::from_value(payload) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!(error = %e, "Failed to parse webhook event");
            return StatusCode::OK; // Still return 200 to avoid gateway retries
        }
    };

    if event.event_type.starts_with("workout.") {
        tracing::info!(event_type = %event.event_type, "Workout change event received");
        state.gateway.notify_changed();
    } else {
        tracing::debug!(
            event_type = %event.event_type,
            "Ignoring unhandled event type"
        );
    }

    // Always return 200 OK quickly so the gateway does not retry
    StatusCode::OK
}
