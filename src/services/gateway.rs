// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Health-data gateway API client.
//!
//! Handles:
//! - Workout fetching (`GET /v1/workouts`)
//! - Access requests (`POST /v1/access/request`)
//! - Fan-out of webhook change events to observers

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use serde::Deserialize;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::Workout;
use crate::services::WorkoutSource;
use crate::time_utils::format_utc_rfc3339;

/// Capacity of the change-notification channel. Observers that fall this
/// far behind simply miss events; the next one triggers a full re-fetch
/// anyway.
const UPDATE_CHANNEL_CAPACITY: usize = 16;

/// Client for the health-data gateway REST API.
pub struct HealthGatewayClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
    updates: broadcast::Sender<()>,
}

/// Workout record as returned by the gateway.
#[derive(Debug, Deserialize)]
struct GatewayWorkout {
    uuid: Uuid,
    activity_type: String,
    #[serde(default)]
    indoor: bool,
    distance_km: f64,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
}

impl GatewayWorkout {
    fn into_workout(self) -> Workout {
        Workout::new(
            self.uuid,
            self.activity_type,
            self.indoor,
            self.distance_km,
            self.start_date,
            self.end_date,
        )
    }
}

impl HealthGatewayClient {
    pub fn new(base_url: String, api_token: String) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_token,
            updates,
        }
    }

    /// Publish a change event to all observers.
    ///
    /// Called by the webhook route when the gateway reports new or updated
    /// workout data. A send error only means nobody is observing.
    pub fn notify_changed(&self) {
        if self.updates.send(()).is_err() {
            tracing::debug!("Workout change notification dropped (no observers)");
        }
    }

    /// Check response status and return error if not successful.
    async fn check_response(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Source(format!(
            "Gateway returned {}: {}",
            status, body
        )))
    }
}

#[async_trait]
impl WorkoutSource for HealthGatewayClient {
    async fn request_access(&self) -> Result<()> {
        let url = format!("{}/v1/access/request", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| AppError::Source(e.to_string()))?;

        self.check_response(response).await?;
        tracing::info!("Health gateway access request submitted");
        Ok(())
    }

    async fn fetch_workouts(&self, since: Option<DateTime<Utc>>) -> Result<Vec<Workout>> {
        let url = format!("{}/v1/workouts", self.base_url);
        let mut request = self.http.get(&url).bearer_auth(&self.api_token);

        if let Some(since) = since {
            request = request.query(&[("since", format_utc_rfc3339(since))]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Source(e.to_string()))?;

        let records: Vec<GatewayWorkout> = self
            .check_response(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Source(format!("Invalid gateway response: {}", e)))?;

        Ok(records.into_iter().map(GatewayWorkout::into_workout).collect())
    }

    fn observe_workouts(&self) -> BoxStream<'static, ()> {
        // Lagged receivers yield an error item; skip it and keep listening,
        // the next event still triggers a full re-fetch.
        BroadcastStream::new(self.updates.subscribe())
            .filter_map(|event| futures_util::future::ready(event.ok()))
            .boxed()
    }
}
