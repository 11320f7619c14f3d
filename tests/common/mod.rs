// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tower::ServiceExt; // for oneshot

use gear_tracker::config::Config;
use gear_tracker::db::MemoryStore;
use gear_tracker::error::Result;
use gear_tracker::models::Workout;
use gear_tracker::routes::create_router;
use gear_tracker::services::{HealthGatewayClient, WorkoutSource, WorkoutSyncService};
use gear_tracker::AppState;

/// Workout source test double serving a scripted list.
pub struct ScriptedSource {
    workouts: Mutex<Vec<Workout>>,
    updates: broadcast::Sender<()>,
}

impl ScriptedSource {
    #[allow(dead_code)]
    pub fn new(workouts: Vec<Workout>) -> Arc<Self> {
        let (updates, _) = broadcast::channel(16);
        Arc::new(Self {
            workouts: Mutex::new(workouts),
            updates,
        })
    }

    #[allow(dead_code)]
    pub fn push(&self, workout: Workout) {
        self.workouts.lock().unwrap().push(workout);
    }
}

#[async_trait]
impl WorkoutSource for ScriptedSource {
    async fn request_access(&self) -> Result<()> {
        Ok(())
    }

    async fn fetch_workouts(&self, _since: Option<DateTime<Utc>>) -> Result<Vec<Workout>> {
        Ok(self.workouts.lock().unwrap().clone())
    }

    fn observe_workouts(&self) -> BoxStream<'static, ()> {
        BroadcastStream::new(self.updates.subscribe())
            .filter_map(|event| futures_util::future::ready(event.ok()))
            .boxed()
    }
}

/// Create a test app whose sync service reads from a scripted source.
/// All stores share one in-memory backend.
#[allow(dead_code)]
pub async fn create_test_app_with_source(
    source: Arc<ScriptedSource>,
) -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let store = Arc::new(MemoryStore::new());

    let gateway = Arc::new(HealthGatewayClient::new(
        config.gateway_url.clone(),
        config.gateway_token.clone(),
    ));

    let sync = Arc::new(
        WorkoutSyncService::new(source, store.clone(), store.clone(), store.clone())
            .await
            .expect("sync service"),
    );

    let state = Arc::new(AppState {
        config,
        gear: store.clone(),
        workouts: store.clone(),
        settings: store,
        gateway,
        sync,
    });

    (create_router(state.clone()), state)
}

/// Create a test app with an empty scripted source.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_source(ScriptedSource::new(Vec::new())).await
}

/// Send a request and return status plus parsed JSON body.
#[allow(dead_code)]
pub async fn send_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

/// A workout starting on the given January 2026 day.
#[allow(dead_code)]
pub fn workout_on(day: u32, distance_km: f64, activity_type: &str) -> Workout {
    let start = Utc.with_ymd_and_hms(2026, 1, day, 8, 0, 0).unwrap();
    Workout::new(
        uuid::Uuid::new_v4(),
        activity_type.to_string(),
        false,
        distance_km,
        start,
        start + chrono::Duration::hours(1),
    )
}
