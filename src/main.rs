// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gear-Tracker API Server
//!
//! Tracks mileage on fitness equipment by importing workouts from a
//! health-data gateway and assigning them to the gear they were done on.

use gear_tracker::{
    config::Config,
    db::{settings_keys, FirestoreDb, GearStore, SettingsStore, WorkoutStore},
    services::{HealthGatewayClient, WorkoutSyncService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Gear-Tracker API");

    // Initialize Firestore database
    let db = Arc::new(
        FirestoreDb::new(&config.gcp_project_id)
            .await
            .expect("Failed to connect to Firestore"),
    );
    let gear: Arc<dyn GearStore> = db.clone();
    let workouts: Arc<dyn WorkoutStore> = db.clone();
    let settings: Arc<dyn SettingsStore> = db.clone();

    // Initialize the health-gateway client
    let gateway = Arc::new(HealthGatewayClient::new(
        config.gateway_url.clone(),
        config.gateway_token.clone(),
    ));
    tracing::info!(url = %config.gateway_url, "Health gateway client initialized");

    // Initialize the sync service (loads the last sync time)
    let sync = Arc::new(
        WorkoutSyncService::new(
            gateway.clone(),
            workouts.clone(),
            gear.clone(),
            settings.clone(),
        )
        .await
        .expect("Failed to initialize sync service"),
    );

    // React to gateway change notifications unless disabled in settings
    let background_sync = settings
        .get(settings_keys::BACKGROUND_SYNC_ENABLED)
        .await
        .ok()
        .flatten()
        .map(|v| v == "true")
        .unwrap_or(true);

    let _observer = if background_sync {
        tracing::info!("Background sync enabled, observing gateway notifications");
        Some(sync.clone().start_observing())
    } else {
        tracing::info!("Background sync disabled");
        None
    };

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        gear,
        workouts,
        settings,
        gateway,
        sync,
    });

    // Build router
    let app = gear_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gear_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
