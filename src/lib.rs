// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Gear-Tracker: track mileage on fitness equipment
//!
//! This crate provides the backend API for importing workouts from a
//! health-data gateway and assigning them to the gear they were done on.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;
pub mod units;

use std::sync::Arc;

use config::Config;
use db::{GearStore, SettingsStore, WorkoutStore};
use services::{HealthGatewayClient, WorkoutSyncService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub gear: Arc<dyn GearStore>,
    pub workouts: Arc<dyn WorkoutStore>,
    pub settings: Arc<dyn SettingsStore>,
    pub gateway: Arc<HealthGatewayClient>,
    pub sync: Arc<WorkoutSyncService>,
}
