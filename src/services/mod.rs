// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod gateway;
pub mod source;
pub mod sync;

pub use gateway::HealthGatewayClient;
pub use source::WorkoutSource;
pub use sync::WorkoutSyncService;
