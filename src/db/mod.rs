// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence layer: store contracts plus the Firestore and in-memory
//! implementations.
//!
//! Every store call either durably succeeds or fails leaving prior state
//! unchanged. Deletes are soft (records are marked, not removed) and
//! updates bump the audit version and timestamp.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Gear, Workout};

/// Collection names as constants.
pub mod collections {
    pub const GEAR: &str = "gear";
    pub const WORKOUTS: &str = "workouts";
    pub const SETTINGS: &str = "settings";
}

/// Well-known settings keys.
pub mod settings_keys {
    /// RFC3339 timestamp of the last successful workout sync
    pub const LAST_WORKOUT_SYNC_AT: &str = "last_workout_sync_at";
    /// "true" / "false": react to gateway change notifications
    pub const BACKGROUND_SYNC_ENABLED: &str = "background_sync_enabled";
    /// "km" / "mi": display unit preference
    pub const DISTANCE_UNIT: &str = "distance_unit";
}

/// Store operations over gear records.
#[async_trait]
pub trait GearStore: Send + Sync {
    /// Fetch a single gear record by ID (soft-deleted records excluded).
    async fn get(&self, id: Uuid) -> Result<Option<Gear>>;

    /// Fetch all gear records, excluding soft-deleted ones.
    async fn fetch_all(&self) -> Result<Vec<Gear>>;

    /// Fetch gear that is active and not soft-deleted. Order is unspecified.
    async fn fetch_active(&self) -> Result<Vec<Gear>>;

    /// Fetch the primary gear record, if one exists.
    async fn fetch_primary(&self) -> Result<Option<Gear>>;

    async fn create(&self, gear: &Gear) -> Result<()>;

    /// Persist a mutated record, bumping its audit fields.
    async fn update(&self, gear: &Gear) -> Result<()>;

    /// Persist several mutated records in a single atomic write.
    async fn update_bulk(&self, gear: &[Gear]) -> Result<()>;

    /// Soft-delete a record.
    async fn delete(&self, gear: &Gear) -> Result<()>;
}

/// Store operations over workout records.
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Fetch every stored workout, INCLUDING soft-deleted ones.
    ///
    /// Deduplication must see deleted records, otherwise a cleared workout
    /// would be re-imported (and re-counted) on the next sync.
    async fn fetch_all(&self) -> Result<Vec<Workout>>;

    /// Fetch non-deleted workouts, newest first.
    async fn fetch_recent(&self, limit: u32, offset: u32) -> Result<Vec<Workout>>;

    async fn create(&self, workout: &Workout) -> Result<()>;

    /// Persist a batch of new workouts in a single atomic write.
    async fn create_bulk(&self, workouts: &[Workout]) -> Result<()>;

    async fn update(&self, workout: &Workout) -> Result<()>;

    /// Soft-delete a record.
    async fn delete(&self, workout: &Workout) -> Result<()>;

    /// Soft-delete a batch of records in a single atomic write.
    async fn delete_bulk(&self, workouts: &[Workout]) -> Result<()>;
}

/// Durable key-value storage for settings and sync bookkeeping.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
