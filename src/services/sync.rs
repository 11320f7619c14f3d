// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout synchronization service.
//!
//! Handles the core workflow:
//! 1. Fetch workouts from the health gateway
//! 2. Dedupe against already-imported workouts by source UUID
//! 3. Assign new workouts to matching gear and accumulate distance
//! 4. Persist the new workouts and the touched gear
//! 5. Record the sync timestamp

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use futures_util::StreamExt;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::db::{settings_keys, GearStore, SettingsStore, WorkoutStore};
use crate::error::Result;
use crate::models::{Gear, Workout};
use crate::services::WorkoutSource;
use crate::time_utils::{format_utc_rfc3339, parse_utc_rfc3339};

/// Imports workouts from the gateway and assigns them to gear.
pub struct WorkoutSyncService {
    source: Arc<dyn WorkoutSource>,
    workout_store: Arc<dyn WorkoutStore>,
    gear_store: Arc<dyn GearStore>,
    settings: Arc<dyn SettingsStore>,

    /// Sync-in-progress flag; claimed with a compare-and-swap so that
    /// overlapping calls from any task are rejected rather than queued.
    syncing: AtomicBool,
    /// Last successful sync time, mirrored in the settings store.
    last_sync: RwLock<Option<DateTime<Utc>>>,
}

/// Releases the sync flag on every exit path, including errors.
struct SyncGuard<'a>(&'a AtomicBool);

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl WorkoutSyncService {
    /// Create the service, loading the last sync time from the settings
    /// store.
    pub async fn new(
        source: Arc<dyn WorkoutSource>,
        workout_store: Arc<dyn WorkoutStore>,
        gear_store: Arc<dyn GearStore>,
        settings: Arc<dyn SettingsStore>,
    ) -> Result<Self> {
        let last_sync = settings
            .get(settings_keys::LAST_WORKOUT_SYNC_AT)
            .await?
            .and_then(|v| parse_utc_rfc3339(&v));

        Ok(Self {
            source,
            workout_store,
            gear_store,
            settings,
            syncing: AtomicBool::new(false),
            last_sync: RwLock::new(last_sync),
        })
    }

    /// Whether a sync pass is currently running.
    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::SeqCst)
    }

    /// Time of the last successful sync, if any.
    pub fn last_sync_time(&self) -> Option<DateTime<Utc>> {
        *self.last_sync.read().expect("last_sync lock poisoned")
    }

    /// Perform a full sync of workouts from the gateway.
    ///
    /// Fetches workouts, imports the ones not seen before, and assigns
    /// them to matching gear. Returns the number of newly imported
    /// workouts. If a sync is already in progress the call returns 0
    /// immediately without touching the source or the stores.
    pub async fn sync_workouts(&self) -> Result<usize> {
        if self
            .syncing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!("Sync already in progress, skipping");
            return Ok(0);
        }
        let _guard = SyncGuard(&self.syncing);

        tracing::info!("Starting workout sync");

        // Full fetch: dedupe below makes the `since` filter unnecessary and
        // keeps the result independent of a stale sync timestamp.
        let fetched = self.source.fetch_workouts(None).await?;

        let existing = self.workout_store.fetch_all().await?;
        let known_uuids: HashSet<Uuid> = existing.iter().map(|w| w.source_uuid).collect();

        let mut new_workouts: Vec<Workout> = fetched
            .into_iter()
            .filter(|w| !known_uuids.contains(&w.source_uuid))
            .collect();

        if new_workouts.is_empty() {
            tracing::info!("No new workouts to sync");
            self.update_last_sync().await?;
            return Ok(0);
        }

        tracing::info!(count = new_workouts.len(), "Found new workouts");

        let updated_gear = self.assign_workouts_to_gear(&mut new_workouts).await?;

        // Workouts first: if this write fails nothing durable has changed,
        // and the next sync re-imports the same records.
        self.workout_store.create_bulk(&new_workouts).await?;

        if !updated_gear.is_empty() {
            self.gear_store.update_bulk(&updated_gear).await?;
        }

        self.update_last_sync().await?;

        tracing::info!(
            imported = new_workouts.len(),
            gear_updated = updated_gear.len(),
            "Workout sync complete"
        );
        Ok(new_workouts.len())
    }

    /// Assign workouts to matching active gear and accumulate distance.
    ///
    /// Each gear record is evaluated independently: a workout matching two
    /// overlapping active gear records is assigned to both, and its
    /// distance counted on both. Returns the gear records that received at
    /// least one assignment; the caller persists them.
    async fn assign_workouts_to_gear(&self, workouts: &mut [Workout]) -> Result<Vec<Gear>> {
        let active_gear = self.gear_store.fetch_active().await?;

        let mut updated_gear = Vec::new();
        for mut gear in active_gear {
            let mut assigned_any = false;
            for workout in workouts.iter_mut() {
                if !workout_matches_gear(&gear, workout) {
                    continue;
                }

                workout.gear_ids.push(gear.id);
                gear.current_distance_km += workout.distance_km;
                assigned_any = true;

                tracing::debug!(
                    gear = %gear.name,
                    workout = %workout.source_uuid,
                    distance_km = workout.distance_km,
                    "Assigned workout to gear"
                );
            }
            if assigned_any {
                updated_gear.push(gear);
            }
        }

        Ok(updated_gear)
    }

    /// Update the last sync time to now and persist it.
    async fn update_last_sync(&self) -> Result<()> {
        let now = Utc::now();
        self.settings
            .set(settings_keys::LAST_WORKOUT_SYNC_AT, &format_utc_rfc3339(now))
            .await?;
        *self.last_sync.write().expect("last_sync lock poisoned") = Some(now);
        Ok(())
    }

    /// Start reacting to gateway change notifications.
    ///
    /// Each notification triggers a sync; failures are logged and do not
    /// end observation. Abort the returned handle to stop observing; any
    /// in-flight sync is cut at its next await point and the store remains
    /// consistent because every write is atomic at the store boundary.
    pub fn start_observing(self: Arc<Self>) -> JoinHandle<()> {
        let service = self;
        tokio::spawn(async move {
            let mut updates = service.source.observe_workouts();
            while updates.next().await.is_some() {
                tracing::debug!("Workout update notification received");
                match service.sync_workouts().await {
                    Ok(count) => {
                        tracing::info!(imported = count, "Notification-triggered sync complete");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Notification-triggered sync failed");
                    }
                }
            }
            tracing::info!("Workout observation stream closed");
        })
    }
}

/// Whether a workout should be assigned to a piece of gear.
///
/// All of: not already assigned to it, the gear accepts the workout's
/// category (exact match), and the workout lies inside the gear's usage
/// window.
fn workout_matches_gear(gear: &Gear, workout: &Workout) -> bool {
    !workout.gear_ids.contains(&gear.id)
        && gear.workout_types.contains(&workout.workout_type())
        && gear.start_date <= workout.start_date
        && gear.end_date.is_none_or(|end| end >= workout.end_date)
}
