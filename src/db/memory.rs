// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store for local development and tests.
//!
//! Implements the same contracts as the Firestore wrapper: soft deletes,
//! audit bumps on update, and all-or-nothing bulk writes (trivially so,
//! since there is no I/O to fail partway).

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::db::{GearStore, SettingsStore, WorkoutStore};
use crate::error::Result;
use crate::models::{Gear, Workout};

/// DashMap-backed store; cheap to clone via `Arc`.
#[derive(Default)]
pub struct MemoryStore {
    gear: DashMap<Uuid, Gear>,
    workouts: DashMap<Uuid, Workout>,
    settings: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GearStore for MemoryStore {
    async fn get(&self, id: Uuid) -> Result<Option<Gear>> {
        Ok(self
            .gear
            .get(&id)
            .map(|g| g.value().clone())
            .filter(|g| !g.is_deleted))
    }

    async fn fetch_all(&self) -> Result<Vec<Gear>> {
        Ok(self
            .gear
            .iter()
            .filter(|g| !g.is_deleted)
            .map(|g| g.value().clone())
            .collect())
    }

    async fn fetch_active(&self) -> Result<Vec<Gear>> {
        Ok(self
            .gear
            .iter()
            .filter(|g| g.is_active && !g.is_deleted)
            .map(|g| g.value().clone())
            .collect())
    }

    async fn fetch_primary(&self) -> Result<Option<Gear>> {
        Ok(self
            .gear
            .iter()
            .find(|g| g.is_primary && !g.is_deleted)
            .map(|g| g.value().clone()))
    }

    async fn create(&self, gear: &Gear) -> Result<()> {
        self.gear.insert(gear.id, gear.clone());
        Ok(())
    }

    async fn update(&self, gear: &Gear) -> Result<()> {
        let mut gear = gear.clone();
        gear.mark_updated();
        self.gear.insert(gear.id, gear);
        Ok(())
    }

    async fn update_bulk(&self, gear: &[Gear]) -> Result<()> {
        for g in gear {
            let mut g = g.clone();
            g.mark_updated();
            self.gear.insert(g.id, g);
        }
        Ok(())
    }

    async fn delete(&self, gear: &Gear) -> Result<()> {
        let mut gear = gear.clone();
        gear.mark_deleted();
        self.gear.insert(gear.id, gear);
        Ok(())
    }
}

#[async_trait]
impl WorkoutStore for MemoryStore {
    async fn fetch_all(&self) -> Result<Vec<Workout>> {
        // Includes soft-deleted records so dedupe sees their source UUIDs.
        Ok(self.workouts.iter().map(|w| w.value().clone()).collect())
    }

    async fn fetch_recent(&self, limit: u32, offset: u32) -> Result<Vec<Workout>> {
        let mut recent: Vec<Workout> = self
            .workouts
            .iter()
            .filter(|w| !w.is_deleted)
            .map(|w| w.value().clone())
            .collect();
        recent.sort_by(|a, b| b.start_date.cmp(&a.start_date));

        Ok(recent
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn create(&self, workout: &Workout) -> Result<()> {
        self.workouts.insert(workout.id, workout.clone());
        Ok(())
    }

    async fn create_bulk(&self, workouts: &[Workout]) -> Result<()> {
        for w in workouts {
            self.workouts.insert(w.id, w.clone());
        }
        Ok(())
    }

    async fn update(&self, workout: &Workout) -> Result<()> {
        let mut workout = workout.clone();
        workout.mark_updated();
        self.workouts.insert(workout.id, workout);
        Ok(())
    }

    async fn delete(&self, workout: &Workout) -> Result<()> {
        let mut workout = workout.clone();
        workout.mark_deleted();
        self.workouts.insert(workout.id, workout);
        Ok(())
    }

    async fn delete_bulk(&self, workouts: &[Workout]) -> Result<()> {
        for w in workouts {
            let mut w = w.clone();
            w.mark_deleted();
            self.workouts.insert(w.id, w);
        }
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.settings.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.settings.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
