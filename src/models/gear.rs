// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Gear model: a tracked piece of fitness equipment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::WorkoutType;

/// Category of gear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GearType {
    Shoes,
    Bicycle,
}

/// A piece of fitness gear whose mileage is tracked.
///
/// Distance is accumulated in kilometers, either by explicit user edits or
/// by the workout sync assignment pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gear {
    /// Stable unique ID (also used as document ID)
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Category of gear
    pub gear_type: GearType,
    /// Accumulated distance in kilometers
    pub current_distance_km: f64,
    /// Replacement threshold in kilometers
    pub max_distance_km: f64,
    /// Optional free-text note
    pub notes: Option<String>,
    /// Whether this is the user's primary gear (at most one in the collection)
    pub is_primary: bool,
    /// Whether the gear is currently in use
    pub is_active: bool,
    /// Workout types this gear accepts; empty means it accepts nothing
    pub workout_types: Vec<WorkoutType>,
    /// Start of the usage window
    pub start_date: DateTime<Utc>,
    /// End of the usage window (retirement), if any
    pub end_date: Option<DateTime<Utc>>,

    // ─── Audit fields ────────────────────────────────────────────
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: u32,
    pub is_deleted: bool,
}

impl Gear {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        gear_type: GearType,
        current_distance_km: f64,
        max_distance_km: f64,
        notes: Option<String>,
        is_primary: bool,
        is_active: bool,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
        workout_types: Vec<WorkoutType>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            gear_type,
            current_distance_km,
            max_distance_km,
            notes,
            is_primary,
            is_active,
            workout_types,
            start_date,
            end_date,
            created_at: now,
            updated_at: now,
            version: 1,
            is_deleted: false,
        }
    }

    /// Bump the audit fields after a mutation.
    pub fn mark_updated(&mut self) {
        self.version += 1;
        self.updated_at = Utc::now();
    }

    /// Soft-delete: the record stays in the store but is hidden from fetches.
    pub fn mark_deleted(&mut self) {
        self.is_deleted = true;
        self.mark_updated();
    }

    /// Fraction of the replacement threshold used so far, clamped to 1.0.
    pub fn wear_fraction(&self) -> f64 {
        if self.max_distance_km <= 0.0 {
            return 0.0;
        }
        (self.current_distance_km / self.max_distance_km).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_gear() -> Gear {
        Gear::new(
            "Asics Gel Kayano".to_string(),
            GearType::Shoes,
            300.0,
            1000.0,
            Some("Great running shoes".to_string()),
            true,
            true,
            Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap(),
            None,
            vec![WorkoutType::OutdoorRun, WorkoutType::IndoorRun],
        )
    }

    #[test]
    fn test_mark_updated_bumps_version() {
        let mut gear = sample_gear();
        assert_eq!(gear.version, 1);
        gear.mark_updated();
        assert_eq!(gear.version, 2);
        assert!(gear.updated_at >= gear.created_at);
    }

    #[test]
    fn test_mark_deleted_is_soft() {
        let mut gear = sample_gear();
        gear.mark_deleted();
        assert!(gear.is_deleted);
        assert_eq!(gear.version, 2);
    }

    #[test]
    fn test_wear_fraction() {
        let mut gear = sample_gear();
        assert!((gear.wear_fraction() - 0.3).abs() < 1e-9);
        gear.current_distance_km = 1500.0;
        assert_eq!(gear.wear_fraction(), 1.0);
    }
}
