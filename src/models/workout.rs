// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout model: one completed workout imported from the health gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workout category used for gear matching.
///
/// Derived from the gateway's raw activity type plus the indoor flag; there
/// is no hierarchy or fallback between categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    OutdoorRun,
    IndoorRun,
    OutdoorWalk,
    IndoorWalk,
    OutdoorCycle,
    IndoorCycle,
    Other,
}

impl WorkoutType {
    /// Map a raw gateway activity type code and indoor flag to a category.
    ///
    /// Unrecognized codes map to `Other`.
    pub fn from_raw(activity_type: &str, indoor: bool) -> Self {
        match activity_type.to_ascii_lowercase().as_str() {
            "running" => {
                if indoor {
                    WorkoutType::IndoorRun
                } else {
                    WorkoutType::OutdoorRun
                }
            }
            "walking" => {
                if indoor {
                    WorkoutType::IndoorWalk
                } else {
                    WorkoutType::OutdoorWalk
                }
            }
            "cycling" => {
                if indoor {
                    WorkoutType::IndoorCycle
                } else {
                    WorkoutType::OutdoorCycle
                }
            }
            _ => WorkoutType::Other,
        }
    }
}

/// Stored workout record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Local unique ID (also used as document ID)
    pub id: Uuid,
    /// Gateway UUID for this workout (authoritative deduplication key)
    pub source_uuid: Uuid,
    /// Raw activity type code from the gateway ("running", "cycling", ...)
    pub activity_type: String,
    /// Whether the workout was done indoors
    pub indoor: bool,
    /// Distance covered in kilometers
    pub distance_km: f64,
    /// When the workout started
    pub start_date: DateTime<Utc>,
    /// When the workout ended
    pub end_date: DateTime<Utc>,
    /// IDs of the gear this workout has been assigned to (append-only)
    pub gear_ids: Vec<Uuid>,

    // ─── Audit fields ────────────────────────────────────────────
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: u32,
    pub is_deleted: bool,
}

impl Workout {
    pub fn new(
        source_uuid: Uuid,
        activity_type: String,
        indoor: bool,
        distance_km: f64,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            source_uuid,
            activity_type,
            indoor,
            distance_km,
            start_date,
            end_date,
            gear_ids: Vec::new(),
            created_at: now,
            updated_at: now,
            version: 1,
            is_deleted: false,
        }
    }

    /// Category used for gear matching.
    pub fn workout_type(&self) -> WorkoutType {
        WorkoutType::from_raw(&self.activity_type, self.indoor)
    }

    /// Bump the audit fields after a mutation.
    pub fn mark_updated(&mut self) {
        self.version += 1;
        self.updated_at = Utc::now();
    }

    /// Soft-delete: the record stays in the store so deduplication still
    /// sees its source UUID.
    pub fn mark_deleted(&mut self) {
        self.is_deleted = true;
        self.mark_updated();
    }
}
