// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Distance unit preference and display conversion.
//!
//! All distances are persisted in kilometers; the unit preference only
//! affects formatting in API responses and clients.

use serde::{Deserialize, Serialize};

const KM_PER_MILE: f64 = 1.609_344;

/// User-selectable distance unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    Km,
    Mi,
}

impl DistanceUnit {
    /// Parse the stored settings value; unknown values fall back to kilometers.
    pub fn from_setting(value: &str) -> Self {
        match value {
            "mi" => DistanceUnit::Mi,
            _ => DistanceUnit::Km,
        }
    }

    /// The value persisted in the settings store.
    pub fn as_setting(&self) -> &'static str {
        match self {
            DistanceUnit::Km => "km",
            DistanceUnit::Mi => "mi",
        }
    }
}

/// Convert a stored kilometer value into the display unit.
pub fn display_distance(km: f64, unit: DistanceUnit) -> f64 {
    match unit {
        DistanceUnit::Km => km,
        DistanceUnit::Mi => km / KM_PER_MILE,
    }
}

/// Format a kilometer value for display, e.g. "12.5 km" or "7.8 mi".
pub fn format_distance(km: f64, unit: DistanceUnit) -> String {
    format!("{:.1} {}", display_distance(km, unit), unit.as_setting())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_km_passthrough() {
        assert_eq!(display_distance(10.0, DistanceUnit::Km), 10.0);
        assert_eq!(format_distance(10.0, DistanceUnit::Km), "10.0 km");
    }

    #[test]
    fn test_miles_conversion() {
        let miles = display_distance(KM_PER_MILE * 5.0, DistanceUnit::Mi);
        assert!((miles - 5.0).abs() < 1e-9);
        assert_eq!(format_distance(16.09344, DistanceUnit::Mi), "10.0 mi");
    }

    #[test]
    fn test_setting_round_trip() {
        assert_eq!(DistanceUnit::from_setting("mi"), DistanceUnit::Mi);
        assert_eq!(DistanceUnit::from_setting("km"), DistanceUnit::Km);
        // Unknown values fall back to km rather than erroring
        assert_eq!(DistanceUnit::from_setting("furlong"), DistanceUnit::Km);
        assert_eq!(DistanceUnit::Mi.as_setting(), "mi");
    }
}
