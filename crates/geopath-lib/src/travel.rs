//! Rough travel-time estimates for a path length.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mode of travel with a fixed average speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Foot,
    Cycling,
    Driving,
}

impl TravelMode {
    /// Average speed in km/h.
    pub fn speed_kmh(self) -> f64 {
        match self {
            TravelMode::Foot => 4.5,
            TravelMode::Cycling => 15.0,
            TravelMode::Driving => 35.0,
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            TravelMode::Foot => "foot",
            TravelMode::Cycling => "cycling",
            TravelMode::Driving => "driving",
        };
        f.write_str(value)
    }
}

impl FromStr for TravelMode {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "foot" | "walking" => Ok(TravelMode::Foot),
            "cycling" | "bike" => Ok(TravelMode::Cycling),
            "driving" | "car" => Ok(TravelMode::Driving),
            _ => Err(Error::unknown_travel_mode(value)),
        }
    }
}

/// Whole minutes needed to cover `distance_km` at the mode's average speed.
pub fn estimate_travel_minutes(distance_km: f64, mode: TravelMode) -> u64 {
    let hours = distance_km.max(0.0) / mode.speed_kmh();
    (hours * 60.0).round() as u64
}

/// Format minutes as `"N min"`, `"Hh"` or `"Hh Mmin"`.
pub fn format_duration(total_minutes: u64) -> String {
    if total_minutes < 60 {
        return format!("{total_minutes} min");
    }
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if minutes > 0 {
        format!("{hours}h {minutes}min")
    } else {
        format!("{hours}h")
    }
}
