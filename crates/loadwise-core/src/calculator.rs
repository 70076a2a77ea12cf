// ABOUTME: Unit conversion and derived-metric calculation for activity records
// ABOUTME: Coerces raw provider values, converts seconds/meters, and derives pace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::units::{METERS_PER_KM, SECONDS_PER_MINUTE};
use crate::metric::Metric;

/// Coerce a raw provider value to a non-negative finite number
///
/// Missing keys, `null`, booleans, unparseable strings, NaN/infinite values
/// and negative numbers all become `0.0`. Favors keeping the record in the
/// aggregates over dropping it.
#[must_use]
pub fn coerce_numeric(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Convert seconds to minutes
#[must_use]
pub fn seconds_to_minutes(seconds: f64) -> f64 {
    seconds / SECONDS_PER_MINUTE
}

/// Convert meters to kilometers
#[must_use]
pub fn meters_to_km(meters: f64) -> f64 {
    meters / METERS_PER_KM
}

/// Pace in minutes per kilometer
///
/// Undefined whenever `distance_km` is zero; never `0.0` or infinite.
#[must_use]
pub fn pace_min_per_km(duration_minutes: f64, distance_km: f64) -> Metric {
    Metric::ratio(duration_minutes, distance_km)
}

/// Canonical-unit values derived from one raw record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Duration in minutes
    pub duration_minutes: f64,
    /// Distance in kilometers
    pub distance_km: f64,
    /// Minutes per kilometer, undefined for zero distance
    pub pace_min_per_km: Metric,
}

impl DerivedMetrics {
    /// Derive canonical metrics from raw seconds and meters values
    #[must_use]
    pub fn from_raw(duration_seconds: Option<&Value>, distance_meters: Option<&Value>) -> Self {
        let duration_minutes = seconds_to_minutes(coerce_numeric(duration_seconds));
        let distance_km = meters_to_km(coerce_numeric(distance_meters));
        Self::from_canonical(duration_minutes, distance_km)
    }

    /// Build from values already in minutes and kilometers
    ///
    /// Negative or non-finite inputs are clamped to zero.
    #[must_use]
    pub fn from_canonical(duration_minutes: f64, distance_km: f64) -> Self {
        let duration_minutes = non_negative(duration_minutes);
        let distance_km = non_negative(distance_km);
        Self {
            duration_minutes,
            distance_km,
            pace_min_per_km: pace_min_per_km(duration_minutes, distance_km),
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
