// ABOUTME: Benchmark fixtures generating realistic Strava and Apple Health exports
// ABOUTME: Deterministic data so repeated runs measure the same work
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Benchmark fixtures.
//!
//! Activities are spread roughly one per day going forward from a fixed
//! Monday, alternating providers and kinds.

use chrono::{DateTime, Duration, TimeZone, Utc};
use loadwise::providers::{RawBatch, RawFields};
use loadwise::AnalysisRequest;
use serde_json::{json, Value};

/// Predefined history lengths for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum HistorySize {
    /// About two months of activities
    Small,
    /// About a year of activities
    Medium,
    /// Several years of activities
    Large,
}

impl HistorySize {
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Small => 60,
            Self::Medium => 400,
            Self::Large => 2_000,
        }
    }
}

fn base_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 1, 4, 6, 30, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn object(value: Value) -> RawFields {
    match value {
        Value::Object(map) => map,
        _ => RawFields::new(),
    }
}

#[allow(clippy::cast_possible_wrap, clippy::cast_precision_loss)]
fn strava_activity(index: usize) -> RawFields {
    let kind = match index % 3 {
        0 => "Run",
        1 => "Ride",
        _ => "Swim",
    };
    let start = base_date() + Duration::hours((index * 26) as i64);
    object(json!({
        "type": kind,
        "moving_time": 1_800 + (index * 137) % 3_600,
        "distance": 4_000.0 + ((index * 251) % 12_000) as f64,
        "start_date": start.to_rfc3339(),
    }))
}

#[allow(clippy::cast_possible_wrap, clippy::cast_precision_loss)]
fn apple_health_workout(index: usize) -> RawFields {
    let code = match index % 4 {
        0 => "HKWorkoutActivityTypeRunning",
        1 => "HKWorkoutActivityTypeWalking",
        2 => "HKWorkoutActivityTypeFunctionalStrengthTraining",
        _ => "HKWorkoutActivityTypeYoga",
    };
    let start = base_date() + Duration::hours((index * 26 + 13) as i64);
    object(json!({
        "workoutActivityType": code,
        "duration": 1_200 + (index * 97) % 2_400,
        "totalDistance": ((index * 173) % 8_000) as f64,
        "startDate": start.format("%Y-%m-%d %H:%M:%S %z").to_string(),
    }))
}

/// Request with `size` activities split across both providers
#[must_use]
pub fn generate_request(size: HistorySize) -> AnalysisRequest {
    let half = size.count() / 2;
    let strava = RawBatch::new("strava", (0..half).map(strava_activity).collect());
    let apple = RawBatch::new(
        "apple_health",
        (0..size.count() - half).map(apple_health_workout).collect(),
    );
    let now = base_date() + Duration::days(3_650);
    AnalysisRequest::new(now).with_batch(strava).with_batch(apple)
}
