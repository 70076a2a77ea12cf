// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging setup and raw provider record builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::panic
)]
//! Shared test utilities for `loadwise`
//!
//! Builders for raw Strava and Apple Health dictionaries, so tests exercise
//! the same normalization path as real exports.

use std::env;
use std::sync::Once;

use chrono::{DateTime, Duration, TimeZone, Utc};
use loadwise::providers::{RawBatch, RawFields};
use serde_json::{json, Value};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Reference time used by every test request
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 12, 31, 12, 0, 0).unwrap()
}

/// 07:00 UTC on Monday 2024-01-01 plus `days`
pub fn day(days: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap() + Duration::days(days)
}

/// Unwrap a JSON object literal into raw fields
pub fn raw(value: Value) -> RawFields {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Strava activity as it appears in an API export
pub fn strava(kind: &str, start: DateTime<Utc>, moving_secs: f64, meters: f64) -> RawFields {
    raw(json!({
        "type": kind,
        "moving_time": moving_secs,
        "distance": meters,
        "start_date": start.to_rfc3339(),
    }))
}

/// Apple Health workout as it appears in an export
pub fn apple_health(code: &str, start: DateTime<Utc>, secs: f64, meters: f64) -> RawFields {
    raw(json!({
        "workoutActivityType": code,
        "duration": secs,
        "totalDistance": meters,
        "startDate": start.format("%Y-%m-%d %H:%M:%S %z").to_string(),
    }))
}

/// One Strava run per day with the given durations in minutes, 10 km each
pub fn daily_strava_runs(minutes: &[f64]) -> RawBatch {
    let activities = minutes
        .iter()
        .zip(0_i64..)
        .map(|(m, offset)| strava("Run", day(offset), m * 60.0, 10_000.0))
        .collect();
    RawBatch::new("strava", activities)
}

/// One Strava run per week carrying the given distances in km
pub fn weekly_strava_runs(distances_km: &[f64]) -> RawBatch {
    let activities = distances_km
        .iter()
        .zip(0_i64..)
        .map(|(km, week)| strava("Run", day(week * 7), 3_600.0, km * 1_000.0))
        .collect();
    RawBatch::new("strava", activities)
}
