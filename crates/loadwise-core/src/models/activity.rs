// ABOUTME: Canonical activity record produced by the schema normalizers
// ABOUTME: Holds timezone-normalized start time, canonical units, pace and provenance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::{ActivityKind, SourceProvider};
use crate::calculator::DerivedMetrics;
use crate::metric::Metric;

/// One workout in canonical form
///
/// Fields are read-only after construction: duration and distance are
/// clamped to non-negative finite values, pace is always derived from them,
/// and the provenance tag cannot be changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRecord {
    activity_kind: ActivityKind,
    start_time: DateTime<Utc>,
    duration_minutes: f64,
    distance_km: f64,
    pace_min_per_km: Metric,
    source: SourceProvider,
    raw: Map<String, Value>,
}

impl ActivityRecord {
    /// Build a record from values already in minutes and kilometers
    #[must_use]
    pub fn new(
        activity_kind: ActivityKind,
        start_time: DateTime<Utc>,
        duration_minutes: f64,
        distance_km: f64,
        source: SourceProvider,
    ) -> Self {
        Self::from_metrics(
            activity_kind,
            start_time,
            DerivedMetrics::from_canonical(duration_minutes, distance_km),
            source,
            Map::new(),
        )
    }

    /// Build a record from derived metrics and the raw provider payload
    #[must_use]
    pub fn from_metrics(
        activity_kind: ActivityKind,
        start_time: DateTime<Utc>,
        metrics: DerivedMetrics,
        source: SourceProvider,
        raw: Map<String, Value>,
    ) -> Self {
        let metrics = DerivedMetrics::from_canonical(metrics.duration_minutes, metrics.distance_km);
        Self {
            activity_kind,
            start_time,
            duration_minutes: metrics.duration_minutes,
            distance_km: metrics.distance_km,
            pace_min_per_km: metrics.pace_min_per_km,
            source,
            raw,
        }
    }

    /// Canonical activity kind
    #[must_use]
    pub const fn activity_kind(&self) -> &ActivityKind {
        &self.activity_kind
    }

    /// Start time in UTC
    #[must_use]
    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Duration in minutes
    #[must_use]
    pub const fn duration_minutes(&self) -> f64 {
        self.duration_minutes
    }

    /// Distance in kilometers
    #[must_use]
    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Minutes per kilometer, undefined for zero distance
    #[must_use]
    pub const fn pace_min_per_km(&self) -> Metric {
        self.pace_min_per_km
    }

    /// Training load proxy: the duration in minutes
    #[must_use]
    pub const fn training_load(&self) -> f64 {
        self.duration_minutes
    }

    /// Provider that produced the record
    #[must_use]
    pub const fn source(&self) -> SourceProvider {
        self.source
    }

    /// Raw provider payload, kept for traceability only
    #[must_use]
    pub const fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_clamps_and_derives_pace() {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 7, 0, 0).unwrap();
        let record = ActivityRecord::new(
            ActivityKind::Running,
            start,
            -5.0,
            2.0,
            SourceProvider::Strava,
        );
        assert!(record.duration_minutes().abs() < f64::EPSILON);
        assert_eq!(record.pace_min_per_km(), Metric::Defined(0.0));
        assert_eq!(record.source(), SourceProvider::Strava);
    }
}
