// ABOUTME: ISO-week aggregation of activity records into weekly distance, duration and pace
// ABOUTME: Also builds the gap-filled weekly distance series consumed by the forecaster
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Days, Duration, NaiveTime, Utc};
use loadwise_core::constants::units::DAYS_PER_WEEK;
use loadwise_core::models::ActivityRecord;
use loadwise_core::Metric;
use serde::Serialize;
use tracing::debug;

/// Totals for one ISO week (Monday 00:00 UTC through Sunday)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyBucket {
    /// Monday 00:00 UTC opening the week
    pub week_start: DateTime<Utc>,
    /// ISO week-numbering year
    pub iso_year: i32,
    /// ISO week number (1-53)
    pub iso_week: u32,
    /// Records falling in the week
    pub activity_count: usize,
    /// Summed distance
    pub total_distance_km: f64,
    /// Summed duration
    pub total_duration_minutes: f64,
    /// Mean of the defined per-record paces
    pub mean_pace_min_per_km: Metric,
    /// Total duration over total distance
    pub overall_pace_min_per_km: Metric,
}

/// One entry of the weekly distance series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeeklyPoint {
    /// Monday 00:00 UTC opening the week
    pub week_start: DateTime<Utc>,
    /// Summed distance, zero for weeks without activity
    pub distance_km: f64,
}

/// Monday 00:00 UTC of the ISO week containing `timestamp`
///
/// `None` when that Monday falls before the earliest representable date.
#[must_use]
pub fn week_start(timestamp: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let date = timestamp.date_naive();
    let monday = date.checked_sub_days(Days::new(u64::from(
        date.weekday().num_days_from_monday(),
    )))?;
    Some(monday.and_time(NaiveTime::MIN).and_utc())
}

/// Bucket records by ISO week
///
/// Only weeks containing at least one record appear; buckets are in
/// ascending week order. A record whose week cannot be dated is left out.
#[must_use]
pub fn weekly_summary(records: &[ActivityRecord]) -> Vec<WeeklyBucket> {
    let mut weeks: BTreeMap<DateTime<Utc>, Vec<&ActivityRecord>> = BTreeMap::new();
    for record in records {
        match week_start(record.start_time()) {
            Some(start) => weeks.entry(start).or_default().push(record),
            None => debug!(
                record.start_time = %record.start_time(),
                "Skipping record outside the weekly calendar"
            ),
        }
    }

    weeks
        .into_iter()
        .map(|(start, members)| {
            let total_distance_km: f64 = members.iter().map(|r| r.distance_km()).sum();
            let total_duration_minutes: f64 = members.iter().map(|r| r.duration_minutes()).sum();
            let iso = start.iso_week();
            WeeklyBucket {
                week_start: start,
                iso_year: iso.year(),
                iso_week: iso.week(),
                activity_count: members.len(),
                total_distance_km,
                total_duration_minutes,
                mean_pace_min_per_km: Metric::mean(members.iter().map(|r| r.pace_min_per_km())),
                overall_pace_min_per_km: Metric::ratio(total_duration_minutes, total_distance_km),
            }
        })
        .collect()
}

/// Weekly distance from the first to the last observed week, gaps filled with zero
#[must_use]
pub fn weekly_distance_series(records: &[ActivityRecord]) -> Vec<WeeklyPoint> {
    let buckets = weekly_summary(records);
    let (Some(first), Some(last)) = (buckets.first(), buckets.last()) else {
        return Vec::new();
    };

    let observed: BTreeMap<DateTime<Utc>, f64> = buckets
        .iter()
        .map(|b| (b.week_start, b.total_distance_km))
        .collect();

    let mut series = Vec::new();
    let mut week = first.week_start;
    while week <= last.week_start {
        series.push(WeeklyPoint {
            week_start: week,
            distance_km: observed.get(&week).copied().unwrap_or(0.0),
        });
        match week.checked_add_signed(Duration::days(DAYS_PER_WEEK)) {
            Some(next) => week = next,
            None => break,
        }
    }
    series
}
