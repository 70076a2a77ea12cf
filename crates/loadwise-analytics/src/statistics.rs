// ABOUTME: Overview totals and pace distribution over a set of activity records
// ABOUTME: Undefined paces are skipped, never counted as zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use loadwise_core::models::ActivityRecord;
use loadwise_core::Metric;
use serde::Serialize;

/// Headline numbers for a record set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverviewStats {
    /// Number of records
    pub activity_count: usize,
    /// Summed distance
    pub total_distance_km: f64,
    /// Summed duration
    pub total_duration_minutes: f64,
    /// Mean of the defined paces
    pub mean_pace_min_per_km: Metric,
}

/// One equal-width bin of the pace distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaceBin {
    /// Inclusive lower edge, min/km
    pub lower: f64,
    /// Upper edge, min/km (inclusive for the last bin)
    pub upper: f64,
    /// Records whose pace falls in the bin
    pub count: usize,
}

/// Totals and mean pace
#[must_use]
pub fn overview(records: &[ActivityRecord]) -> OverviewStats {
    OverviewStats {
        activity_count: records.len(),
        total_distance_km: records.iter().map(ActivityRecord::distance_km).sum(),
        total_duration_minutes: records.iter().map(ActivityRecord::duration_minutes).sum(),
        mean_pace_min_per_km: Metric::mean(records.iter().map(ActivityRecord::pace_min_per_km)),
    }
}

/// Equal-width histogram of defined paces
///
/// Empty when no pace is defined or `bins` is zero. When every pace is equal
/// a single bin holds them all.
#[must_use]
pub fn pace_histogram(records: &[ActivityRecord], bins: usize) -> Vec<PaceBin> {
    let paces: Vec<f64> = records
        .iter()
        .filter_map(|r| r.pace_min_per_km().value())
        .collect();
    if paces.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = paces.iter().copied().fold(f64::INFINITY, f64::min);
    let max = paces.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max <= min {
        return vec![PaceBin {
            lower: min,
            upper: max,
            count: paces.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut histogram: Vec<PaceBin> = (0..bins)
        .map(|i| {
            let lower = (i as f64).mul_add(width, min);
            PaceBin {
                lower,
                upper: lower + width,
                count: 0,
            }
        })
        .collect();
    if let Some(last) = histogram.last_mut() {
        last.upper = max;
    }

    for pace in paces {
        let index = (((pace - min) / width) as usize).min(bins - 1);
        histogram[index].count += 1;
    }
    histogram
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use loadwise_core::models::{ActivityKind, SourceProvider};

    fn record(minutes: f64, km: f64) -> ActivityRecord {
        ActivityRecord::new(
            ActivityKind::Running,
            Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
            minutes,
            km,
            SourceProvider::AppleHealth,
        )
    }

    #[test]
    fn test_overview_skips_undefined_pace() {
        let stats = overview(&[record(60.0, 10.0), record(30.0, 0.0)]);
        assert_eq!(stats.activity_count, 2);
        assert!((stats.total_distance_km - 10.0).abs() < f64::EPSILON);
        assert!((stats.total_duration_minutes - 90.0).abs() < f64::EPSILON);
        assert_eq!(stats.mean_pace_min_per_km, Metric::Defined(6.0));
    }

    #[test]
    fn test_histogram_counts_every_defined_pace() {
        let records = [record(40.0, 10.0), record(50.0, 10.0), record(60.0, 10.0), record(5.0, 0.0)];
        let histogram = pace_histogram(&records, 4);
        assert_eq!(histogram.len(), 4);
        assert_eq!(histogram.iter().map(|b| b.count).sum::<usize>(), 3);
        assert_eq!(histogram[3].count, 1);
        assert!((histogram[3].upper - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_histogram_empty_without_paces() {
        assert!(pace_histogram(&[record(30.0, 0.0)], 20).is_empty());
    }
}
