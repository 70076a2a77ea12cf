// ABOUTME: Acute and chronic training load as trailing rolling means per activity kind
// ABOUTME: Windows count same-kind records, not calendar days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use loadwise_core::constants::load_windows::{ACUTE_WINDOW, CHRONIC_WINDOW, MIN_PERIODS};
use loadwise_core::models::{ActivityKind, ActivityRecord};
use serde::{Deserialize, Serialize};

/// Rolling window sizes, in records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadWindows {
    /// Short-term fatigue window
    pub acute: usize,
    /// Long-term fitness window
    pub chronic: usize,
}

impl Default for LoadWindows {
    fn default() -> Self {
        Self {
            acute: ACUTE_WINDOW,
            chronic: CHRONIC_WINDOW,
        }
    }
}

/// Rolling loads attached to one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadPoint {
    /// Position of the source record in the slice given to the calculator
    pub record_index: usize,
    /// Start time of the source record
    pub start_time: DateTime<Utc>,
    /// Kind of the source record
    pub activity_kind: ActivityKind,
    /// The record's own load (duration in minutes)
    pub training_load: f64,
    /// Mean load over the trailing acute window
    pub acute_load: f64,
    /// Mean load over the trailing chronic window
    pub chronic_load: f64,
}

/// Calculator for per-kind rolling acute and chronic loads
#[derive(Debug, Clone, Copy, Default)]
pub struct TrainingLoadCalculator {
    windows: LoadWindows,
}

impl TrainingLoadCalculator {
    /// Calculator with the standard 7/28 record windows
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculator with custom window sizes
    #[must_use]
    pub const fn with_windows(acute: usize, chronic: usize) -> Self {
        Self {
            windows: LoadWindows { acute, chronic },
        }
    }

    /// Window sizes in use
    #[must_use]
    pub const fn windows(&self) -> LoadWindows {
        self.windows
    }

    /// Trailing mean over at most `window` values ending at each position
    ///
    /// The first positions average whatever is available, so the output has
    /// the same length as the input and is always defined.
    #[must_use]
    pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
        let window = window.max(MIN_PERIODS);
        (0..values.len())
            .map(|end| {
                let start = (end + 1).saturating_sub(window);
                let slice = &values[start..=end];
                let len = slice.len() as f64;
                slice.iter().sum::<f64>() / len
            })
            .collect()
    }

    /// Compute acute and chronic loads for every record
    ///
    /// Records are grouped by kind and ordered by start time inside each group
    /// (ties keep input order). The returned points are in chronological
    /// order; `record_index` maps each point back to `records`.
    #[must_use]
    pub fn compute_load_windows(&self, records: &[ActivityRecord]) -> Vec<LoadPoint> {
        let mut order: Vec<usize> = (0..records.len()).collect();
        order.sort_by_key(|&i| records[i].start_time());

        let mut by_kind: BTreeMap<&ActivityKind, Vec<usize>> = BTreeMap::new();
        for &i in &order {
            by_kind.entry(records[i].activity_kind()).or_default().push(i);
        }

        let mut acute = vec![0.0; records.len()];
        let mut chronic = vec![0.0; records.len()];
        for indices in by_kind.values() {
            let loads: Vec<f64> = indices.iter().map(|&i| records[i].training_load()).collect();
            let acute_series = Self::rolling_mean(&loads, self.windows.acute);
            let chronic_series = Self::rolling_mean(&loads, self.windows.chronic);
            for (pos, &i) in indices.iter().enumerate() {
                acute[i] = acute_series[pos];
                chronic[i] = chronic_series[pos];
            }
        }

        order
            .into_iter()
            .map(|i| {
                let record = &records[i];
                LoadPoint {
                    record_index: i,
                    start_time: record.start_time(),
                    activity_kind: record.activity_kind().clone(),
                    training_load: record.training_load(),
                    acute_load: acute[i],
                    chronic_load: chronic[i],
                }
            })
            .collect()
    }
}

/// Rolling loads with the standard windows
#[must_use]
pub fn compute_load_windows(records: &[ActivityRecord]) -> Vec<LoadPoint> {
    TrainingLoadCalculator::new().compute_load_windows(records)
}
