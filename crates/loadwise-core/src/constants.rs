// ABOUTME: Constants for unit conversion, load windows, ACWR zones and forecasting
// ABOUTME: Named values used across normalization, aggregation and classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Grouped by domain. Thresholds here are fixed by the ACWR methodology and are
//! deliberately not part of the runtime configuration.

/// Unit conversion factors
pub mod units {
    /// Seconds per minute
    pub const SECONDS_PER_MINUTE: f64 = 60.0;

    /// Meters per kilometer
    pub const METERS_PER_KM: f64 = 1000.0;

    /// Days per week
    pub const DAYS_PER_WEEK: i64 = 7;
}

/// Rolling training-load windows, counted in same-kind records
pub mod load_windows {
    /// Acute window (short-term fatigue)
    pub const ACUTE_WINDOW: usize = 7;

    /// Chronic window (long-term fitness)
    pub const CHRONIC_WINDOW: usize = 28;

    /// Observations required before a rolling value is defined
    pub const MIN_PERIODS: usize = 1;
}

/// Acute:Chronic Workload Ratio zone boundaries
pub mod acwr {
    /// Below this ratio the athlete is undertraining
    pub const LOW_UPPER: f64 = 0.8;

    /// Inclusive upper bound of the optimal zone
    pub const OPTIMAL_UPPER: f64 = 1.3;

    /// Inclusive upper bound of the caution zone; above is high risk
    pub const CAUTION_UPPER: f64 = 1.5;
}

/// Weekly distance forecasting
pub mod forecast {
    /// Weekly buckets required before a model fit is attempted
    pub const MIN_WEEKLY_BUCKETS: usize = 10;

    /// Number of projected weeks
    pub const HORIZON_WEEKS: usize = 12;

    /// z-score for the 95% prediction interval
    pub const INTERVAL_Z_95: f64 = 1.96;
}

/// Pace distribution defaults
pub mod pace {
    /// Histogram bins used by the pace distribution
    pub const DEFAULT_HISTOGRAM_BINS: usize = 20;
}

/// Accepted calendar range for provider timestamps
pub mod timestamps {
    /// Earliest year a start time may carry
    pub const MIN_YEAR: i32 = 1900;

    /// Latest year a start time may carry
    pub const MAX_YEAR: i32 = 9999;
}
