// ABOUTME: Training-load analytics over canonical activity records
// ABOUTME: Rolling acute/chronic load, ACWR risk zones, weekly buckets and ARIMA forecasting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Loadwise Analytics
//!
//! Pure computation over [`ActivityRecord`] slices:
//!
//! - **`training_load`**: per-kind trailing rolling means (acute 7, chronic 28)
//! - **acwr**: acute:chronic ratio per record, risk zones and summaries
//! - **weekly**: ISO-week buckets and the gap-filled weekly distance series
//! - **statistics**: overview totals and the pace distribution
//! - **forecast**: ARIMA(1,1,1) projection of weekly distance
//!
//! Every function recomputes from its input. Nothing is cached between calls.
//!
//! [`ActivityRecord`]: loadwise_core::models::ActivityRecord

/// Acute:Chronic Workload Ratio classification
pub mod acwr;
/// Weekly distance forecasting
pub mod forecast;
/// Overview statistics and pace distribution
pub mod statistics;
/// Rolling acute/chronic training load
pub mod training_load;
/// ISO-week aggregation
pub mod weekly;

pub use acwr::{AcwrClassifier, AcwrPoint, AcwrSummary, AcwrZone, KindAcwr, ZoneTally};
pub use forecast::{ForecastEngine, ForecastOutcome, ForecastPoint, WeeklyForecast};
pub use statistics::{OverviewStats, PaceBin};
pub use training_load::{LoadPoint, LoadWindows, TrainingLoadCalculator};
pub use weekly::{WeeklyBucket, WeeklyPoint};
