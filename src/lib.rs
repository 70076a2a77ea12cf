// ABOUTME: Main library entry point for the loadwise training-load analytics engine
// ABOUTME: Wires provider normalization and analytics into a single analysis pass
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Loadwise
//!
//! Training-load analytics over exercise activities exported from Strava and
//! Apple Health.
//!
//! ## Architecture
//!
//! - **`loadwise_core`**: canonical records, `Metric`, unit conversion, errors
//! - **`loadwise_providers`**: per-provider field tables and normalization
//! - **`loadwise_analytics`**: rolling loads, ACWR, weekly buckets, forecasting
//! - **this crate**: the analysis pass, configuration and logging
//!
//! ## Example
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use loadwise::analysis::{analyze, AnalysisRequest};
//! use loadwise::providers::RawBatch;
//!
//! let request = AnalysisRequest::new(Utc::now()).with_batch(RawBatch::new("strava", Vec::new()));
//! let report = analyze(&request);
//! println!("{}", report.acwr_summary.message);
//! ```

/// One analysis pass over raw provider batches
pub mod analysis;

/// Engine configuration with environment overrides
pub mod config;

/// Logging configuration and structured analysis events
pub mod logging;

pub use loadwise_analytics as analytics;
pub use loadwise_core as domain;
pub use loadwise_providers as providers;

pub use analysis::{analyze, AnalysisEngine, AnalysisFilters, AnalysisReport, AnalysisRequest};
pub use config::{ConfigError, EngineConfig};
pub use loadwise_core::{AppError, AppResult, ErrorCode, Metric};
