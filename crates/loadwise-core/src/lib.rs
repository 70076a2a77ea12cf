// ABOUTME: Core types and constants for the loadwise training-load analytics engine
// ABOUTME: Foundation crate with activity models, metric sentinels, unit conversion and errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Loadwise Core
//!
//! Foundation crate shared by the provider normalizers, the analytics engine
//! and the outer analysis pass. It changes rarely and carries no I/O.
//!
//! ## Modules
//!
//! - **errors**: `AppError`/`ErrorCode` plus the engine's domain errors
//! - **constants**: unit divisors, load windows, ACWR thresholds, forecast limits
//! - **metric**: the `Metric` sentinel used for every division that can be undefined
//! - **calculator**: unit conversion and derived pace
//! - **models**: canonical `ActivityRecord`, `ActivityKind` and `SourceProvider`

/// Unified error handling with error codes and domain-specific errors
pub mod errors;

/// Engine constants organized by domain
pub mod constants;

/// Defined-or-undefined numeric values
pub mod metric;

/// Unit conversion and derived-metric calculation
pub mod calculator;

/// Canonical activity models
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode};
pub use metric::Metric;
