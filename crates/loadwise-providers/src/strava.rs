// ABOUTME: Strava activity schema as exported by the athlete activities endpoint
// ABOUTME: Activity code in `type`, moving time before elapsed time, meters and ISO dates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::fields::FieldMap;

/// Strava field layout
///
/// `moving_time` excludes pauses and is preferred; `elapsed_time` is only
/// consulted for exports that omit it. `start_date` is UTC, while
/// `start_date_local` is wall-clock time and only used as a fallback.
pub static FIELDS: FieldMap = FieldMap {
    activity_type: "type",
    duration_seconds: &["moving_time", "elapsed_time"],
    distance_meters: &["distance"],
    start_time: &["start_date", "start_date_local"],
};
