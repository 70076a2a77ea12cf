// ABOUTME: Apple Health workout schema as produced from the export.xml Workout elements
// ABOUTME: Activity code in `workoutActivityType`, `duration`, `totalDistance`, `startDate`
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::fields::FieldMap;

/// Apple Health field layout
///
/// Dates look like `2024-05-01 07:12:44 -0700`. Duration is read as seconds
/// and distance as meters, the same units as Strava.
pub static FIELDS: FieldMap = FieldMap {
    activity_type: "workoutActivityType",
    duration_seconds: &["duration"],
    distance_meters: &["totalDistance"],
    start_time: &["startDate"],
};
