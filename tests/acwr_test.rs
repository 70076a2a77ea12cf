// ABOUTME: Integration tests for ACWR classification and the aggregate risk summary
// ABOUTME: Runs the full analysis pass over raw Strava exports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use loadwise::analytics::acwr::NOT_ENOUGH_DATA_MESSAGE;
use loadwise::analytics::{AcwrClassifier, AcwrZone, LoadPoint};
use loadwise::domain::models::ActivityKind;
use loadwise::domain::Metric;
use loadwise::providers::RawBatch;
use loadwise::{analyze, AnalysisRequest};

#[test]
fn test_spike_after_steady_week_is_optimal() {
    common::init_test_logging();

    let mut minutes = vec![10.0; 7];
    minutes.push(100.0);
    let request = AnalysisRequest::new(common::fixed_now())
        .with_batch(common::daily_strava_runs(&minutes));

    let report = analyze(&request);
    assert_eq!(report.acwr.len(), 8);

    let last = report.acwr.last().unwrap();
    assert!((last.acute_load - 22.857_142_857).abs() < 1e-6);
    assert!((last.chronic_load - 21.25).abs() < 1e-9);
    let ratio = last.ratio.value().unwrap();
    assert!((ratio - 1.075_630_252).abs() < 1e-6);
    assert_eq!(last.zone, Some(AcwrZone::Optimal));

    for point in &report.acwr[..7] {
        assert_eq!(point.ratio, Metric::Defined(1.0));
        assert_eq!(point.zone, Some(AcwrZone::Optimal));
    }
}

#[test]
fn test_zero_duration_history_leaves_ratio_undefined() {
    let request = AnalysisRequest::new(common::fixed_now())
        .with_batch(common::daily_strava_runs(&[0.0, 0.0, 0.0]));

    let report = analyze(&request);
    assert_eq!(report.acwr.len(), 3);
    for point in &report.acwr {
        assert_eq!(point.ratio, Metric::Undefined);
        assert_eq!(point.zone, None);
    }
    assert_eq!(report.acwr_summary.defined_points, 0);
    assert_eq!(report.acwr_summary.undefined_points, 3);
    assert_eq!(report.acwr_summary.mean_ratio, Metric::Undefined);
    assert_eq!(report.acwr_summary.message, NOT_ENOUGH_DATA_MESSAGE);
}

#[test]
fn test_empty_request_has_not_enough_data() {
    let report = analyze(&AnalysisRequest::new(common::fixed_now()));
    assert!(report.acwr.is_empty());
    assert_eq!(report.acwr_summary.zone, None);
    assert_eq!(report.acwr_summary.message, NOT_ENOUGH_DATA_MESSAGE);
    assert!(report.acwr_summary.primary_risk_kind.is_none());
}

#[test]
fn test_zone_boundaries_are_inclusive_upward() {
    assert_eq!(AcwrZone::classify(0.79), Some(AcwrZone::Low));
    assert_eq!(AcwrZone::classify(0.8), Some(AcwrZone::Optimal));
    assert_eq!(AcwrZone::classify(1.3), Some(AcwrZone::Optimal));
    assert_eq!(AcwrZone::classify(1.31), Some(AcwrZone::Caution));
    assert_eq!(AcwrZone::classify(1.5), Some(AcwrZone::Caution));
    assert_eq!(AcwrZone::classify(1.51), Some(AcwrZone::High));
    assert_eq!(AcwrZone::classify(f64::NAN), None);
}

#[test]
fn test_summary_message_and_primary_kind() {
    let points = vec![
        load_point(0, ActivityKind::Running, 30.0, 20.0),
        load_point(1, ActivityKind::Cycling, 10.0, 20.0),
        load_point(2, ActivityKind::Running, 20.0, 20.0),
    ];
    let classified = AcwrClassifier::classify_points(&points);
    let summary = AcwrClassifier::summarize(&classified);

    // ratios 1.5, 0.5, 1.0
    assert_eq!(summary.mean_ratio, Metric::Defined(1.0));
    assert_eq!(summary.zone, Some(AcwrZone::Optimal));
    assert!(summary.message.starts_with("Your average ACWR is 1.00."));
    assert_eq!(summary.tally.caution, 1);
    assert_eq!(summary.tally.low, 1);
    assert_eq!(summary.tally.optimal, 1);
    assert_eq!(summary.primary_risk_kind, Some(ActivityKind::Running));
}

#[test]
fn test_summary_ignores_unknown_batches() {
    let request = AnalysisRequest::new(common::fixed_now())
        .with_batch(RawBatch::new("polar", vec![common::strava(
            "Run",
            common::day(0),
            600.0,
            2000.0,
        )]))
        .with_batch(common::daily_strava_runs(&[30.0, 30.0]));

    let report = analyze(&request);
    assert_eq!(report.rejected_batches.len(), 1);
    assert_eq!(report.acwr_summary.defined_points, 2);
    assert_eq!(report.acwr_summary.mean_ratio, Metric::Defined(1.0));
}

fn load_point(index: usize, kind: ActivityKind, acute: f64, chronic: f64) -> LoadPoint {
    LoadPoint {
        record_index: index,
        start_time: common::day(i64::try_from(index).unwrap()),
        activity_kind: kind,
        training_load: acute,
        acute_load: acute,
        chronic_load: chronic,
    }
}
