// ABOUTME: Acute:Chronic Workload Ratio per record with injury-risk zone classification
// ABOUTME: Summarizes defined ratios into an aggregate zone, zone tally and per-kind means
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use loadwise_core::constants::acwr::{CAUTION_UPPER, LOW_UPPER, OPTIMAL_UPPER};
use loadwise_core::models::ActivityKind;
use loadwise_core::Metric;
use serde::{Deserialize, Serialize};

use crate::training_load::LoadPoint;

/// Summary message when no record has a defined ratio
pub const NOT_ENOUGH_DATA_MESSAGE: &str = "Not enough data to calculate ACWR.";

/// Injury-risk zone for an ACWR value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcwrZone {
    /// Below 0.8: undertraining
    Low,
    /// 0.8 to 1.3 inclusive
    Optimal,
    /// Above 1.3 up to 1.5 inclusive
    Caution,
    /// Above 1.5
    High,
}

impl AcwrZone {
    /// Classify a ratio; `None` for NaN or infinite input
    #[must_use]
    pub fn classify(ratio: f64) -> Option<Self> {
        if !ratio.is_finite() {
            return None;
        }
        Some(if ratio < LOW_UPPER {
            Self::Low
        } else if ratio <= OPTIMAL_UPPER {
            Self::Optimal
        } else if ratio <= CAUTION_UPPER {
            Self::Caution
        } else {
            Self::High
        })
    }

    /// Classify a metric; undefined metrics have no zone
    #[must_use]
    pub fn from_metric(ratio: Metric) -> Option<Self> {
        ratio.value().and_then(Self::classify)
    }

    /// Display name
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Optimal => "Optimal",
            Self::Caution => "Caution",
            Self::High => "High Risk",
        }
    }

    /// Training guidance for an athlete whose average ratio sits in this zone
    #[must_use]
    pub const fn guidance(self) -> &'static str {
        match self {
            Self::Low => {
                "You may be undertraining. Consider gradually increasing your training load to maintain fitness."
            }
            Self::Optimal => {
                "This is considered optimal for training adaptation and injury prevention."
            }
            Self::Caution => {
                "You are entering a slightly high risk zone. Monitor fatigue levels and plan rest days."
            }
            Self::High => {
                "This is considered high risk for injury. It's advisable to reduce workload and prioritize recovery."
            }
        }
    }
}

impl fmt::Display for AcwrZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// ACWR for one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcwrPoint {
    /// Position of the source record in the analysed slice
    pub record_index: usize,
    /// Start time of the source record
    pub timestamp: DateTime<Utc>,
    /// Kind of the source record
    pub activity_kind: ActivityKind,
    /// Acute rolling load
    pub acute_load: f64,
    /// Chronic rolling load
    pub chronic_load: f64,
    /// Acute over chronic; undefined when chronic load is zero
    pub ratio: Metric,
    /// Zone of a defined ratio
    pub zone: Option<AcwrZone>,
}

/// Defined-ratio counts per zone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ZoneTally {
    /// Ratios below 0.8
    pub low: usize,
    /// Ratios in the optimal band
    pub optimal: usize,
    /// Ratios in the caution band
    pub caution: usize,
    /// Ratios above 1.5
    pub high: usize,
}

impl ZoneTally {
    fn record(&mut self, zone: AcwrZone) {
        match zone {
            AcwrZone::Low => self.low += 1,
            AcwrZone::Optimal => self.optimal += 1,
            AcwrZone::Caution => self.caution += 1,
            AcwrZone::High => self.high += 1,
        }
    }

    /// Sum over all zones
    #[must_use]
    pub const fn total(&self) -> usize {
        self.low + self.optimal + self.caution + self.high
    }
}

/// Mean ratio for one activity kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindAcwr {
    /// Kind the mean belongs to
    pub activity_kind: ActivityKind,
    /// Mean of the kind's defined ratios
    pub mean_ratio: Metric,
    /// Zone of the mean
    pub zone: Option<AcwrZone>,
    /// Defined ratios contributing to the mean
    pub defined_points: usize,
}

/// Aggregate view over a set of ACWR points
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcwrSummary {
    /// Mean of all defined ratios
    pub mean_ratio: Metric,
    /// Zone of the mean ratio
    pub zone: Option<AcwrZone>,
    /// Guidance for the aggregate zone
    pub message: String,
    /// Points with a defined ratio
    pub defined_points: usize,
    /// Points whose ratio is undefined
    pub undefined_points: usize,
    /// Defined ratios per zone
    pub tally: ZoneTally,
    /// Per-kind means in kind order
    pub by_kind: Vec<KindAcwr>,
    /// Kind with the highest mean ratio
    pub primary_risk_kind: Option<ActivityKind>,
}

/// Stateless ACWR classifier over rolling load points
pub struct AcwrClassifier;

impl AcwrClassifier {
    /// Attach ratio and zone to every load point, preserving order
    #[must_use]
    pub fn classify_points(points: &[LoadPoint]) -> Vec<AcwrPoint> {
        points
            .iter()
            .map(|point| {
                let ratio = Metric::ratio(point.acute_load, point.chronic_load);
                AcwrPoint {
                    record_index: point.record_index,
                    timestamp: point.start_time,
                    activity_kind: point.activity_kind.clone(),
                    acute_load: point.acute_load,
                    chronic_load: point.chronic_load,
                    ratio,
                    zone: AcwrZone::from_metric(ratio),
                }
            })
            .collect()
    }

    /// Aggregate zone, guidance, zone tally and per-kind breakdown
    ///
    /// Undefined ratios are counted separately and never enter a mean or the
    /// tally. Ties for the primary risk kind go to the kind that sorts first.
    #[must_use]
    pub fn summarize(points: &[AcwrPoint]) -> AcwrSummary {
        let mean_ratio = Metric::mean(points.iter().map(|p| p.ratio));
        let zone = AcwrZone::from_metric(mean_ratio);
        let message = match (zone, mean_ratio.value()) {
            (Some(zone), Some(mean)) => {
                format!("Your average ACWR is {mean:.2}. {}", zone.guidance())
            }
            _ => NOT_ENOUGH_DATA_MESSAGE.to_owned(),
        };

        let mut tally = ZoneTally::default();
        for zone in points.iter().filter_map(|p| p.zone) {
            tally.record(zone);
        }
        let defined_points = points.iter().filter(|p| p.ratio.is_defined()).count();

        let mut per_kind: BTreeMap<&ActivityKind, Vec<Metric>> = BTreeMap::new();
        for point in points {
            per_kind.entry(&point.activity_kind).or_default().push(point.ratio);
        }
        let by_kind: Vec<KindAcwr> = per_kind
            .into_iter()
            .map(|(kind, ratios)| {
                let mean_ratio = Metric::mean(ratios.iter().copied());
                KindAcwr {
                    activity_kind: kind.clone(),
                    mean_ratio,
                    zone: AcwrZone::from_metric(mean_ratio),
                    defined_points: ratios.iter().filter(|r| r.is_defined()).count(),
                }
            })
            .collect();

        let primary_risk_kind = primary_risk_kind(&by_kind);

        AcwrSummary {
            mean_ratio,
            zone,
            message,
            defined_points,
            undefined_points: points.len() - defined_points,
            tally,
            by_kind,
            primary_risk_kind,
        }
    }
}

fn primary_risk_kind(by_kind: &[KindAcwr]) -> Option<ActivityKind> {
    let mut best: Option<(&ActivityKind, f64)> = None;
    for entry in by_kind {
        let Some(mean) = entry.mean_ratio.value() else {
            continue;
        };
        match best {
            Some((_, current)) if mean <= current => {}
            _ => best = Some((&entry.activity_kind, mean)),
        }
    }
    best.map(|(kind, _)| kind.clone())
}

/// Attach ratio and zone to every load point
#[must_use]
pub fn classify_points(points: &[LoadPoint]) -> Vec<AcwrPoint> {
    AcwrClassifier::classify_points(points)
}

/// Summarize classified points
#[must_use]
pub fn summarize(points: &[AcwrPoint]) -> AcwrSummary {
    AcwrClassifier::summarize(points)
}
