// ABOUTME: One analysis pass from raw provider batches to the full training-load report
// ABOUTME: Normalize, filter, aggregate, classify and forecast, optionally under a deadline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Analysis pass
//!
//! An [`AnalysisRequest`] is immutable input: raw batches, filters and the
//! reference time `now`. Every derived value is recomputed from it, so the
//! same request always yields the same [`AnalysisReport`].

use std::mem;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use loadwise_analytics::acwr::{self, AcwrPoint, AcwrSummary};
use loadwise_analytics::forecast::{ForecastEngine, ForecastOutcome};
use loadwise_analytics::statistics::{self, OverviewStats, PaceBin};
use loadwise_analytics::weekly::{self, WeeklyBucket, WeeklyPoint};
use loadwise_analytics::TrainingLoadCalculator;
use loadwise_core::errors::{ForecastUnavailable, MissingTimestampError, SchemaError};
use loadwise_core::models::{ActivityKind, ActivityRecord};
use loadwise_providers::{normalize_batch, normalize_tagged, NormalizedBatch, RawBatch, TaggedActivity};
use serde::{Deserialize, Serialize};
use tokio::{task, time};
use tracing::debug;

use crate::config::EngineConfig;
use crate::logging::AnalysisLogger;

/// Record selection applied after normalization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisFilters {
    /// Keep only this kind; `None` keeps every kind
    pub activity_kind: Option<ActivityKind>,
    /// First UTC calendar date kept; defaults to the earliest record
    pub start_date: Option<NaiveDate>,
    /// Last UTC calendar date kept; defaults to the latest record, or the
    /// date of `now` when there are no records
    pub end_date: Option<NaiveDate>,
}

/// Immutable input of one analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Homogeneous batches, each tagged with its source
    #[serde(default)]
    pub batches: Vec<RawBatch>,
    /// Mixed-source records tagged individually; each one is its own batch
    #[serde(default)]
    pub tagged: Vec<TaggedActivity>,
    /// Record selection
    #[serde(default)]
    pub filters: AnalysisFilters,
    /// Reference time for date defaults and the report timestamp
    pub now: DateTime<Utc>,
}

impl AnalysisRequest {
    /// Empty request evaluated at `now`
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            batches: Vec::new(),
            tagged: Vec::new(),
            filters: AnalysisFilters::default(),
            now,
        }
    }

    /// Add a homogeneous batch
    #[must_use]
    pub fn with_batch(mut self, batch: RawBatch) -> Self {
        self.batches.push(batch);
        self
    }

    /// Add individually tagged records
    #[must_use]
    pub fn with_tagged(mut self, activities: Vec<TaggedActivity>) -> Self {
        self.tagged.extend(activities);
        self
    }

    /// Replace the filters
    #[must_use]
    pub fn with_filters(mut self, filters: AnalysisFilters) -> Self {
        self.filters = filters;
        self
    }
}

/// A batch excluded from the pass because its source tag is unknown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedBatch {
    /// Position of the batch in the request; tagged records follow the
    /// homogeneous batches, one position each
    pub batch_index: usize,
    /// Tag as supplied
    pub source_tag: String,
    /// Why the batch was rejected
    pub error: SchemaError,
}

/// Date range actually applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedDateRange {
    /// First date kept, `None` when there were no records
    pub start_date: Option<NaiveDate>,
    /// Last date kept
    pub end_date: NaiveDate,
}

/// Everything one pass produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// The request's `now`
    pub generated_at: DateTime<Utc>,
    /// Filtered records in chronological order
    pub records: Vec<ActivityRecord>,
    /// Records dropped for lack of a start time
    pub dropped: Vec<MissingTimestampError>,
    /// Number of dropped records
    pub dropped_count: usize,
    /// Batches excluded for an unknown source tag
    pub rejected_batches: Vec<RejectedBatch>,
    /// Distinct kinds among all normalized records, before filtering
    pub available_kinds: Vec<ActivityKind>,
    /// Kind filter applied, `None` for all kinds
    pub activity_kind: Option<ActivityKind>,
    /// Date range applied
    pub date_range: AppliedDateRange,
    /// Totals and mean pace of the filtered records
    pub overview: OverviewStats,
    /// Pace distribution of the filtered records
    pub pace_distribution: Vec<PaceBin>,
    /// ISO-week buckets of the filtered records
    pub weekly_summary: Vec<WeeklyBucket>,
    /// Per-record ACWR, aligned with `records`
    pub acwr: Vec<AcwrPoint>,
    /// Aggregate ACWR view
    pub acwr_summary: AcwrSummary,
    /// Weekly distance forecast
    pub forecast: ForecastOutcome,
}

/// Everything except the forecast, which may run on another thread
struct PreparedAnalysis {
    generated_at: DateTime<Utc>,
    normalized: NormalizedBatch,
    rejected_batches: Vec<RejectedBatch>,
    available_kinds: Vec<ActivityKind>,
    activity_kind: Option<ActivityKind>,
    date_range: AppliedDateRange,
    overview: OverviewStats,
    pace_distribution: Vec<PaceBin>,
    weekly_summary: Vec<WeeklyBucket>,
    weekly_series: Vec<WeeklyPoint>,
    acwr: Vec<AcwrPoint>,
    acwr_summary: AcwrSummary,
}

/// Runs analysis passes with a fixed configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisEngine {
    config: EngineConfig,
}

impl AnalysisEngine {
    /// Engine with the given configuration
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the pass synchronously, forecast included
    #[must_use]
    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisReport {
        let prepared = self.prepare(request);
        let forecast = ForecastEngine::new().forecast(&prepared.weekly_series);
        Self::finish(prepared, forecast)
    }

    /// Run the pass with the forecast step bounded by `timeout`
    ///
    /// The forecast runs on the blocking pool. When the deadline elapses the
    /// report carries `ForecastUnavailable::TimedOut` and everything else is
    /// unaffected.
    pub async fn analyze_with_forecast_timeout(
        &self,
        request: &AnalysisRequest,
        timeout: Duration,
    ) -> AnalysisReport {
        let prepared = self.prepare(request);
        let series = prepared.weekly_series.clone();
        let handle = task::spawn_blocking(move || ForecastEngine::new().forecast(&series));

        let forecast = match time::timeout(timeout, handle).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(join_error)) => ForecastOutcome::unavailable(ForecastUnavailable::TaskFailed {
                reason: join_error.to_string(),
            }),
            Err(_) => ForecastOutcome::unavailable(ForecastUnavailable::TimedOut {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        };
        Self::finish(prepared, forecast)
    }

    /// Run the pass, applying the configured forecast timeout when one is set
    pub async fn analyze_configured(&self, request: &AnalysisRequest) -> AnalysisReport {
        match self.config.forecast_timeout_ms {
            Some(ms) => {
                self.analyze_with_forecast_timeout(request, Duration::from_millis(ms))
                    .await
            }
            None => self.analyze(request),
        }
    }

    fn prepare(&self, request: &AnalysisRequest) -> PreparedAnalysis {
        let (mut normalized, rejected_batches) = normalize_request(request);
        AnalysisLogger::log_records_dropped(normalized.dropped_count());

        let mut available_kinds: Vec<ActivityKind> = normalized
            .records
            .iter()
            .map(|r| r.activity_kind().clone())
            .collect();
        available_kinds.sort();
        available_kinds.dedup();

        let date_range = AppliedDateRange {
            start_date: request.filters.start_date.or_else(|| {
                normalized
                    .records
                    .iter()
                    .map(|r| r.start_time().date_naive())
                    .min()
            }),
            end_date: request.filters.end_date.unwrap_or_else(|| {
                normalized
                    .records
                    .iter()
                    .map(|r| r.start_time().date_naive())
                    .max()
                    .unwrap_or_else(|| request.now.date_naive())
            }),
        };

        let mut records = mem::take(&mut normalized.records);
        records.retain(|record| {
            let date = record.start_time().date_naive();
            let kind_matches = match &request.filters.activity_kind {
                Some(kind) => record.activity_kind() == kind,
                None => true,
            };
            let after_start = match date_range.start_date {
                Some(start) => date >= start,
                None => true,
            };
            kind_matches && after_start && date <= date_range.end_date
        });
        records.sort_by_key(ActivityRecord::start_time);
        debug!(kept = records.len(), "Applied analysis filters");

        let calculator =
            TrainingLoadCalculator::with_windows(self.config.windows.acute, self.config.windows.chronic);
        let acwr = acwr::classify_points(&calculator.compute_load_windows(&records));
        let acwr_summary = acwr::summarize(&acwr);

        PreparedAnalysis {
            generated_at: request.now,
            overview: statistics::overview(&records),
            pace_distribution: statistics::pace_histogram(&records, self.config.pace_bins),
            weekly_summary: weekly::weekly_summary(&records),
            weekly_series: weekly::weekly_distance_series(&records),
            normalized: NormalizedBatch {
                records,
                dropped: normalized.dropped,
            },
            rejected_batches,
            available_kinds,
            activity_kind: request.filters.activity_kind.clone(),
            date_range,
            acwr,
            acwr_summary,
        }
    }

    fn finish(prepared: PreparedAnalysis, forecast: ForecastOutcome) -> AnalysisReport {
        AnalysisLogger::log_analysis_completed(
            prepared.normalized.records.len(),
            prepared.weekly_summary.len(),
            forecast.is_available(),
        );
        let dropped_count = prepared.normalized.dropped_count();
        AnalysisReport {
            generated_at: prepared.generated_at,
            records: prepared.normalized.records,
            dropped: prepared.normalized.dropped,
            dropped_count,
            rejected_batches: prepared.rejected_batches,
            available_kinds: prepared.available_kinds,
            activity_kind: prepared.activity_kind,
            date_range: prepared.date_range,
            overview: prepared.overview,
            pace_distribution: prepared.pace_distribution,
            weekly_summary: prepared.weekly_summary,
            acwr: prepared.acwr,
            acwr_summary: prepared.acwr_summary,
            forecast,
        }
    }
}

/// Normalize every batch; a rejected batch does not stop the others
fn normalize_request(request: &AnalysisRequest) -> (NormalizedBatch, Vec<RejectedBatch>) {
    let mut normalized = NormalizedBatch::default();
    let mut rejected = Vec::new();

    let mut reject = |batch_index: usize, source_tag: &str, error: SchemaError| {
        AnalysisLogger::log_batch_rejected(batch_index, source_tag, &error.to_string());
        rejected.push(RejectedBatch {
            batch_index,
            source_tag: source_tag.to_owned(),
            error,
        });
    };

    for (batch_index, batch) in request.batches.iter().enumerate() {
        match normalize_batch(batch) {
            Ok(result) => normalized.extend(result),
            Err(error) => reject(batch_index, &batch.source, error),
        }
    }

    let tagged = normalize_tagged(&request.tagged);
    normalized.extend(tagged.normalized);
    for rejection in tagged.rejected {
        reject(
            request.batches.len() + rejection.position,
            &rejection.source_tag,
            rejection.error,
        );
    }

    (normalized, rejected)
}

/// Run a pass with the default configuration
#[must_use]
pub fn analyze(request: &AnalysisRequest) -> AnalysisReport {
    AnalysisEngine::default().analyze(request)
}
