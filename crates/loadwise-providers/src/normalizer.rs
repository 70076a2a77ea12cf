// ABOUTME: Normalizes raw provider activity dictionaries into canonical ActivityRecords
// ABOUTME: Drops records without timestamps, rejects batches and records with unknown source tags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use loadwise_core::calculator::DerivedMetrics;
use loadwise_core::errors::{MissingTimestampError, SchemaError};
use loadwise_core::models::{ActivityKind, ActivityRecord, SourceProvider};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::fields::field_map;
use crate::timestamps::parse_timestamp_value;

/// One raw activity dictionary as delivered by an upstream reader
pub type RawFields = Map<String, Value>;

/// Homogeneous batch: every dictionary follows the schema named by `source`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBatch {
    /// Source tag, parsed into a [`SourceProvider`]
    pub source: String,
    /// Raw activity dictionaries
    pub activities: Vec<RawFields>,
}

impl RawBatch {
    /// Create a batch for a source tag
    #[must_use]
    pub fn new(source: impl Into<String>, activities: Vec<RawFields>) -> Self {
        Self {
            source: source.into(),
            activities,
        }
    }
}

/// Activity dictionary carrying its own source tag, for mixed-source input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedActivity {
    /// Source tag, parsed into a [`SourceProvider`]
    pub source: String,
    /// Raw activity fields
    pub fields: RawFields,
}

/// Outcome of normalizing one batch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedBatch {
    /// Records that normalized successfully, in input order
    pub records: Vec<ActivityRecord>,
    /// Records dropped for lack of a resolvable start time
    pub dropped: Vec<MissingTimestampError>,
}

impl NormalizedBatch {
    /// Number of dropped records
    #[must_use]
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    /// Append another batch's results
    pub fn extend(&mut self, other: Self) {
        self.records.extend(other.records);
        self.dropped.extend(other.dropped);
    }

    fn push(&mut self, result: Result<ActivityRecord, MissingTimestampError>) {
        match result {
            Ok(record) => self.records.push(record),
            Err(error) => {
                debug!(
                    record.index = error.index,
                    record.provider = %error.provider,
                    "Dropping record without start time"
                );
                self.dropped.push(error);
            }
        }
    }
}

/// Normalize a single raw activity under a provider schema
///
/// `index` is the record's position in its batch and is only used to make a
/// dropped record traceable.
///
/// # Errors
///
/// Returns `MissingTimestampError` when none of the provider's timestamp
/// fields holds a parseable date.
pub fn normalize_activity(
    provider: SourceProvider,
    index: usize,
    fields: &RawFields,
) -> Result<ActivityRecord, MissingTimestampError> {
    let map = field_map(provider);

    let start_time = map
        .start_time
        .iter()
        .filter_map(|name| fields.get(*name))
        .find_map(parse_timestamp_value)
        .ok_or(MissingTimestampError {
            index,
            provider,
            fields: map.start_time,
        })?;

    let activity_kind = match fields.get(map.activity_type) {
        None | Some(Value::Null) => ActivityKind::Unknown,
        Some(Value::String(code)) => ActivityKind::from_source_code(code),
        Some(other) => ActivityKind::from_source_code(&other.to_string()),
    };

    let metrics = DerivedMetrics::from_raw(map.duration(fields), map.distance(fields));

    Ok(ActivityRecord::from_metrics(
        activity_kind,
        start_time,
        metrics,
        provider,
        fields.clone(),
    ))
}

/// Normalize a homogeneous batch
///
/// # Errors
///
/// Returns `SchemaError` when the batch's source tag is not recognized. No
/// record of that batch is normalized in that case.
pub fn normalize_batch(batch: &RawBatch) -> Result<NormalizedBatch, SchemaError> {
    let provider: SourceProvider = batch.source.parse().inspect_err(|e| {
        warn!(source.tag = %batch.source, error = %e, "Rejecting batch");
    })?;

    let mut normalized = NormalizedBatch::default();
    for (index, fields) in batch.activities.iter().enumerate() {
        normalized.push(normalize_activity(provider, index, fields));
    }

    debug!(
        source.provider = %provider,
        records = normalized.records.len(),
        dropped = normalized.dropped_count(),
        "Normalized batch"
    );
    Ok(normalized)
}

/// A tagged record excluded because its source tag is unknown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedTag {
    /// Position of the record in the tagged collection
    pub position: usize,
    /// Tag as supplied
    pub source_tag: String,
    /// Parse failure for the tag
    pub error: SchemaError,
}

/// Outcome of normalizing a mixed-source collection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaggedOutcome {
    /// Records whose tag parsed, normalized or dropped as usual
    pub normalized: NormalizedBatch,
    /// Records whose tag did not parse
    pub rejected: Vec<RejectedTag>,
}

/// Normalize a mixed-source collection where each record carries its tag
///
/// Every dictionary is its own single-record batch, so an unknown tag only
/// excludes the record carrying it.
#[must_use]
pub fn normalize_tagged(activities: &[TaggedActivity]) -> TaggedOutcome {
    let mut outcome = TaggedOutcome::default();
    for (position, activity) in activities.iter().enumerate() {
        match activity.source.parse::<SourceProvider>() {
            Ok(provider) => outcome
                .normalized
                .push(normalize_activity(provider, position, &activity.fields)),
            Err(error) => {
                warn!(
                    source.tag = %activity.source,
                    record.position = position,
                    error = %error,
                    "Rejecting tagged record"
                );
                outcome.rejected.push(RejectedTag {
                    position,
                    source_tag: activity.source.clone(),
                    error,
                });
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadwise_core::Metric;
    use serde_json::json;

    fn raw(value: Value) -> RawFields {
        match value {
            Value::Object(map) => map,
            _ => RawFields::new(),
        }
    }

    #[test]
    fn test_owning_provider_decides_activity_field() {
        let fields = raw(json!({
            "type": "Ride",
            "workoutActivityType": "HKWorkoutActivityTypeRunning",
            "start_date": "2024-05-01T06:30:00Z",
            "startDate": "2024-05-01 06:30:00 +0000",
        }));

        let strava = normalize_activity(SourceProvider::Strava, 0, &fields).unwrap();
        assert_eq!(strava.activity_kind(), &ActivityKind::Cycling);

        let apple = normalize_activity(SourceProvider::AppleHealth, 0, &fields).unwrap();
        assert_eq!(apple.activity_kind(), &ActivityKind::Running);
    }

    #[test]
    fn test_missing_kind_key_is_unknown() {
        let fields = raw(json!({"start_date": "2024-05-01T06:30:00Z"}));
        let record = normalize_activity(SourceProvider::Strava, 0, &fields).unwrap();
        assert_eq!(record.activity_kind(), &ActivityKind::Unknown);
        assert_eq!(record.pace_min_per_km(), Metric::Undefined);
    }

    #[test]
    fn test_missing_timestamp_reports_fields() {
        let fields = raw(json!({"type": "Run", "start_date": "not a date"}));
        let err = normalize_activity(SourceProvider::Strava, 4, &fields).unwrap_err();
        assert_eq!(err.index, 4);
        assert_eq!(err.fields, &["start_date", "start_date_local"]);
    }

    #[test]
    fn test_unknown_tag_rejects_only_its_record() {
        let activities = vec![
            TaggedActivity {
                source: "strava".into(),
                fields: raw(json!({"start_date": "2024-05-01T06:30:00Z"})),
            },
            TaggedActivity {
                source: "polar".into(),
                fields: RawFields::new(),
            },
            TaggedActivity {
                source: "apple_health".into(),
                fields: raw(json!({"startDate": "2024-05-02 06:30:00 +0000"})),
            },
        ];
        let outcome = normalize_tagged(&activities);

        assert_eq!(outcome.normalized.records.len(), 2);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].position, 1);
        assert_eq!(outcome.rejected[0].source_tag, "polar");
    }
}
