// ABOUTME: Field-mapping tables describing where each provider stores activity data
// ABOUTME: Resolves primary/fallback field names against a raw activity dictionary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use loadwise_core::models::SourceProvider;
use serde_json::{Map, Value};

use crate::{apple_health, strava};

/// Field names a provider uses for the values the engine needs
///
/// Multi-name entries are in priority order: the first name whose key is
/// present wins, even when its value is zero, `null` or unparseable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMap {
    /// Field carrying the provider activity code
    pub activity_type: &'static str,
    /// Duration fields, in seconds
    pub duration_seconds: &'static [&'static str],
    /// Distance fields, in meters
    pub distance_meters: &'static [&'static str],
    /// Start timestamp fields
    pub start_time: &'static [&'static str],
}

impl FieldMap {
    /// Value of the first duration field present on the record
    #[must_use]
    pub fn duration<'a>(&self, fields: &'a Map<String, Value>) -> Option<&'a Value> {
        first_present(fields, self.duration_seconds)
    }

    /// Value of the first distance field present on the record
    #[must_use]
    pub fn distance<'a>(&self, fields: &'a Map<String, Value>) -> Option<&'a Value> {
        first_present(fields, self.distance_meters)
    }
}

/// Field-mapping table for a provider
#[must_use]
pub fn field_map(provider: SourceProvider) -> &'static FieldMap {
    match provider {
        SourceProvider::Strava => &strava::FIELDS,
        SourceProvider::AppleHealth => &apple_health::FIELDS,
    }
}

/// Fallback only applies when the key is missing, not when it is falsy
fn first_present<'a>(fields: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| fields.get(*name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_zero_primary_blocks_fallback() {
        let raw = fields(json!({"moving_time": 0, "elapsed_time": 3600}));
        let map = field_map(SourceProvider::Strava);
        assert_eq!(map.duration(&raw), Some(&json!(0)));
    }

    #[test]
    fn test_absent_primary_uses_fallback() {
        let raw = fields(json!({"elapsed_time": 3600}));
        let map = field_map(SourceProvider::Strava);
        assert_eq!(map.duration(&raw), Some(&json!(3600)));
    }

    #[test]
    fn test_null_primary_blocks_fallback() {
        let raw = fields(json!({"moving_time": null, "elapsed_time": 3600}));
        let map = field_map(SourceProvider::Strava);
        assert_eq!(map.duration(&raw), Some(&Value::Null));
    }
}
