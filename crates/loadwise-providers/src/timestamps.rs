// ABOUTME: Timestamp parsing for the date formats found in provider exports
// ABOUTME: Normalizes RFC 3339, Apple Health offsets, naive and date-only values to UTC
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use loadwise_core::constants::timestamps::{MAX_YEAR, MIN_YEAR};
use serde_json::Value;

/// Formats with an explicit numeric offset (`-0700`)
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// Formats without offset, read as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a provider timestamp string into UTC
///
/// Returns `None` for anything unparseable or dated outside
/// `MIN_YEAR..=MAX_YEAR`; callers treat that as a missing timestamp.
#[must_use]
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    parse_any_format(input).filter(|dt| (MIN_YEAR..=MAX_YEAR).contains(&dt.year()))
}

fn parse_any_format(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse a JSON value holding a timestamp string
#[must_use]
pub fn parse_timestamp_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parses_strava_iso_utc() {
        assert_eq!(
            parse_timestamp("2024-05-01T06:30:00Z"),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 6, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_parses_apple_health_offset() {
        assert_eq!(
            parse_timestamp("2024-05-01 07:12:44 -0700"),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 14, 12, 44).unwrap())
        );
    }

    #[test]
    fn test_naive_and_date_only_are_utc() {
        assert_eq!(
            parse_timestamp("2024-05-01 07:12:44"),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 7, 12, 44).unwrap())
        );
        assert_eq!(
            parse_timestamp("2024-05-01"),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp_value(&Value::from(1_714_545_000)), None);
    }

    #[test]
    fn test_rejects_years_outside_calendar_range() {
        assert_eq!(parse_timestamp("-262143-01-01"), None);
        assert_eq!(parse_timestamp("+262142-12-31"), None);
        assert_eq!(parse_timestamp("1899-12-31T23:59:59Z"), None);
        assert_eq!(parse_timestamp("10000-01-01"), None);
        assert_eq!(
            parse_timestamp("9999-12-31"),
            Some(Utc.with_ymd_and_hms(9999, 12, 31, 0, 0, 0).unwrap())
        );
    }
}
