// ABOUTME: Unified error handling with error codes and the engine's domain errors
// ABOUTME: Defines SchemaError, MissingTimestampError, ForecastUnavailable and AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Handling
//!
//! Two layers:
//!
//! - Domain errors raised by the engine itself. `SchemaError` is fatal to one
//!   batch, `MissingTimestampError` drops a single record, and
//!   `ForecastUnavailable` is a reportable outcome rather than a failure.
//! - `AppError` with a stable `ErrorCode` for the outer layers (analysis pass,
//!   configuration, command-line adapter).

use std::error::Error as StdError;
use std::{fmt, io};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::SourceProvider;

/// Standard error codes used by the outer layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Malformed input value or document
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// Source tag that names no known provider schema
    #[serde(rename = "UNKNOWN_SOURCE")]
    UnknownSource,
    /// Configuration value rejected by validation
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid,
    /// Reading or writing an input/output document failed
    #[serde(rename = "IO_ERROR")]
    IoError,
    /// JSON/CSV (de)serialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::UnknownSource => "The activity source is not recognized",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::IoError => "Reading or writing data failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the outer layers
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// I/O failure
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IoError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl From<SchemaError> for AppError {
    fn from(error: SchemaError) -> Self {
        Self::new(ErrorCode::UnknownSource, error.to_string()).with_source(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::io(error.to_string()).with_source(error)
    }
}

/// Source tag does not name a known provider schema
///
/// Fatal to the batch carrying the tag; other batches are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaError {
    /// The tag matched none of the provider names or aliases
    #[error("unrecognized source tag '{tag}' (expected one of: strava, apple_health)")]
    UnknownSource {
        /// Tag exactly as supplied
        tag: String,
    },
}

/// A record carried no parseable start timestamp and was dropped
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("record {index} from {provider} has no resolvable start time (looked at: {})", .fields.join(", "))]
pub struct MissingTimestampError {
    /// Position of the record inside its batch
    pub index: usize,
    /// Provider whose schema was applied
    pub provider: SourceProvider,
    /// Timestamp fields that were looked up, in priority order
    pub fields: &'static [&'static str],
}

/// Why no forecast could be produced
///
/// Reported inside the analysis output, never raised out of the pass.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForecastUnavailable {
    /// Too few weekly buckets to attempt a fit
    #[error("insufficient data: {available} weekly buckets available, at least {required} required")]
    InsufficientData {
        /// Weekly buckets in the series
        available: usize,
        /// Minimum number of weekly buckets
        required: usize,
    },
    /// Series cannot identify the model (constant, all zero, non-finite)
    #[error("degenerate series: {reason}")]
    DegenerateSeries {
        /// What made the series unusable
        reason: String,
    },
    /// Parameter search did not settle within its iteration budget
    #[error("model fit did not converge after {iterations} iterations")]
    NonConvergence {
        /// Iterations spent before giving up
        iterations: usize,
    },
    /// Caller-imposed deadline elapsed
    #[error("forecast timed out after {timeout_ms} ms")]
    TimedOut {
        /// Deadline in milliseconds
        timeout_ms: u64,
    },
    /// Background forecast task failed to complete
    #[error("forecast task failed: {reason}")]
    TaskFailed {
        /// Join failure description
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_pick_matching_code() {
        let schema = AppError::from(SchemaError::UnknownSource {
            tag: "garmin".to_owned(),
        });
        assert_eq!(schema.code, ErrorCode::UnknownSource);
        assert!(schema.source.is_some());

        let io = AppError::from(io::Error::other("disk gone"));
        assert_eq!(io.code, ErrorCode::IoError);
        assert!(io.to_string().starts_with(ErrorCode::IoError.description()));
    }

    #[test]
    fn test_error_codes_serialize_screaming_snake() {
        let codes = [
            ErrorCode::InvalidInput,
            ErrorCode::UnknownSource,
            ErrorCode::ConfigInvalid,
            ErrorCode::IoError,
            ErrorCode::SerializationError,
        ];
        let names: Vec<String> = codes
            .iter()
            .map(|code| serde_json::to_string(code).unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "\"INVALID_INPUT\"",
                "\"UNKNOWN_SOURCE\"",
                "\"CONFIG_INVALID\"",
                "\"IO_ERROR\"",
                "\"SERIALIZATION_ERROR\"",
            ]
        );
    }
}
