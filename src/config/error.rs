// ABOUTME: Configuration error types for engine settings validation
// ABOUTME: Defines error variants for unparseable overrides and out-of-range values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration error types.

use loadwise_core::AppError;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Override value could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Two settings are inconsistent with each other
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Numeric value outside the valid range for the parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::config(error.to_string()).with_source(error)
    }
}
