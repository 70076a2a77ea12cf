// ABOUTME: Runtime configuration for the analysis pass with environment overrides
// ABOUTME: Load windows, forecast timeout and pace histogram bins, validated on load
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Engine Configuration
//!
//! Defaults reproduce the fixed 7/28 record windows. ACWR zone thresholds,
//! the minimum forecast history and the forecast horizon are constants in
//! `loadwise_core::constants` and are not configurable.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `LOADWISE_ACUTE_WINDOW` | `windows.acute` |
//! | `LOADWISE_CHRONIC_WINDOW` | `windows.chronic` |
//! | `LOADWISE_FORECAST_TIMEOUT_MS` | `forecast_timeout_ms` |
//! | `LOADWISE_PACE_BINS` | `pace_bins` |

/// Configuration error types
pub mod error;

pub use error::ConfigError;

use std::env;
use std::str::FromStr;

use loadwise_analytics::LoadWindows;
use loadwise_core::constants::pace::DEFAULT_HISTOGRAM_BINS;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Acute window override
pub const ENV_ACUTE_WINDOW: &str = "LOADWISE_ACUTE_WINDOW";
/// Chronic window override
pub const ENV_CHRONIC_WINDOW: &str = "LOADWISE_CHRONIC_WINDOW";
/// Forecast timeout override, milliseconds
pub const ENV_FORECAST_TIMEOUT_MS: &str = "LOADWISE_FORECAST_TIMEOUT_MS";
/// Pace histogram bins override
pub const ENV_PACE_BINS: &str = "LOADWISE_PACE_BINS";

/// Settings for one analysis pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Rolling window sizes in same-kind records
    pub windows: LoadWindows,
    /// Deadline for the forecast step; `None` runs it without a deadline
    pub forecast_timeout_ms: Option<u64>,
    /// Bins in the pace distribution
    pub pace_bins: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            windows: LoadWindows::default(),
            forecast_timeout_ms: None,
            pace_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl EngineConfig {
    /// Defaults with environment overrides applied, then validated
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when an override does not parse or the resulting
    /// configuration is invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        debug!(?config, "Engine configuration loaded");
        Ok(config)
    }

    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}: '{val}'")))?;
        }
        Ok(())
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var(ENV_ACUTE_WINDOW, &mut self.windows.acute)?;
        Self::apply_env_var(ENV_CHRONIC_WINDOW, &mut self.windows.chronic)?;
        Self::apply_env_var(ENV_PACE_BINS, &mut self.pace_bins)?;

        let mut timeout_ms = 0_u64;
        if env::var(ENV_FORECAST_TIMEOUT_MS).is_ok() {
            Self::apply_env_var(ENV_FORECAST_TIMEOUT_MS, &mut timeout_ms)?;
            self.forecast_timeout_ms = Some(timeout_ms);
        }
        Ok(self)
    }

    /// Check internal consistency
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for a zero acute window, a chronic window shorter
    /// than the acute one, zero histogram bins or a zero timeout
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.windows.acute == 0 {
            return Err(ConfigError::ValueOutOfRange("acute window must be at least 1"));
        }
        if self.windows.chronic < self.windows.acute {
            return Err(ConfigError::InvalidRange(
                "chronic window must be at least as long as the acute window",
            ));
        }
        if self.pace_bins == 0 {
            return Err(ConfigError::ValueOutOfRange("pace histogram needs at least 1 bin"));
        }
        if self.forecast_timeout_ms == Some(0) {
            return Err(ConfigError::ValueOutOfRange("forecast timeout must be positive"));
        }
        Ok(())
    }
}
