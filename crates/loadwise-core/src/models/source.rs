// ABOUTME: Provenance tag identifying which provider schema produced a record
// ABOUTME: Parses source tags and rejects unknown providers with SchemaError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SchemaError;

/// Activity data provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceProvider {
    /// Strava activities API export
    Strava,
    /// Apple Health workout export
    AppleHealth,
}

impl SourceProvider {
    /// Canonical tag
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strava => "strava",
            Self::AppleHealth => "apple_health",
        }
    }
}

impl fmt::Display for SourceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceProvider {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strava" => Ok(Self::Strava),
            "apple_health" | "apple-health" | "applehealth" | "healthkit" => Ok(Self::AppleHealth),
            _ => Err(SchemaError::UnknownSource { tag: s.to_owned() }),
        }
    }
}
