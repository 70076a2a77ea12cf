// ABOUTME: Canonical activity kind with passthrough for unmapped provider codes
// ABOUTME: Maps Strava and Apple Health activity vocabularies onto one label set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Canonical activity kind
///
/// The closed set covers every activity the provider vocabularies map onto.
/// Codes with no mapping are kept verbatim in `Unmapped` so no information is
/// lost; `Unknown` is reserved for records that carry no activity code at all.
///
/// Identity, ordering and hashing all follow [`ActivityKind::label`], so an
/// `Unmapped` value never splits a canonical group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityKind {
    /// Running
    Running,
    /// Walking
    Walking,
    /// Cycling
    Cycling,
    /// Swimming
    Swimming,
    /// Climbing
    Climbing,
    /// Functional strength training
    FunctionalStrength,
    /// Traditional strength training
    TraditionalStrength,
    /// Provider explicitly reported an "other" workout
    Other,
    /// No activity code on the record
    Unknown,
    /// Provider code with no canonical mapping, kept verbatim
    Unmapped(String),
}

impl ActivityKind {
    /// Map a provider activity code onto a canonical kind
    ///
    /// Lookup misses pass the code through unchanged. Blank codes carry no
    /// information and map to `Unknown`, so a kind label is never empty.
    #[must_use]
    pub fn from_source_code(code: &str) -> Self {
        let code = code.trim();
        if code.is_empty() {
            return Self::Unknown;
        }

        match code {
            "Run" | "Running" | "HKWorkoutActivityTypeRunning" => Self::Running,
            "Walk" | "Walking" | "HKWorkoutActivityTypeWalking" => Self::Walking,
            "Ride" | "Cycling" | "HKWorkoutActivityTypeCycling" => Self::Cycling,
            "Swim" | "Swimming" | "HKWorkoutActivityTypeSwimming" => Self::Swimming,
            "HKWorkoutActivityTypeClimbing" => Self::Climbing,
            "HKWorkoutActivityTypeFunctionalStrengthTraining" => Self::FunctionalStrength,
            "HKWorkoutActivityTypeTraditionalStrengthTraining" => Self::TraditionalStrength,
            "HKWorkoutActivityTypeOther" => Self::Other,
            other => Self::from_label(other),
        }
    }

    /// Parse a canonical label, keeping anything else as `Unmapped`
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Running" => Self::Running,
            "Walking" => Self::Walking,
            "Cycling" => Self::Cycling,
            "Swimming" => Self::Swimming,
            "Climbing" => Self::Climbing,
            "Functional Strength" => Self::FunctionalStrength,
            "Traditional Strength" => Self::TraditionalStrength,
            "Other" => Self::Other,
            "Unknown" | "" => Self::Unknown,
            other => Self::Unmapped(other.to_owned()),
        }
    }

    /// Display label, also the grouping key
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Running => "Running",
            Self::Walking => "Walking",
            Self::Cycling => "Cycling",
            Self::Swimming => "Swimming",
            Self::Climbing => "Climbing",
            Self::FunctionalStrength => "Functional Strength",
            Self::TraditionalStrength => "Traditional Strength",
            Self::Other => "Other",
            Self::Unknown => "Unknown",
            Self::Unmapped(code) => code,
        }
    }

    /// Whether the kind came from the canonical vocabulary
    #[must_use]
    pub const fn is_canonical(&self) -> bool {
        !matches!(self, Self::Unmapped(_))
    }
}

impl PartialEq for ActivityKind {
    fn eq(&self, other: &Self) -> bool {
        self.label() == other.label()
    }
}

impl Eq for ActivityKind {}

impl Hash for ActivityKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label().hash(state);
    }
}

impl PartialOrd for ActivityKind {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ActivityKind {
    fn cmp(&self, other: &Self) -> Ordering {
        self.label().cmp(other.label())
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for ActivityKind {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<ActivityKind> for String {
    fn from(kind: ActivityKind) -> Self {
        kind.label().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strava_and_healthkit_codes_share_kinds() {
        assert_eq!(ActivityKind::from_source_code("Run"), ActivityKind::Running);
        assert_eq!(
            ActivityKind::from_source_code("HKWorkoutActivityTypeRunning"),
            ActivityKind::Running
        );
        assert_eq!(ActivityKind::from_source_code("Ride"), ActivityKind::Cycling);
        assert_eq!(
            ActivityKind::from_source_code("HKWorkoutActivityTypeFunctionalStrengthTraining"),
            ActivityKind::FunctionalStrength
        );
    }

    #[test]
    fn test_unmapped_code_passes_through() {
        let kind = ActivityKind::from_source_code("Kitesurf");
        assert_eq!(kind, ActivityKind::Unmapped("Kitesurf".into()));
        assert_eq!(kind.label(), "Kitesurf");
        assert!(!kind.is_canonical());
    }

    #[test]
    fn test_blank_code_is_unknown() {
        assert_eq!(ActivityKind::from_source_code("   "), ActivityKind::Unknown);
    }

    #[test]
    fn test_unmapped_with_canonical_label_equals_canonical() {
        assert_eq!(
            ActivityKind::Unmapped("Cycling".into()),
            ActivityKind::Cycling
        );
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&ActivityKind::TraditionalStrength).unwrap();
        assert_eq!(json, "\"Traditional Strength\"");
        let back: ActivityKind = serde_json::from_str("\"Yoga\"").unwrap();
        assert_eq!(back, ActivityKind::Unmapped("Yoga".into()));
    }
}
