// ABOUTME: Metric sentinel type distinguishing defined values from undefined ratios
// ABOUTME: Replaces NaN/Infinity as the carrier of "undefined" for pace and ACWR
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

/// A derived numeric value that may be undefined
///
/// Produced by every division in the engine whose denominator can be zero.
/// `Undefined` is a first-class value: it serializes as `null`, is skipped by
/// [`Metric::mean`], and is never coerced to `0.0`. A `Defined` value is
/// always finite.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Metric {
    /// Finite numeric value
    Defined(f64),
    /// Denominator was zero or an input was not a finite number
    #[default]
    Undefined,
}

impl Metric {
    /// Wrap a value, mapping NaN and infinities to `Undefined`
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Self::Defined(value)
        } else {
            Self::Undefined
        }
    }

    /// Divide `numerator` by `denominator`
    ///
    /// Undefined when the denominator is zero or when either operand or the
    /// quotient is not finite.
    #[must_use]
    pub fn ratio(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
            return Self::Undefined;
        }
        Self::from_f64(numerator / denominator)
    }

    /// Returns the value when defined
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Defined(v) => Some(v),
            Self::Undefined => None,
        }
    }

    /// Whether the metric carries a value
    #[must_use]
    pub const fn is_defined(self) -> bool {
        matches!(self, Self::Defined(_))
    }

    /// Arithmetic mean of the defined metrics, ignoring undefined ones
    ///
    /// Undefined when no metric in the input is defined.
    #[must_use]
    pub fn mean<I>(metrics: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let (sum, count) = metrics
            .into_iter()
            .filter_map(Self::value)
            .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1));

        if count == 0 {
            return Self::Undefined;
        }
        Self::ratio(sum, count as f64)
    }
}

impl From<Option<f64>> for Metric {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Undefined, Self::from_f64)
    }
}

impl From<Metric> for Option<f64> {
    fn from(metric: Metric) -> Self {
        metric.value()
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined(v) => write!(f, "{v:.2}"),
            Self::Undefined => f.write_str("undefined"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_with_zero_denominator_is_undefined() {
        assert_eq!(Metric::ratio(30.0, 0.0), Metric::Undefined);
        assert_eq!(Metric::ratio(0.0, 0.0), Metric::Undefined);
    }

    #[test]
    fn test_ratio_rejects_non_finite_operands() {
        assert_eq!(Metric::ratio(f64::NAN, 2.0), Metric::Undefined);
        assert_eq!(Metric::ratio(1.0, f64::INFINITY), Metric::Undefined);
    }

    #[test]
    fn test_mean_skips_undefined() {
        let mean = Metric::mean([
            Metric::Defined(1.0),
            Metric::Undefined,
            Metric::Defined(2.0),
        ]);
        assert_eq!(mean, Metric::Defined(1.5));
        assert_eq!(Metric::mean([Metric::Undefined]), Metric::Undefined);
    }

    #[test]
    fn test_serializes_undefined_as_null() {
        let json = serde_json::to_string(&[Metric::Defined(6.0), Metric::Undefined]).unwrap();
        assert_eq!(json, "[6.0,null]");

        let back: Vec<Metric> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Metric::Defined(6.0), Metric::Undefined]);
    }
}
