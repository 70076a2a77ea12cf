// ABOUTME: Weekly distance forecasting with dated projections and 95% prediction intervals
// ABOUTME: Failures become a non-fatal unavailable outcome carrying the cause
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod arima;

pub use arima::{Arima111, Projection, MAX_ITERATIONS};

use chrono::{DateTime, Duration, Utc};
use loadwise_core::constants::forecast::{HORIZON_WEEKS, INTERVAL_Z_95, MIN_WEEKLY_BUCKETS};
use loadwise_core::constants::units::DAYS_PER_WEEK;
use loadwise_core::errors::ForecastUnavailable;
use serde::Serialize;
use tracing::info;

use crate::weekly::WeeklyPoint;

/// Projected distance for one future week
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Monday 00:00 UTC opening the projected week
    pub week_start: DateTime<Utc>,
    /// Point projection, floored at zero
    pub projected_distance_km: f64,
    /// Lower 95% bound, floored at zero
    pub lower_95_km: f64,
    /// Upper 95% bound
    pub upper_95_km: f64,
}

/// Fitted model and its projections
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyForecast {
    /// Fitted parameters
    pub model: Arima111,
    /// One entry per projected week, in date order
    pub points: Vec<ForecastPoint>,
}

/// Result of the forecast step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastOutcome {
    /// Model fitted and projected
    Available(WeeklyForecast),
    /// No projection could be made
    Unavailable {
        /// Machine-readable cause
        reason: ForecastUnavailable,
        /// Human-readable cause
        message: String,
    },
}

impl ForecastOutcome {
    /// Wrap an unavailability cause
    #[must_use]
    pub fn unavailable(reason: ForecastUnavailable) -> Self {
        let message = reason.to_string();
        Self::Unavailable { reason, message }
    }

    /// Projected weeks, empty when unavailable
    #[must_use]
    pub fn points(&self) -> &[ForecastPoint] {
        match self {
            Self::Available(forecast) => &forecast.points,
            Self::Unavailable { .. } => &[],
        }
    }

    /// Whether a projection was produced
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// Weekly distance forecaster
#[derive(Debug, Clone, Copy)]
pub struct ForecastEngine {
    horizon_weeks: usize,
    min_weeks: usize,
    max_iterations: usize,
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastEngine {
    /// Engine with the standard 12-week horizon and 10-week minimum
    #[must_use]
    pub const fn new() -> Self {
        Self {
            horizon_weeks: HORIZON_WEEKS,
            min_weeks: MIN_WEEKLY_BUCKETS,
            max_iterations: MAX_ITERATIONS,
        }
    }

    /// Same engine with a different refinement budget for the fit
    #[must_use]
    pub const fn with_iteration_budget(self, max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    /// Fit ARIMA(1,1,1) to the weekly series and project forward
    #[must_use]
    pub fn forecast(&self, series: &[WeeklyPoint]) -> ForecastOutcome {
        let outcome = self.try_forecast(series);
        match &outcome {
            ForecastOutcome::Available(forecast) => info!(
                weeks = series.len(),
                ar = forecast.model.ar,
                ma = forecast.model.ma,
                "Weekly distance forecast available"
            ),
            ForecastOutcome::Unavailable { message, .. } => info!(
                weeks = series.len(),
                reason = %message,
                "Weekly distance forecast unavailable"
            ),
        }
        outcome
    }

    fn try_forecast(&self, series: &[WeeklyPoint]) -> ForecastOutcome {
        let last_week = match series.last() {
            Some(last) if series.len() >= self.min_weeks => last.week_start,
            _ => {
                return ForecastOutcome::unavailable(ForecastUnavailable::InsufficientData {
                    available: series.len(),
                    required: self.min_weeks,
                })
            }
        };

        let values: Vec<f64> = series.iter().map(|p| p.distance_km).collect();
        let model = match Arima111::fit_with_budget(&values, self.max_iterations) {
            Ok(model) => model,
            Err(reason) => return ForecastOutcome::unavailable(reason),
        };

        let points: Option<Vec<ForecastPoint>> = model
            .forecast(self.horizon_weeks)
            .into_iter()
            .zip(1_i64..)
            .map(|(projection, weeks_ahead)| {
                let week_start = last_week
                    .checked_add_signed(Duration::days(DAYS_PER_WEEK * weeks_ahead))?;
                let half_width = INTERVAL_Z_95 * projection.standard_error;
                Some(ForecastPoint {
                    week_start,
                    projected_distance_km: projection.level.max(0.0),
                    lower_95_km: (projection.level - half_width).max(0.0),
                    upper_95_km: (projection.level + half_width).max(0.0),
                })
            })
            .collect();

        match points {
            Some(points) => ForecastOutcome::Available(WeeklyForecast { model, points }),
            None => ForecastOutcome::unavailable(ForecastUnavailable::DegenerateSeries {
                reason: "projected weeks fall outside the representable date range".to_owned(),
            }),
        }
    }
}

/// Forecast weekly distance with the standard engine
#[must_use]
pub fn forecast_weekly_distance(series: &[WeeklyPoint]) -> ForecastOutcome {
    ForecastEngine::new().forecast(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn series(distances: &[f64]) -> Vec<WeeklyPoint> {
        let first = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        distances
            .iter()
            .zip(0_i64..)
            .map(|(&distance_km, week)| WeeklyPoint {
                week_start: first + Duration::days(7 * week),
                distance_km,
            })
            .collect()
    }

    const TEN_WEEKS: [f64; 10] = [20.0, 24.0, 18.0, 30.0, 26.0, 33.0, 28.0, 35.0, 31.0, 38.0];

    #[test]
    fn test_nine_weeks_insufficient() {
        let outcome = forecast_weekly_distance(&series(&TEN_WEEKS[..9]));
        assert_eq!(
            outcome,
            ForecastOutcome::unavailable(ForecastUnavailable::InsufficientData {
                available: 9,
                required: 10
            })
        );
    }

    #[test]
    fn test_ten_weeks_projects_twelve_dated_weeks() {
        let input = series(&TEN_WEEKS);
        let outcome = forecast_weekly_distance(&input);
        let points = outcome.points();
        assert_eq!(points.len(), 12);

        let last = input.last().unwrap().week_start;
        assert_eq!(points[0].week_start, last + Duration::days(7));
        assert_eq!(points[11].week_start, last + Duration::days(84));
        for point in points {
            assert!(point.lower_95_km <= point.projected_distance_km);
            assert!(point.projected_distance_km <= point.upper_95_km);
            assert!(point.lower_95_km >= 0.0);
        }
    }

    #[test]
    fn test_all_zero_distance_unavailable() {
        let outcome = forecast_weekly_distance(&series(&[0.0; 12]));
        assert!(matches!(
            outcome,
            ForecastOutcome::Unavailable {
                reason: ForecastUnavailable::DegenerateSeries { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_exhausted_budget_is_unavailable() {
        let outcome = ForecastEngine::new()
            .with_iteration_budget(1)
            .forecast(&series(&TEN_WEEKS));
        assert_eq!(
            outcome,
            ForecastOutcome::unavailable(ForecastUnavailable::NonConvergence { iterations: 1 })
        );
    }

    #[test]
    fn test_projection_past_calendar_end_is_unavailable() {
        let last = DateTime::<Utc>::MAX_UTC - Duration::days(3);
        let input: Vec<WeeklyPoint> = TEN_WEEKS
            .iter()
            .zip((0_i64..10).rev())
            .map(|(&distance_km, back)| WeeklyPoint {
                week_start: last - Duration::days(7 * back),
                distance_km,
            })
            .collect();
        assert!(matches!(
            forecast_weekly_distance(&input),
            ForecastOutcome::Unavailable {
                reason: ForecastUnavailable::DegenerateSeries { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_unavailable_serializes_with_status() {
        let json = serde_json::to_value(forecast_weekly_distance(&[])).unwrap();
        assert_eq!(json["status"], "unavailable");
        assert_eq!(json["reason"]["kind"], "insufficient_data");
    }
}
