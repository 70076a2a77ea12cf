// ABOUTME: ARIMA(1,1,1) fitted by conditional sum of squares over the differenced series
// ABOUTME: Grid search then compass refinement of (phi, theta) inside the unit square
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use loadwise_core::errors::ForecastUnavailable;
use serde::Serialize;
use tracing::debug;

/// Refinement iterations before the fit is declared non-convergent
pub const MAX_ITERATIONS: usize = 10_000;

/// Spacing of the coarse parameter grid
const GRID_STEP: f64 = 0.05;

/// Grid points on each side of zero (0.95 / 0.05)
const GRID_HALF_WIDTH: i32 = 19;

/// Parameters stay strictly inside (-1, 1) for stationarity and invertibility
const PARAM_BOUND: f64 = 0.99;

/// Refinement stops once the step shrinks below this
const STEP_TOLERANCE: f64 = 1e-6;

/// Observations needed to difference once and still have a lagged residual
const MIN_OBSERVATIONS: usize = 3;

/// Fitted ARIMA(1,1,1) without constant
///
/// The differenced series `d_t = y_t - y_{t-1}` follows
/// `d_t = phi * d_{t-1} + e_t + theta * e_{t-1}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arima111 {
    /// Autoregressive coefficient
    pub ar: f64,
    /// Moving-average coefficient
    pub ma: f64,
    /// Residual variance (SSE over effective observations)
    pub sigma2: f64,
    /// Refinement iterations used
    pub iterations: usize,
    #[serde(skip)]
    last_level: f64,
    #[serde(skip)]
    last_diff: f64,
    #[serde(skip)]
    last_residual: f64,
}

/// One projected step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Projected level of the original series
    pub level: f64,
    /// Standard error of the projection
    pub standard_error: f64,
}

impl Arima111 {
    /// Fit the model to a level series
    ///
    /// # Errors
    ///
    /// `DegenerateSeries` for non-finite, too short, all-zero or
    /// zero-variance (after differencing) input; `NonConvergence` when the
    /// refinement exhausts [`MAX_ITERATIONS`].
    pub fn fit(values: &[f64]) -> Result<Self, ForecastUnavailable> {
        Self::fit_with_budget(values, MAX_ITERATIONS)
    }

    /// Fit with an explicit refinement budget
    ///
    /// # Errors
    ///
    /// Same as [`Arima111::fit`], with `NonConvergence` raised once
    /// `max_iterations` refinement steps have been spent.
    pub fn fit_with_budget(
        values: &[f64],
        max_iterations: usize,
    ) -> Result<Self, ForecastUnavailable> {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(degenerate("series contains non-finite values"));
        }
        let Some(&last_level) = values.last() else {
            return Err(degenerate("series is empty"));
        };
        if values.len() < MIN_OBSERVATIONS {
            return Err(degenerate("at least 3 observations are needed"));
        }
        if values.iter().all(|v| *v == 0.0) {
            return Err(degenerate("every weekly distance is zero"));
        }

        let diffs: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
        if variance(&diffs) <= f64::EPSILON {
            return Err(degenerate("differenced series has zero variance"));
        }

        let (mut ar, mut ma, mut sse) = grid_search(&diffs);
        let mut step = GRID_STEP / 2.0;
        let mut iterations = 0;
        while step > STEP_TOLERANCE {
            if iterations >= max_iterations {
                return Err(ForecastUnavailable::NonConvergence { iterations });
            }
            iterations += 1;

            let mut moved = false;
            for (phi, theta) in [
                (ar + step, ma),
                (ar - step, ma),
                (ar, ma + step),
                (ar, ma - step),
            ] {
                if phi.abs() > PARAM_BOUND || theta.abs() > PARAM_BOUND {
                    continue;
                }
                let candidate = conditional_sse(&diffs, phi, theta).0;
                if candidate < sse {
                    (ar, ma, sse) = (phi, theta, candidate);
                    moved = true;
                }
            }
            if !moved {
                step /= 2.0;
            }
        }

        if !sse.is_finite() {
            return Err(degenerate("sum of squares is not finite"));
        }

        let (_, last_residual) = conditional_sse(&diffs, ar, ma);
        let sigma2 = sse / (diffs.len() - 1) as f64;
        let last_diff = diffs.last().copied().unwrap_or_default();

        debug!(ar, ma, sigma2, iterations, "Fitted ARIMA(1,1,1)");
        Ok(Self {
            ar,
            ma,
            sigma2,
            iterations,
            last_level,
            last_diff,
            last_residual,
        })
    }

    /// Project `horizon` steps past the last observation
    ///
    /// Future shocks are zero, so only the first step carries the MA term.
    /// Standard errors come from the cumulative psi weights of the
    /// integrated process.
    #[must_use]
    pub fn forecast(&self, horizon: usize) -> Vec<Projection> {
        let mut level = self.last_level;
        let mut diff = self.last_diff;
        let mut residual = self.last_residual;

        let mut psi = 1.0;
        let mut cumulative_psi = 0.0;
        let mut weight_sum = 0.0;

        let mut projections = Vec::with_capacity(horizon);
        for step in 0..horizon {
            diff = self.ar.mul_add(diff, self.ma * residual);
            residual = 0.0;
            level += diff;

            cumulative_psi += psi;
            weight_sum += cumulative_psi * cumulative_psi;
            projections.push(Projection {
                level,
                standard_error: (self.sigma2 * weight_sum).sqrt(),
            });

            psi = if step == 0 {
                self.ar + self.ma
            } else {
                self.ar * psi
            };
        }
        projections
    }
}

fn degenerate(reason: &str) -> ForecastUnavailable {
    ForecastUnavailable::DegenerateSeries {
        reason: reason.to_owned(),
    }
}

fn variance(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}

/// Conditional SSE and final residual, conditioning on the first difference
fn conditional_sse(diffs: &[f64], phi: f64, theta: f64) -> (f64, f64) {
    let mut sse = 0.0;
    let mut residual = 0.0;
    for pair in diffs.windows(2) {
        residual = pair[1] - phi.mul_add(pair[0], theta * residual);
        sse += residual * residual;
    }
    (sse, residual)
}

fn grid_search(diffs: &[f64]) -> (f64, f64, f64) {
    let mut best = (0.0, 0.0, conditional_sse(diffs, 0.0, 0.0).0);
    for i in -GRID_HALF_WIDTH..=GRID_HALF_WIDTH {
        for j in -GRID_HALF_WIDTH..=GRID_HALF_WIDTH {
            let phi = f64::from(i) * GRID_STEP;
            let theta = f64::from(j) * GRID_STEP;
            let sse = conditional_sse(diffs, phi, theta).0;
            if sse < best.2 {
                best = (phi, theta, sse);
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic AR(1) differences with a small alternating shock
    fn synthetic_series(len: usize, phi: f64) -> Vec<f64> {
        let mut level = 40.0;
        let mut diff = 0.0;
        let mut values = Vec::with_capacity(len);
        for t in 0..len {
            let base = if t % 2 == 0 { 3.0 } else { -2.0 };
            let shock = base + f64::from(u32::try_from(t % 5).unwrap());
            diff = phi.mul_add(diff, shock);
            level += diff;
            values.push(level);
        }
        values
    }

    #[test]
    fn test_fit_parameters_inside_unit_square() {
        let model = Arima111::fit(&synthetic_series(30, 0.5)).unwrap();
        assert!(model.ar.abs() < 1.0);
        assert!(model.ma.abs() < 1.0);
        assert!(model.sigma2 >= 0.0);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let series = synthetic_series(20, 0.3);
        assert_eq!(Arima111::fit(&series), Arima111::fit(&series));
    }

    #[test]
    fn test_exhausted_budget_is_non_convergence() {
        let series = synthetic_series(30, 0.5);
        assert_eq!(
            Arima111::fit_with_budget(&series, 1),
            Err(ForecastUnavailable::NonConvergence { iterations: 1 })
        );
        assert!(Arima111::fit_with_budget(&series, MAX_ITERATIONS).is_ok());
    }

    #[test]
    fn test_all_zero_is_degenerate() {
        assert!(matches!(
            Arima111::fit(&[0.0; 12]),
            Err(ForecastUnavailable::DegenerateSeries { .. })
        ));
    }

    #[test]
    fn test_constant_series_is_degenerate() {
        assert!(matches!(
            Arima111::fit(&[25.0; 12]),
            Err(ForecastUnavailable::DegenerateSeries { .. })
        ));
    }

    #[test]
    fn test_forecast_intervals_widen() {
        let model = Arima111::fit(&synthetic_series(24, 0.4)).unwrap();
        let projections = model.forecast(12);
        assert_eq!(projections.len(), 12);
        for pair in projections.windows(2) {
            assert!(pair[1].standard_error >= pair[0].standard_error);
        }
    }

    #[test]
    fn test_first_step_variance_is_sigma2() {
        let model = Arima111::fit(&synthetic_series(16, 0.2)).unwrap();
        let first = model.forecast(1)[0];
        assert!((first.standard_error - model.sigma2.sqrt()).abs() < 1e-12);
    }
}
