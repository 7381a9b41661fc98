//! Closeness checks for calibrated spectra.

use serde::{Deserialize, Serialize};

use crate::error::{CalibrationError, CalibrationResult};

/// Relative and absolute tolerance, compared as `|a - b| <= atol + rtol * |b|`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    pub rtol: f64,
    pub atol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            rtol: 1e-5,
            atol: 1e-8,
        }
    }
}

impl Tolerance {
    /// Largest allowed difference from `expected`.
    pub fn bound(&self, expected: f64) -> f64 {
        self.atol + self.rtol * expected.abs()
    }

    /// NaN is never close to anything.
    pub fn is_close(&self, actual: f64, expected: f64) -> bool {
        (actual - expected).abs() <= self.bound(expected)
    }
}

/// Element-wise closeness; false when the lengths differ.
pub fn all_close(actual: &[f64], expected: &[f64], tol: Tolerance) -> bool {
    actual.len() == expected.len()
        && actual
            .iter()
            .zip(expected)
            .all(|(&a, &b)| tol.is_close(a, b))
}

/// Summary of a passed residual check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidualReport {
    pub channels: usize,
    /// Channel with the largest absolute residual
    pub worst_channel: usize,
    pub max_abs_residual: f64,
}

/// Check that `y - expected` is close to zero everywhere.
///
/// The comparison is against zero, so only `atol` bounds the residual.
/// Fails with [`CalibrationError::Drift`] naming the worst channel.
pub fn verify_residual(y: &[f64], expected: &[f64], tol: Tolerance) -> CalibrationResult<ResidualReport> {
    if y.len() != expected.len() {
        return Err(CalibrationError::LengthMismatch {
            what: "calibrated spectrum".to_string(),
            expected: expected.len(),
            got: y.len(),
        });
    }

    let residuals: Vec<f64> = y.iter().zip(expected).map(|(&a, &b)| a - b).collect();
    let magnitude = |r: f64| if r.is_nan() { f64::INFINITY } else { r.abs() };
    let worst_channel = residuals
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &r)| match best {
            Some((_, m)) if m >= magnitude(r) => best,
            _ => Some((i, magnitude(r))),
        })
        .map(|(i, _)| i)
        .unwrap_or(0);
    let max_abs_residual = residuals.get(worst_channel).map(|r| r.abs()).unwrap_or(0.0);

    if residuals.iter().any(|&r| !tol.is_close(r, 0.0)) {
        return Err(CalibrationError::drift(worst_channel, max_abs_residual, tol.bound(0.0)));
    }

    let report = ResidualReport {
        channels: y.len(),
        worst_channel,
        max_abs_residual,
    };
    Ok(report)
}
