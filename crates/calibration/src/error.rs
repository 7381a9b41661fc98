//! Error types for calibration.

use thiserror::Error;

/// Result type alias using CalibrationError.
pub type CalibrationResult<T> = Result<T, CalibrationError>;

/// Fixed diagnostic for a calibration that no longer reproduces its
/// reference spectrum.
pub const DRIFT_MESSAGE: &str = "Calibration fails to produce expected values";

#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("Length mismatch: {what} has {got} channels, expected {expected}")]
    LengthMismatch {
        what: String,
        expected: usize,
        got: usize,
    },

    #[error("{message} (channel {channel}: residual {residual:e} exceeds {bound:e})")]
    Drift {
        message: String,
        channel: usize,
        residual: f64,
        bound: f64,
    },

    #[error("Invalid reference dataset: {0}")]
    Dataset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CalibrationError {
    pub fn drift(channel: usize, residual: f64, bound: f64) -> Self {
        CalibrationError::Drift {
            message: DRIFT_MESSAGE.to_string(),
            channel,
            residual,
            bound,
        }
    }
}
