//! Explicit calibration context.

use crate::error::CalibrationResult;
use crate::transform::{y_cold_atm_hot, CalibrationMode};

/// Measurement vectors, load temperatures and the last computed spectrum.
///
/// Built once per check and passed around by value; there is no shared
/// instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalibrationWorkspace {
    pub cold: Vec<f64>,
    pub atm: Vec<f64>,
    pub hot: Vec<f64>,
    pub tcold: f64,
    pub thot: f64,
    y: Vec<f64>,
}

impl CalibrationWorkspace {
    pub fn new(cold: Vec<f64>, atm: Vec<f64>, hot: Vec<f64>, tcold: f64, thot: f64) -> Self {
        Self {
            cold,
            atm,
            hot,
            tcold,
            thot,
            y: Vec::new(),
        }
    }

    /// Run the transform and keep the result as `y`.
    pub fn y_cold_atm_hot(&mut self, mode: CalibrationMode) -> CalibrationResult<&[f64]> {
        self.y = y_cold_atm_hot(&self.cold, &self.atm, &self.hot, self.tcold, self.thot, mode)?;
        tracing::debug!(channels = self.y.len(), ?mode, "Computed calibrated spectrum");
        Ok(&self.y)
    }

    /// Spectrum of the last transform; empty before the first run.
    pub fn y(&self) -> &[f64] {
        &self.y
    }
}
