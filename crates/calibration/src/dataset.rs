//! Stored reference measurements and the check that replays them.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CalibrationError, CalibrationResult};
use crate::tolerance::{verify_residual, ResidualReport, Tolerance};
use crate::transform::CalibrationMode;
use crate::workspace::CalibrationWorkspace;

const EMBEDDED_REFERENCE: &str = include_str!("../assets/reference.json");

/// A cold/atm/hot measurement together with its calibrated spectrum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDataset {
    #[serde(default)]
    pub description: Option<String>,
    pub cold: Vec<f64>,
    pub atm: Vec<f64>,
    pub hot: Vec<f64>,
    pub tcold: f64,
    pub thot: f64,
    /// Spectrum the calibration must reproduce
    pub expected: Vec<f64>,
}

impl ReferenceDataset {
    /// The reference measurement shipped with the crate (410 channels).
    pub fn embedded() -> CalibrationResult<Self> {
        serde_json::from_str(EMBEDDED_REFERENCE)
            .map_err(|e| CalibrationError::Dataset(format!("embedded reference: {}", e)))
    }

    /// Load a dataset from JSON (`.json`) or YAML (`.yaml`, `.yml`).
    pub fn from_path(path: impl AsRef<Path>) -> CalibrationResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let dataset: Self = match ext.as_deref() {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| CalibrationError::Dataset(format!("{}: {}", path.display(), e)))?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .map_err(|e| CalibrationError::Dataset(format!("{}: {}", path.display(), e)))?,
            _ => {
                return Err(CalibrationError::Dataset(format!(
                    "{}: expected a .json, .yaml or .yml file",
                    path.display()
                )))
            }
        };

        tracing::debug!(path = %path.display(), channels = dataset.channels(), "Loaded reference dataset");
        Ok(dataset)
    }

    pub fn channels(&self) -> usize {
        self.cold.len()
    }

    /// All four vectors must have the same number of channels.
    pub fn validate(&self) -> CalibrationResult<()> {
        let n = self.cold.len();
        for (what, len) in [
            ("atm", self.atm.len()),
            ("hot", self.hot.len()),
            ("expected", self.expected.len()),
        ] {
            if len != n {
                return Err(CalibrationError::LengthMismatch {
                    what: what.to_string(),
                    expected: n,
                    got: len,
                });
            }
        }
        Ok(())
    }

    pub fn workspace(&self) -> CalibrationWorkspace {
        CalibrationWorkspace::new(
            self.cold.clone(),
            self.atm.clone(),
            self.hot.clone(),
            self.tcold,
            self.thot,
        )
    }
}

/// Calibrate `dataset` and compare the result to its expected spectrum.
pub fn run_check(dataset: &ReferenceDataset, tol: Tolerance) -> CalibrationResult<ResidualReport> {
    dataset.validate()?;
    let mut ws = dataset.workspace();
    let y = ws.y_cold_atm_hot(CalibrationMode::Calibrate)?;

    match verify_residual(y, &dataset.expected, tol) {
        Ok(report) => {
            tracing::info!(
                channels = report.channels,
                worst_channel = report.worst_channel,
                max_abs_residual = report.max_abs_residual,
                "Calibration reproduces expected values"
            );
            Ok(report)
        }
        Err(e) => {
            tracing::error!(error = %e, "Calibration check failed");
            Err(e)
        }
    }
}
