//! Cold/atmosphere/hot load calibration and its reference check.
//!
//! A radiometer looks at a cold load, the atmosphere and a hot load. With
//! the physical temperatures of both loads known, the atmospheric counts are
//! mapped linearly onto brightness temperature. [`run_check`] replays a
//! stored measurement and fails when the result drifts from the stored
//! spectrum.

pub mod dataset;
pub mod error;
pub mod tolerance;
pub mod transform;
pub mod workspace;

pub use dataset::{run_check, ReferenceDataset};
pub use error::{CalibrationError, CalibrationResult};
pub use tolerance::{all_close, verify_residual, ResidualReport, Tolerance};
pub use transform::{calibration, systemtemp, y_cold_atm_hot, CalibrationMode};
pub use workspace::CalibrationWorkspace;
