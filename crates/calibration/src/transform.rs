//! The cold/atm/hot calibration transform.

use serde::{Deserialize, Serialize};

use crate::error::{CalibrationError, CalibrationResult};

/// Brightness temperature of one channel.
///
/// `pc`, `pa` and `ph` are the cold, atmosphere and hot measurements; `tc`
/// and `th` the cold and hot load temperatures.
#[inline]
pub fn calibration(pc: f64, pa: f64, ph: f64, tc: f64, th: f64) -> f64 {
    tc + (th - tc) * (pa - pc) / (ph - pc)
}

/// Receiver noise temperature of one channel (Y-factor method).
#[inline]
pub fn systemtemp(pc: f64, ph: f64, tc: f64, th: f64) -> f64 {
    (th - tc * ph / pc) / (ph / pc - 1.0)
}

/// What [`y_cold_atm_hot`] computes per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationMode {
    /// Calibrated atmospheric brightness temperature
    #[default]
    Calibrate,
    /// Receiver noise temperature; the atmospheric vector is not used
    SystemTemperature,
}

fn check_len(what: &str, expected: usize, got: usize) -> CalibrationResult<()> {
    if expected != got {
        return Err(CalibrationError::LengthMismatch {
            what: what.to_string(),
            expected,
            got,
        });
    }
    Ok(())
}

/// Apply the transform channel by channel.
pub fn y_cold_atm_hot(
    cold: &[f64],
    atm: &[f64],
    hot: &[f64],
    tcold: f64,
    thot: f64,
    mode: CalibrationMode,
) -> CalibrationResult<Vec<f64>> {
    check_len("atm", cold.len(), atm.len())?;
    check_len("hot", cold.len(), hot.len())?;

    let y = match mode {
        CalibrationMode::Calibrate => cold
            .iter()
            .zip(atm)
            .zip(hot)
            .map(|((&pc, &pa), &ph)| calibration(pc, pa, ph, tcold, thot))
            .collect(),
        CalibrationMode::SystemTemperature => cold
            .iter()
            .zip(hot)
            .map(|(&pc, &ph)| systemtemp(pc, ph, tcold, thot))
            .collect(),
    };
    Ok(y)
}
