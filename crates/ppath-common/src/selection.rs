//! Field extraction from path records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PpathError, PpathResult};
use crate::matrix::SampleMatrix;
use crate::record::PathRecord;

/// Which samples of a path record to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Every sample of the path
    #[default]
    All,
    /// The distinguished start sample
    Start,
    /// The distinguished end sample (the sensor position)
    End,
    /// All samples sharing the minimum radius
    #[serde(rename = "low")]
    Lowest,
}

impl SelectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Start => "start",
            Self::End => "end",
            Self::Lowest => "low",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionMode {
    type Err = PpathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            "low" => Ok(Self::Lowest),
            other => Err(PpathError::invalid(
                "select",
                format!("bad selection '{}'", other),
            )),
        }
    }
}

/// The five plotted components of a selection.
///
/// Latitude and longitude stay in degrees (the map works in degrees); zenith
/// and azimuth are converted to radians for the polar panels. Any component
/// can be empty when the record lacks the corresponding column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathFields {
    pub radius: Vec<f64>,
    pub lat_deg: Vec<f64>,
    pub lon_deg: Vec<f64>,
    pub za_rad: Vec<f64>,
    pub aa_rad: Vec<f64>,
}

impl PathFields {
    pub fn lat_rad(&self) -> Vec<f64> {
        self.lat_deg.iter().map(|v| v.to_radians()).collect()
    }

    pub fn lon_rad(&self) -> Vec<f64> {
        self.lon_deg.iter().map(|v| v.to_radians()).collect()
    }

    /// True when no component holds any value.
    pub fn is_empty(&self) -> bool {
        self.radius.is_empty()
            && self.lat_deg.is_empty()
            && self.lon_deg.is_empty()
            && self.za_rad.is_empty()
            && self.aa_rad.is_empty()
    }
}

fn matrix_fields(pos: &SampleMatrix, los: &SampleMatrix) -> PathFields {
    let deg_to_rad = |v: Vec<f64>| -> Vec<f64> { v.into_iter().map(f64::to_radians).collect() };
    PathFields {
        radius: pos.column(0).unwrap_or_default(),
        lat_deg: pos.column(1).unwrap_or_default(),
        lon_deg: pos.column(2).unwrap_or_default(),
        za_rad: los.column(0).map(deg_to_rad).unwrap_or_default(),
        aa_rad: los.column(1).map(deg_to_rad).unwrap_or_default(),
    }
}

fn single_sample_fields(pos: &[f64], los: &[f64]) -> PathFields {
    let pick = |v: &[f64], i: usize| v.get(i).map(|x| vec![*x]).unwrap_or_default();
    let pick_rad = |v: &[f64], i: usize| v.get(i).map(|x| vec![x.to_radians()]).unwrap_or_default();
    PathFields {
        radius: pick(pos, 0),
        lat_deg: pick(pos, 1),
        lon_deg: pick(pos, 2),
        za_rad: pick_rad(los, 0),
        aa_rad: pick_rad(los, 1),
    }
}

/// Extract the plotted components of `record` under `mode`.
pub fn select_fields(record: &PathRecord, mode: SelectionMode) -> PpathResult<PathFields> {
    let fields = match mode {
        SelectionMode::All => matrix_fields(&record.pos, &record.los),
        SelectionMode::Start => single_sample_fields(&record.start_pos, &record.start_los),
        SelectionMode::End => single_sample_fields(&record.end_pos, &record.end_los),
        SelectionMode::Lowest => {
            let idx = record.lowest_indices()?;
            let pos = record.pos.select_populated_rows(&idx)?;
            let los = record.los.select_populated_rows(&idx)?;
            matrix_fields(&pos, &los)
        }
    };

    if fields.is_empty() {
        tracing::warn!(mode = %mode, "Selection produced no samples");
    } else {
        tracing::debug!(
            mode = %mode,
            samples = fields.radius.len(),
            "Selected path fields"
        );
    }

    Ok(fields)
}

impl PathRecord {
    pub fn fields(&self, mode: SelectionMode) -> PpathResult<PathFields> {
        select_fields(self, mode)
    }
}
