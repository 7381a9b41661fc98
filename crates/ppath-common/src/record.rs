//! Propagation path records.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PpathError, PpathResult};
use crate::matrix::SampleMatrix;
use crate::selection::SelectionMode;

/// A computed propagation path through an atmosphere.
///
/// `pos` columns are radius (or altitude) [m], latitude [deg] and longitude
/// [deg]; `los` columns are zenith [deg] and azimuth [deg]. Lower dimensional
/// atmospheres simply carry fewer columns. `r` holds the radius of every
/// sample and drives the "lowest" selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathRecord {
    #[serde(default)]
    pub pos: SampleMatrix,
    #[serde(default)]
    pub los: SampleMatrix,
    #[serde(default)]
    pub r: Vec<f64>,
    #[serde(default)]
    pub start_pos: Vec<f64>,
    #[serde(default)]
    pub start_los: Vec<f64>,
    #[serde(default)]
    pub end_pos: Vec<f64>,
    #[serde(default)]
    pub end_los: Vec<f64>,
}

impl PathRecord {
    /// Load a record from a JSON string
    pub fn from_json(json_str: &str) -> PpathResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Load a record from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> PpathResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PpathError::DataReadError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn nsamples(&self) -> usize {
        self.pos.nrows()
    }

    /// Indices of every sample whose radius equals the minimum radius.
    ///
    /// Comparison is exact; ties are all returned in path order. An empty
    /// `r` selects nothing.
    pub fn lowest_indices(&self) -> PpathResult<Vec<usize>> {
        if self.r.is_empty() {
            return Ok(Vec::new());
        }
        for (name, m) in [("pos", &self.pos), ("los", &self.los)] {
            if m.ncols() > 0 && m.nrows() != self.r.len() {
                return Err(PpathError::ShapeMismatch(format!(
                    "{} has {} rows but r has {} samples",
                    name,
                    m.nrows(),
                    self.r.len()
                )));
            }
        }

        let min = self.r.iter().copied().fold(f64::INFINITY, f64::min);
        Ok(self
            .r
            .iter()
            .enumerate()
            .filter(|(_, &r)| r == min)
            .map(|(i, _)| i)
            .collect())
    }

    /// Collapse several paths into one record holding only `pos`/`los`.
    ///
    /// `End`/`Start` contribute one row per path from the distinguished end or
    /// start sample, `Lowest` the minimum-radius rows of each path, and `All`
    /// every row. The result is meant to be plotted with [`SelectionMode::All`].
    pub fn merge(paths: &[PathRecord], mode: SelectionMode) -> PpathResult<Self> {
        let (pos, los) = match mode {
            SelectionMode::End => (
                SampleMatrix::from_rows(&paths.iter().map(|p| &p.end_pos[..]).collect::<Vec<_>>())?,
                SampleMatrix::from_rows(&paths.iter().map(|p| &p.end_los[..]).collect::<Vec<_>>())?,
            ),
            SelectionMode::Start => (
                SampleMatrix::from_rows(&paths.iter().map(|p| &p.start_pos[..]).collect::<Vec<_>>())?,
                SampleMatrix::from_rows(&paths.iter().map(|p| &p.start_los[..]).collect::<Vec<_>>())?,
            ),
            SelectionMode::Lowest => {
                let mut pos = Vec::with_capacity(paths.len());
                let mut los = Vec::with_capacity(paths.len());
                for p in paths {
                    let idx = p.lowest_indices()?;
                    pos.push(p.pos.select_populated_rows(&idx)?);
                    los.push(p.los.select_populated_rows(&idx)?);
                }
                (SampleMatrix::vstack(&pos)?, SampleMatrix::vstack(&los)?)
            }
            SelectionMode::All => (
                SampleMatrix::vstack(paths.iter().map(|p| &p.pos))?,
                SampleMatrix::vstack(paths.iter().map(|p| &p.los))?,
            ),
        };

        tracing::debug!(
            paths = paths.len(),
            mode = %mode,
            rows = pos.nrows(),
            "Merged path records"
        );

        let r = pos.column(0).unwrap_or_default();
        Ok(Self {
            pos,
            los,
            r,
            ..Default::default()
        })
    }
}
