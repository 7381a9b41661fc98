//! Row-major sample matrix used for path positions and lines of sight.

use serde::{Deserialize, Serialize};

use crate::error::{PpathError, PpathResult};

/// Dense row-major matrix with one row per path sample.
///
/// The column count is fixed at construction, so a matrix with zero rows
/// still knows how many components each sample would carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct SampleMatrix {
    nrows: usize,
    ncols: usize,
    values: Vec<f64>,
}

impl SampleMatrix {
    /// Empty matrix with `ncols` columns.
    pub fn with_columns(ncols: usize) -> Self {
        Self {
            nrows: 0,
            ncols,
            values: Vec::new(),
        }
    }

    /// Build from rows. All rows must have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> PpathResult<Self> {
        let ncols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut matrix = Self::with_columns(ncols);
        for row in rows {
            matrix.push_row(row.as_ref())?;
        }
        Ok(matrix)
    }

    /// Append one sample.
    pub fn push_row(&mut self, row: &[f64]) -> PpathResult<()> {
        if row.len() != self.ncols {
            return Err(PpathError::ShapeMismatch(format!(
                "row {} has {} columns, expected {}",
                self.nrows,
                row.len(),
                self.ncols
            )));
        }
        self.values.extend_from_slice(row);
        self.nrows += 1;
        Ok(())
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn is_empty(&self) -> bool {
        self.nrows == 0
    }

    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i >= self.nrows {
            return None;
        }
        Some(&self.values[i * self.ncols..(i + 1) * self.ncols])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.nrows).map(move |i| &self.values[i * self.ncols..(i + 1) * self.ncols])
    }

    /// Copy of column `j`, or `None` if the matrix has no such column.
    pub fn column(&self, j: usize) -> Option<Vec<f64>> {
        if j >= self.ncols {
            return None;
        }
        Some(self.rows().map(|row| row[j]).collect())
    }

    /// New matrix holding only the rows at `indices`, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> PpathResult<Self> {
        let mut out = Self::with_columns(self.ncols);
        for &i in indices {
            let row = self.row(i).ok_or_else(|| {
                PpathError::ShapeMismatch(format!(
                    "row index {} out of range for {} rows",
                    i, self.nrows
                ))
            })?;
            out.push_row(row)?;
        }
        Ok(out)
    }

    /// [`select_rows`](Self::select_rows) for a field that may be absent:
    /// a matrix without columns is returned as it is.
    pub fn select_populated_rows(&self, indices: &[usize]) -> PpathResult<Self> {
        if self.ncols == 0 {
            return Ok(self.clone());
        }
        self.select_rows(indices)
    }

    /// Stack matrices vertically. Empty matrices without rows are skipped so
    /// they do not force their column count on the result.
    pub fn vstack<'a, I>(matrices: I) -> PpathResult<Self>
    where
        I: IntoIterator<Item = &'a SampleMatrix>,
    {
        let mut out: Option<SampleMatrix> = None;
        for m in matrices {
            if m.is_empty() {
                if out.is_none() {
                    out = Some(m.clone());
                }
                continue;
            }
            match out.as_mut().filter(|acc| !acc.is_empty()) {
                Some(acc) => {
                    for row in m.rows() {
                        acc.push_row(row)?;
                    }
                }
                None => out = Some(m.clone()),
            }
        }
        Ok(out.unwrap_or_default())
    }
}

impl TryFrom<Vec<Vec<f64>>> for SampleMatrix {
    type Error = PpathError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl From<SampleMatrix> for Vec<Vec<f64>> {
    fn from(matrix: SampleMatrix) -> Self {
        matrix.rows().map(|r| r.to_vec()).collect()
    }
}
