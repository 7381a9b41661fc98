//! Error types for geometry helpers.

use thiserror::Error;

/// Result type alias using GeometryError.
pub type GeometryResult<T> = Result<T, GeometryError>;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("Length mismatch: {lon} longitudes but {lat} latitudes")]
    LengthMismatch { lon: usize, lat: usize },

    #[error("Invalid range: {0}")]
    InvalidRange(String),
}
