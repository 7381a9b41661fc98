//! Error types for propagation-path handling and plotting.

use thiserror::Error;

/// Result type alias using PpathError.
pub type PpathResult<T> = Result<T, PpathError>;

/// Primary error type for path selection and rendering.
#[derive(Debug, Error)]
pub enum PpathError {
    #[error("Invalid value for '{param}': {value}")]
    InvalidArgument { param: String, value: String },

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Unknown axes handle: {0}")]
    UnknownAxes(usize),

    #[error("Rendering failed: {0}")]
    RenderError(String),

    #[error("Failed to read data: {0}")]
    DataReadError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl PpathError {
    /// Shorthand for an [`PpathError::InvalidArgument`] on `param`.
    pub fn invalid(param: &str, value: impl Into<String>) -> Self {
        PpathError::InvalidArgument {
            param: param.to_string(),
            value: value.into(),
        }
    }
}

impl From<std::io::Error> for PpathError {
    fn from(err: std::io::Error) -> Self {
        PpathError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for PpathError {
    fn from(err: serde_json::Error) -> Self {
        PpathError::DataReadError(format!("JSON error: {}", err))
    }
}
