//! Common types shared by the propagation-path plotting crates.

pub mod error;
pub mod matrix;
pub mod panels;
pub mod record;
pub mod selection;

pub use error::{PpathError, PpathResult};
pub use matrix::SampleMatrix;
pub use panels::PanelFlags;
pub use record::PathRecord;
pub use selection::{select_fields, PathFields, SelectionMode};
