//! Geometry helpers for propagation-path plots.
//!
//! Longitude segmentation across the antimeridian, polar frame transforms
//! and tick generation. Implemented from scratch without external plotting
//! dependencies.

pub mod error;
pub mod longitude;
pub mod polar;
pub mod ticks;

pub use error::{GeometryError, GeometryResult};
pub use longitude::{longitude_breaks, unwrap_lon, LongitudeSegment};
pub use polar::{PolarFrame, ThetaZero};
