//! Figure rendering for propagation paths.
//!
//! Implements a small retained-mode plotting surface:
//! - Figures holding polar and Cartesian axes
//! - SVG output, rasterized to PNG with resvg
//! - Path panels (latitude, longitude, map, zenith, azimuth)

pub mod axes;
pub mod figure;
pub mod png;
pub mod ppath;
pub mod style;
pub mod svg;

pub use axes::{Axes, AxesConfig, CartesianSettings, Line, PolarSettings, Projection, Rect};
pub use figure::{AxesId, Figure, FigureOptions};
pub use ppath::{
    default_axes, polar_ppath, polar_ppath_list, radial_unit, PpathAxes, PpathPlotOptions,
};
pub use style::{Color, LineStyle, DEFAULT_CYCLE};
