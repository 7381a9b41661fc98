//! Propagation path figures.
//!
//! A path is drawn on up to five axes: latitude and longitude against
//! altitude (polar), a latitude/longitude map, and zenith and azimuth angles
//! (polar). Callers may pass axes from an earlier call to draw several paths
//! on the same figure; lines accumulate, axis settings are re-applied
//! unchanged.

use std::f64::consts::{FRAC_PI_2, PI};

use geometry::ticks::{arange, linspace};
use geometry::{unwrap_lon, ThetaZero};
use ppath_common::{
    select_fields, PanelFlags, PathFields, PathRecord, PpathError, PpathResult, SelectionMode,
};
use serde::{Deserialize, Serialize};

use crate::axes::{Axes, Projection};
use crate::figure::{AxesId, Figure};
use crate::style::LineStyle;

/// Options for [`polar_ppath`] and [`polar_ppath_list`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PpathPlotOptions {
    /// Radius of the planet in metres; 0 plots altitude.
    pub planetary_radius: f64,
    /// Divisor applied to radii (1000 plots kilometres).
    pub rscale: f64,
    pub panels: PanelFlags,
    pub select: SelectionMode,
}

impl Default for PpathPlotOptions {
    fn default() -> Self {
        Self {
            planetary_radius: 0.0,
            rscale: 1000.0,
            panels: PanelFlags::default(),
            select: SelectionMode::All,
        }
    }
}

impl PpathPlotOptions {
    /// Defaults for a list of paths: end points, every panel.
    pub fn for_list() -> Self {
        Self {
            panels: PanelFlags::everything(),
            select: SelectionMode::End,
            ..Default::default()
        }
    }
}

/// Handles of the five path axes, any of which may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PpathAxes {
    pub lat: Option<AxesId>,
    pub lon: Option<AxesId>,
    pub map: Option<AxesId>,
    pub za: Option<AxesId>,
    pub aa: Option<AxesId>,
}

impl PpathAxes {
    /// Handles in the order lat, lon, map, za, aa.
    pub fn as_array(&self) -> [Option<AxesId>; 5] {
        [self.lat, self.lon, self.map, self.za, self.aa]
    }
}

/// Radial unit label for a radius divisor.
pub fn radial_unit(rscale: f64) -> &'static str {
    if rscale == 1.0 {
        "m"
    } else if rscale == 1000.0 {
        "km"
    } else if rscale == 1e6 {
        "Mm"
    } else {
        "???"
    }
}

/// Grid angles in degrees, `arange` style.
fn grid_deg(start: f64, stop: f64, step: f64) -> PpathResult<Vec<f64>> {
    arange(start, stop, step).map_err(|e| PpathError::InternalError(e.to_string()))
}

fn radius_kind(planetary_radius: f64) -> &'static str {
    if planetary_radius == 0.0 {
        "Altitude"
    } else {
        "Radius"
    }
}

/// Create the default axes layout for `panels`.
///
/// Polar panels share the top row (or rows), the map spans the bottom row.
/// When both polar pairs are drawn the axes are moved to fixed positions,
/// some of which lie above the unit figure box.
pub fn default_axes(figure: &mut Figure, panels: PanelFlags) -> PpathResult<PpathAxes> {
    let rows = panels.map as usize + (panels.za_aa || panels.lat_lon) as usize;
    let z = 2 * panels.lat_lon as usize;
    let cols = 2 * panels.za_aa as usize + z;

    let mut axes = PpathAxes::default();
    if panels.lat_lon {
        axes.lat = Some(figure.add_subplot(rows, cols, 1, Projection::polar())?);
        axes.lon = Some(figure.add_subplot(rows, cols, 2, Projection::polar())?);
    }
    if panels.za_aa {
        axes.za = Some(figure.add_subplot(rows, cols, 1 + z, Projection::polar())?);
        axes.aa = Some(figure.add_subplot(rows, cols, 2 + z, Projection::polar())?);
    }
    if panels.map {
        let id = figure.add_subplot(rows, 1, rows, Projection::cartesian())?;
        figure.axes_mut(id)?.cartesian_mut()?.set_aspect(0.5);
        axes.map = Some(id);
    }

    if panels.za_aa && panels.lat_lon {
        let fixed = [
            (axes.lat, [0.0, 1.0, 0.2, 0.2]),
            (axes.lon, [0.3, 1.0, 0.2, 0.2]),
            (axes.za, [0.6, 1.0, 0.2, 0.2]),
            (axes.aa, [0.9, 1.0, 0.2, 0.2]),
            (axes.map, [0.1, 0.4, 1.0, 0.5]),
        ];
        for (id, rect) in fixed {
            if let Some(id) = id {
                figure.axes_mut(id)?.set_position(rect);
            }
        }
    }

    tracing::debug!(
        rows,
        cols,
        lat_lon = panels.lat_lon,
        map = panels.map,
        za_aa = panels.za_aa,
        "Created default path axes"
    );
    Ok(axes)
}

/// Plot `y` against `x`, skipping (with a warning) a series whose one side
/// is missing because the record lacked that column.
fn plot_series(ax: &mut Axes, x: Vec<f64>, y: Vec<f64>, what: &str) -> PpathResult<()> {
    if x.len() != y.len() && (x.is_empty() || y.is_empty()) {
        tracing::warn!(
            panel = what,
            x = x.len(),
            y = y.len(),
            "Component missing from selection; nothing drawn"
        );
        return Ok(());
    }
    let style = LineStyle::for_len(y.len());
    ax.plot(x, y, style)?;
    Ok(())
}

/// Shared polar set-up: radii scaled and offset by the planetary radius,
/// theta zero east over the full circle.
fn polar_helper(
    ax: &mut Axes,
    rad: &[f64],
    theta: &[f64],
    planetary_radius: f64,
    rscale: f64,
    what: &str,
) -> PpathResult<()> {
    let r: Vec<f64> = rad
        .iter()
        .map(|v| v / rscale + planetary_radius / rscale)
        .collect();
    plot_series(ax, theta.to_vec(), r, what)?;

    let polar = ax.polar_mut()?;
    polar.set_rmin(planetary_radius / rscale);
    polar.set_theta_zero_location(ThetaZero::E);
    polar.set_thetalim(-PI, PI);
    polar.set_thetagrids(grid_deg(-180.0, 179.0, 30.0)?);
    Ok(())
}

/// Latitude (radians) against radius.
pub fn polar_ppath_lat(
    ax: &mut Axes,
    rad: &[f64],
    lat: &[f64],
    planetary_radius: f64,
    rscale: f64,
) -> PpathResult<()> {
    polar_helper(ax, rad, lat, planetary_radius, rscale, "lat")?;
    ax.set_frame_on(false);
    ax.set_title(format!("Latitude vs {}", radius_kind(planetary_radius)));
    let polar = ax.polar_mut()?;
    polar.set_thetalim(-FRAC_PI_2, FRAC_PI_2);
    polar.set_thetagrids(grid_deg(-90.0, 91.0, 45.0)?);
    Ok(())
}

/// Longitude (radians) against radius.
pub fn polar_ppath_lon(
    ax: &mut Axes,
    rad: &[f64],
    lon: &[f64],
    planetary_radius: f64,
    rscale: f64,
) -> PpathResult<()> {
    polar_helper(ax, rad, lon, planetary_radius, rscale, "lon")?;
    ax.set_frame_on(false);
    ax.set_title(format!("Longitude vs {}", radius_kind(planetary_radius)));
    let polar = ax.polar_mut()?;
    polar.set_theta_zero_location(ThetaZero::S);
    polar.set_thetagrids(grid_deg(-180.0, 179.0, 45.0)?);
    polar.set_r_tick_labels(false);
    Ok(())
}

/// Latitude against longitude, both in degrees. Runs split at the
/// antimeridian are drawn separately in one colour.
pub fn polar_ppath_map(ax: &mut Axes, lat: &[f64], lon: &[f64]) -> PpathResult<()> {
    if lat.len() != lon.len() && (lat.is_empty() || lon.is_empty()) {
        tracing::warn!(
            lat = lat.len(),
            lon = lon.len(),
            "Component missing from selection; nothing drawn on map"
        );
    } else {
        let style = LineStyle::for_len(lat.len());
        let segments = unwrap_lon(lon, lat).map_err(|e| PpathError::ShapeMismatch(e.to_string()))?;
        let mut color = None;
        for (seg_lon, seg_lat) in segments {
            match color {
                None => color = Some(ax.plot(seg_lon, seg_lat, style)?),
                Some(c) => ax.plot_with_color(seg_lon, seg_lat, style, c)?,
            }
        }
    }

    ax.set_title("Latitude vs Longitude");
    ax.set_ylabel("Latitude [deg]");
    ax.set_xlabel("Longitude [deg]");
    let cart = ax.cartesian_mut()?;
    cart.set_ylim(-90.0, 90.0);
    cart.set_xlim(-180.0, 180.0);
    cart.set_xticks(linspace(-180.0, 180.0, 7));
    cart.set_yticks(linspace(-90.0, 90.0, 7));
    Ok(())
}

/// Zenith angle (radians) on the unit circle.
pub fn polar_ppath_za(ax: &mut Axes, za: &[f64]) -> PpathResult<()> {
    polar_helper(ax, &vec![1.0; za.len()], za, 0.0, 1.0, "za")?;
    ax.set_frame_on(false);
    ax.set_title("Zenith Angle");
    let polar = ax.polar_mut()?;
    polar.set_thetalim(0.0, PI);
    polar.set_thetagrids(grid_deg(0.0, 181.0, 45.0)?);
    polar.set_theta_zero_location(ThetaZero::N);
    polar.set_theta_direction(-1.0);
    Ok(())
}

/// Azimuth angle (radians) on the unit circle.
pub fn polar_ppath_aa(ax: &mut Axes, aa: &[f64]) -> PpathResult<()> {
    polar_helper(ax, &vec![1.0; aa.len()], aa, 0.0, 1.0, "aa")?;
    ax.set_frame_on(false);
    ax.set_title("Azimuth Angle");
    let polar = ax.polar_mut()?;
    polar.set_theta_zero_location(ThetaZero::N);
    polar.set_theta_direction(-1.0);
    polar.set_thetagrids(grid_deg(-180.0, 179.0, 45.0)?);
    polar.set_r_tick_labels(false);
    Ok(())
}

fn required(id: Option<AxesId>, panel: &str) -> PpathResult<AxesId> {
    id.ok_or_else(|| PpathError::invalid("axes", format!("no {} axes supplied", panel)))
}

/// Draw already selected fields onto `axes`.
pub fn draw_fields(
    fields: &PathFields,
    options: &PpathPlotOptions,
    figure: &mut Figure,
    axes: &PpathAxes,
) -> PpathResult<()> {
    let panels = options.panels;
    let (pr, rscale) = (options.planetary_radius, options.rscale);

    if panels.lat_lon {
        let lat_ax = figure.axes_mut(required(axes.lat, "latitude")?)?;
        polar_ppath_lat(lat_ax, &fields.radius, &fields.lat_rad(), pr, rscale)?;
        lat_ax.set_ylabel(format!("{} [{}]", radius_kind(pr), radial_unit(rscale)));

        let lon_ax = figure.axes_mut(required(axes.lon, "longitude")?)?;
        polar_ppath_lon(lon_ax, &fields.radius, &fields.lon_rad(), pr, rscale)?;
    }

    if panels.map {
        let map_ax = figure.axes_mut(required(axes.map, "map")?)?;
        polar_ppath_map(map_ax, &fields.lat_deg, &fields.lon_deg)?;
    }

    if panels.za_aa {
        let za_ax = figure.axes_mut(required(axes.za, "zenith")?)?;
        polar_ppath_za(za_ax, &fields.za_rad)?;
        za_ax.set_ylabel("Arbitrary unit [-]");

        let aa_ax = figure.axes_mut(required(axes.aa, "azimuth")?)?;
        polar_ppath_aa(aa_ax, &fields.aa_rad)?;
    }
    Ok(())
}

/// Plot one path record.
///
/// Fields are chosen with `options.select`. When `axes` is `None` the
/// default layout for `options.panels` is created on `figure`. Returns the
/// handles used, for further drawing.
pub fn polar_ppath(
    record: &PathRecord,
    options: &PpathPlotOptions,
    figure: &mut Figure,
    axes: Option<PpathAxes>,
) -> PpathResult<PpathAxes> {
    let axes = match axes {
        Some(axes) => axes,
        None => default_axes(figure, options.panels)?,
    };
    let fields = select_fields(record, options.select)?;
    draw_fields(&fields, options, figure, &axes)?;

    tracing::info!(
        select = %options.select,
        samples = fields.radius.len(),
        "Plotted propagation path"
    );
    Ok(axes)
}

/// Plot a list of path records as one merged record.
///
/// `options.select` picks what each record contributes (end points by
/// default); the merged record is then drawn in full.
pub fn polar_ppath_list(
    records: &[PathRecord],
    options: &PpathPlotOptions,
    figure: &mut Figure,
    axes: Option<PpathAxes>,
) -> PpathResult<PpathAxes> {
    let merged = PathRecord::merge(records, options.select)?;
    let merged_options = PpathPlotOptions {
        select: SelectionMode::All,
        ..*options
    };
    polar_ppath(&merged, &merged_options, figure, axes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::Rect;
    use crate::figure::FigureOptions;

    #[test]
    fn test_radial_unit() {
        assert_eq!(radial_unit(1.0), "m");
        assert_eq!(radial_unit(1000.0), "km");
        assert_eq!(radial_unit(1e6), "Mm");
        assert_eq!(radial_unit(42.0), "???");
    }

    #[test]
    fn test_default_axes_lat_lon_and_map() {
        let mut fig = Figure::new(FigureOptions::default());
        let axes = default_axes(&mut fig, PanelFlags::default()).unwrap();
        assert!(axes.lat.is_some() && axes.lon.is_some() && axes.map.is_some());
        assert!(axes.za.is_none() && axes.aa.is_none());
        assert_eq!(fig.all_axes().len(), 3);

        let map = fig.axes(axes.map.unwrap()).unwrap();
        assert_eq!(map.cartesian().unwrap().aspect, Some(0.5));
        // map occupies the bottom row of two
        let lat = fig.axes(axes.lat.unwrap()).unwrap();
        assert!(map.position().top() < lat.position().bottom);
    }

    #[test]
    fn test_default_axes_everything_uses_fixed_positions() {
        let mut fig = Figure::new(FigureOptions::default());
        let axes = default_axes(&mut fig, PanelFlags::everything()).unwrap();
        let aa = fig.axes(axes.aa.unwrap()).unwrap();
        assert_eq!(aa.position(), Rect::from([0.9, 1.0, 0.2, 0.2]));
        let map = fig.axes(axes.map.unwrap()).unwrap();
        assert_eq!(map.position(), Rect::from([0.1, 0.4, 1.0, 0.5]));
    }

    #[test]
    fn test_default_axes_nothing() {
        let mut fig = Figure::new(FigureOptions::default());
        let panels = PanelFlags {
            lat_lon: false,
            map: false,
            za_aa: false,
        };
        let axes = default_axes(&mut fig, panels).unwrap();
        assert_eq!(axes, PpathAxes::default());
        assert!(fig.all_axes().is_empty());
    }

    #[test]
    fn test_lat_panel_settings() {
        let mut ax = Axes::new(Projection::polar(), [0.0, 0.0, 1.0, 1.0].into());
        polar_ppath_lat(&mut ax, &[10e3, 20e3], &[0.1, 0.2], 6371e3, 1000.0).unwrap();

        assert_eq!(ax.title(), Some("Latitude vs Radius"));
        assert!(!ax.frame_on());
        let polar = ax.polar().unwrap();
        assert_eq!(polar.rmin, Some(6371.0));
        assert_eq!(polar.theta_lim, (-FRAC_PI_2, FRAC_PI_2));
        assert_eq!(polar.theta_grids_deg, vec![-90.0, -45.0, 0.0, 45.0, 90.0]);
        assert_eq!(ax.lines()[0].y, vec![6381.0, 6391.0]);
        assert_eq!(ax.lines()[0].style, LineStyle::Solid);
    }

    #[test]
    fn test_single_sample_uses_cross() {
        let mut ax = Axes::new(Projection::polar(), [0.0, 0.0, 1.0, 1.0].into());
        polar_ppath_za(&mut ax, &[0.5]).unwrap();
        assert_eq!(ax.lines()[0].style, LineStyle::Cross);
        assert_eq!(ax.lines()[0].y, vec![1.0]);
    }

    #[test]
    fn test_map_segments_share_colour() {
        let mut ax = Axes::new(Projection::cartesian(), [0.0, 0.0, 1.0, 1.0].into());
        polar_ppath_map(&mut ax, &[10.0, 11.0, 12.0, 13.0], &[170.0, 175.0, -170.0, -175.0]).unwrap();
        let lines = ax.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].color, lines[1].color);
        assert_eq!(lines[1].x, vec![-170.0]);
    }

    #[test]
    fn test_missing_axes_handle_is_an_error() {
        let mut fig = Figure::new(FigureOptions::default());
        let fields = PathFields::default();
        let result = draw_fields(&fields, &PpathPlotOptions::default(), &mut fig, &PpathAxes::default());
        assert!(matches!(result, Err(PpathError::InvalidArgument { .. })));
    }
}
