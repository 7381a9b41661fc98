//! Tests for path figures: panel layout, selection and re-drawing.

use ppath_common::{PanelFlags, PpathError, SelectionMode};
use renderer::{
    default_axes, polar_ppath, polar_ppath_list, Figure, FigureOptions, LineStyle, PpathPlotOptions,
};
use test_utils::{
    antimeridian_path, assert_slice_approx_eq, limb_path_list, one_dimensional_path,
    two_column_end_path,
};

fn figure() -> Figure {
    Figure::new(FigureOptions::with_dpi(50.0))
}

// ============================================================================
// Single path
// ============================================================================

#[test]
fn test_default_panels_draw_three_axes() {
    let mut fig = figure();
    let axes = polar_ppath(&antimeridian_path(), &PpathPlotOptions::default(), &mut fig, None).unwrap();

    assert_eq!(fig.all_axes().len(), 3);
    let lat = fig.axes(axes.lat.unwrap()).unwrap();
    assert_eq!(lat.title(), Some("Latitude vs Altitude"));
    assert_eq!(lat.ylabel(), Some("Altitude [km]"));
    assert_eq!(lat.lines()[0].y, vec![80.0, 40.0, 35.0, 70.0]);

    let lon = fig.axes(axes.lon.unwrap()).unwrap();
    assert_eq!(lon.title(), Some("Longitude vs Altitude"));
    assert!(!lon.polar().unwrap().r_tick_labels);
}

#[test]
fn test_map_is_split_at_antimeridian() {
    let mut fig = figure();
    let axes = polar_ppath(&antimeridian_path(), &PpathPlotOptions::default(), &mut fig, None).unwrap();

    let map = fig.axes(axes.map.unwrap()).unwrap();
    let lines = map.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].x, vec![170.0, 175.0]);
    assert_eq!(lines[1].x, vec![-170.0]);
    assert_eq!(lines[0].color, lines[1].color);

    let cart = map.cartesian().unwrap();
    assert_eq!(cart.xlim, Some((-180.0, 180.0)));
    assert_eq!(cart.ylim, Some((-90.0, 90.0)));
    assert_eq!(cart.xticks.as_ref().unwrap().len(), 7);
}

#[test]
fn test_zenith_azimuth_panels() {
    let mut fig = figure();
    let opts = PpathPlotOptions {
        panels: PanelFlags::everything(),
        ..Default::default()
    };
    let axes = polar_ppath(&antimeridian_path(), &opts, &mut fig, None).unwrap();
    assert_eq!(fig.all_axes().len(), 5);

    let za = fig.axes(axes.za.unwrap()).unwrap();
    assert_eq!(za.title(), Some("Zenith Angle"));
    assert_eq!(za.ylabel(), Some("Arbitrary unit [-]"));
    assert_eq!(za.lines()[0].y, vec![1.0; 4]);
    let expected: Vec<f64> = [95.0f64, 93.0, 91.0, 89.0].iter().map(|d| d.to_radians()).collect();
    assert_slice_approx_eq!(za.lines()[0].x, expected, 1e-12);
    let polar = za.polar().unwrap();
    assert_eq!(polar.theta_direction, -1.0);
    assert_eq!(polar.theta_grids_deg, vec![0.0, 45.0, 90.0, 135.0, 180.0]);

    let aa = fig.axes(axes.aa.unwrap()).unwrap();
    assert_eq!(aa.title(), Some("Azimuth Angle"));
}

#[test]
fn test_planetary_radius_changes_labels() {
    let mut fig = figure();
    let opts = PpathPlotOptions {
        planetary_radius: 6371e3,
        rscale: 1e6,
        ..Default::default()
    };
    let axes = polar_ppath(&antimeridian_path(), &opts, &mut fig, None).unwrap();
    let lat = fig.axes(axes.lat.unwrap()).unwrap();
    assert_eq!(lat.title(), Some("Latitude vs Radius"));
    assert_eq!(lat.ylabel(), Some("Radius [Mm]"));
    assert_eq!(lat.polar().unwrap().rmin, Some(6.371));
}

#[test]
fn test_end_selection_draws_markers() {
    let mut fig = figure();
    let opts = PpathPlotOptions {
        select: SelectionMode::End,
        ..Default::default()
    };
    let axes = polar_ppath(&antimeridian_path(), &opts, &mut fig, None).unwrap();
    let lat = fig.axes(axes.lat.unwrap()).unwrap();
    assert_eq!(lat.lines()[0].style, LineStyle::Cross);
    assert_eq!(lat.lines()[0].y, vec![80.0]);
}

#[test]
fn test_missing_longitude_column_still_plots() {
    let mut fig = figure();
    let opts = PpathPlotOptions {
        select: SelectionMode::End,
        ..Default::default()
    };
    let axes = polar_ppath(&two_column_end_path(), &opts, &mut fig, None).unwrap();

    assert_eq!(fig.axes(axes.lat.unwrap()).unwrap().lines().len(), 1);
    assert!(fig.axes(axes.lon.unwrap()).unwrap().lines().is_empty());
    assert!(fig.axes(axes.map.unwrap()).unwrap().lines().is_empty());
    assert_eq!(
        fig.axes(axes.map.unwrap()).unwrap().title(),
        Some("Latitude vs Longitude")
    );
}

#[test]
fn test_one_dimensional_record() {
    let mut fig = figure();
    let axes = polar_ppath(&one_dimensional_path(), &PpathPlotOptions::default(), &mut fig, None).unwrap();
    assert!(fig.axes(axes.lat.unwrap()).unwrap().lines().is_empty());
    assert!(fig.to_svg().contains("Latitude vs Altitude"));
}

// ============================================================================
// Re-drawing onto existing axes
// ============================================================================

#[test]
fn test_redraw_keeps_config_and_accumulates_lines() {
    let mut fig = figure();
    let opts = PpathPlotOptions {
        panels: PanelFlags::everything(),
        ..Default::default()
    };
    let record = antimeridian_path();
    let axes = polar_ppath(&record, &opts, &mut fig, None).unwrap();

    let first: Vec<_> = fig.all_axes().iter().map(|a| (a.config(), a.lines().len())).collect();
    let again = polar_ppath(&record, &opts, &mut fig, Some(axes)).unwrap();
    assert_eq!(again, axes);
    assert_eq!(fig.all_axes().len(), 5);

    for (ax, (config, count)) in fig.all_axes().iter().zip(first) {
        assert_eq!(ax.config(), config);
        assert_eq!(ax.lines().len(), 2 * count);
    }
}

#[test]
fn test_default_axes_reused_by_hand() {
    let mut fig = figure();
    let axes = default_axes(&mut fig, PanelFlags::default()).unwrap();
    polar_ppath(&antimeridian_path(), &PpathPlotOptions::default(), &mut fig, Some(axes)).unwrap();
    assert_eq!(fig.all_axes().len(), 3);
}

#[test]
fn test_requested_panel_without_axes_fails() {
    let mut fig = figure();
    let axes = default_axes(&mut fig, PanelFlags::default()).unwrap();
    let opts = PpathPlotOptions {
        panels: PanelFlags::everything(),
        ..Default::default()
    };
    let err = polar_ppath(&antimeridian_path(), &opts, &mut fig, Some(axes)).unwrap_err();
    assert!(matches!(err, PpathError::InvalidArgument { .. }));
}

// ============================================================================
// Lists of paths
// ============================================================================

#[test]
fn test_list_plots_end_points() {
    let paths = limb_path_list(4, 21);
    let mut fig = figure();
    let axes = polar_ppath_list(&paths, &PpathPlotOptions::for_list(), &mut fig, None).unwrap();

    let lat = fig.axes(axes.lat.unwrap()).unwrap();
    assert_eq!(lat.lines().len(), 1);
    assert_eq!(lat.lines()[0].y.len(), 4);
    assert_eq!(lat.lines()[0].style, LineStyle::Solid);
    assert!(axes.za.is_some());
}

#[test]
fn test_list_lowest_selection() {
    let paths = limb_path_list(3, 11);
    let mut fig = figure();
    let opts = PpathPlotOptions {
        select: SelectionMode::Lowest,
        ..PpathPlotOptions::for_list()
    };
    let axes = polar_ppath_list(&paths, &opts, &mut fig, None).unwrap();

    let lat = fig.axes(axes.lat.unwrap()).unwrap();
    // one tangent point per path, at 10, 15 and 20 km
    assert_eq!(lat.lines()[0].y, vec![10.0, 15.0, 20.0]);
}
