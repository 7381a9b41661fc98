//! Retained-mode axes: projection settings, labels and plotted lines.

use std::f64::consts::PI;

use geometry::ThetaZero;
use ppath_common::{PpathError, PpathResult};

use crate::style::{Color, LineStyle, DEFAULT_CYCLE};

/// Axes box in normalized figure coordinates, origin at the bottom left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            bottom,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn top(&self) -> f64 {
        self.bottom + self.height
    }
}

impl From<[f64; 4]> for Rect {
    fn from(v: [f64; 4]) -> Self {
        Rect::new(v[0], v[1], v[2], v[3])
    }
}

/// Settings of a polar axes. Angles are in radians unless named `_deg`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarSettings {
    pub theta_zero: ThetaZero,
    /// +1 counterclockwise, -1 clockwise
    pub theta_direction: f64,
    pub theta_lim: (f64, f64),
    pub rmin: Option<f64>,
    pub rmax: Option<f64>,
    pub theta_grids_deg: Vec<f64>,
    pub r_tick_labels: bool,
}

impl Default for PolarSettings {
    fn default() -> Self {
        Self {
            theta_zero: ThetaZero::E,
            theta_direction: 1.0,
            theta_lim: (0.0, 2.0 * PI),
            rmin: None,
            rmax: None,
            theta_grids_deg: (0..8).map(|i| 45.0 * i as f64).collect(),
            r_tick_labels: true,
        }
    }
}

impl PolarSettings {
    pub fn set_theta_zero_location(&mut self, zero: ThetaZero) {
        self.theta_zero = zero;
    }

    pub fn set_theta_direction(&mut self, direction: f64) {
        self.theta_direction = if direction < 0.0 { -1.0 } else { 1.0 };
    }

    pub fn set_thetalim(&mut self, min: f64, max: f64) {
        self.theta_lim = (min, max);
    }

    pub fn set_thetagrids(&mut self, degrees: Vec<f64>) {
        self.theta_grids_deg = degrees;
    }

    pub fn set_rmin(&mut self, rmin: f64) {
        self.rmin = Some(rmin);
    }

    pub fn set_rmax(&mut self, rmax: f64) {
        self.rmax = Some(rmax);
    }

    /// Hide (or show) the radial tick labels.
    pub fn set_r_tick_labels(&mut self, visible: bool) {
        self.r_tick_labels = visible;
    }
}

/// Settings of a Cartesian axes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartesianSettings {
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub xticks: Option<Vec<f64>>,
    pub yticks: Option<Vec<f64>>,
    /// Ratio of y-unit to x-unit length on screen
    pub aspect: Option<f64>,
}

impl CartesianSettings {
    pub fn set_xlim(&mut self, min: f64, max: f64) {
        self.xlim = Some((min, max));
    }

    pub fn set_ylim(&mut self, min: f64, max: f64) {
        self.ylim = Some((min, max));
    }

    pub fn set_xticks(&mut self, ticks: Vec<f64>) {
        self.xticks = Some(ticks);
    }

    pub fn set_yticks(&mut self, ticks: Vec<f64>) {
        self.yticks = Some(ticks);
    }

    pub fn set_aspect(&mut self, aspect: f64) {
        self.aspect = Some(aspect);
    }
}

/// Coordinate system of an axes.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Polar(PolarSettings),
    Cartesian(CartesianSettings),
}

impl Projection {
    pub fn polar() -> Self {
        Projection::Polar(PolarSettings::default())
    }

    pub fn cartesian() -> Self {
        Projection::Cartesian(CartesianSettings::default())
    }
}

/// A plotted data series. For polar axes `x` is theta and `y` is r.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub style: LineStyle,
    pub color: Color,
}

/// One set of axes inside a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    projection: Projection,
    position: Rect,
    title: Option<String>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    frame_on: bool,
    lines: Vec<Line>,
    cycle_index: usize,
}

/// Everything about an axes except its plotted lines.
#[derive(Debug, Clone, PartialEq)]
pub struct AxesConfig {
    pub projection: Projection,
    pub position: Rect,
    pub title: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub frame_on: bool,
}

impl Axes {
    pub fn new(projection: Projection, position: Rect) -> Self {
        Self {
            projection,
            position,
            title: None,
            xlabel: None,
            ylabel: None,
            frame_on: true,
            lines: Vec::new(),
            cycle_index: 0,
        }
    }

    /// Append a series using the next colour of the cycle. Returns the colour.
    pub fn plot(&mut self, x: Vec<f64>, y: Vec<f64>, style: LineStyle) -> PpathResult<Color> {
        let color = DEFAULT_CYCLE[self.cycle_index % DEFAULT_CYCLE.len()];
        self.push_line(x, y, style, color)?;
        self.cycle_index += 1;
        Ok(color)
    }

    /// Append a series with an explicit colour; the cycle does not advance.
    pub fn plot_with_color(
        &mut self,
        x: Vec<f64>,
        y: Vec<f64>,
        style: LineStyle,
        color: Color,
    ) -> PpathResult<()> {
        self.push_line(x, y, style, color)
    }

    fn push_line(&mut self, x: Vec<f64>, y: Vec<f64>, style: LineStyle, color: Color) -> PpathResult<()> {
        if x.len() != y.len() {
            return Err(PpathError::ShapeMismatch(format!(
                "x has {} values but y has {}",
                x.len(),
                y.len()
            )));
        }
        self.lines.push(Line { x, y, style, color });
        Ok(())
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn polar(&self) -> Option<&PolarSettings> {
        match &self.projection {
            Projection::Polar(p) => Some(p),
            Projection::Cartesian(_) => None,
        }
    }

    pub fn polar_mut(&mut self) -> PpathResult<&mut PolarSettings> {
        match &mut self.projection {
            Projection::Polar(p) => Ok(p),
            Projection::Cartesian(_) => Err(PpathError::invalid(
                "axes",
                "expected polar axes, got cartesian",
            )),
        }
    }

    pub fn cartesian(&self) -> Option<&CartesianSettings> {
        match &self.projection {
            Projection::Cartesian(c) => Some(c),
            Projection::Polar(_) => None,
        }
    }

    pub fn cartesian_mut(&mut self) -> PpathResult<&mut CartesianSettings> {
        match &mut self.projection {
            Projection::Cartesian(c) => Ok(c),
            Projection::Polar(_) => Err(PpathError::invalid(
                "axes",
                "expected cartesian axes, got polar",
            )),
        }
    }

    pub fn position(&self) -> Rect {
        self.position
    }

    pub fn set_position(&mut self, rect: impl Into<Rect>) {
        self.position = rect.into();
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn xlabel(&self) -> Option<&str> {
        self.xlabel.as_deref()
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.xlabel = Some(label.into());
    }

    pub fn ylabel(&self) -> Option<&str> {
        self.ylabel.as_deref()
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.ylabel = Some(label.into());
    }

    pub fn frame_on(&self) -> bool {
        self.frame_on
    }

    pub fn set_frame_on(&mut self, on: bool) {
        self.frame_on = on;
    }

    /// Snapshot of the axis configuration, for comparing re-draws.
    pub fn config(&self) -> AxesConfig {
        AxesConfig {
            projection: self.projection.clone(),
            position: self.position,
            title: self.title.clone(),
            xlabel: self.xlabel.clone(),
            ylabel: self.ylabel.clone(),
            frame_on: self.frame_on,
        }
    }

    /// Finite (x, y) extents over all lines.
    pub fn data_bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut bounds: Option<((f64, f64), (f64, f64))> = None;
        for line in &self.lines {
            for (&x, &y) in line.x.iter().zip(&line.y) {
                if !x.is_finite() || !y.is_finite() {
                    continue;
                }
                bounds = Some(match bounds {
                    None => ((x, x), (y, y)),
                    Some(((x0, x1), (y0, y1))) => ((x0.min(x), x1.max(x)), (y0.min(y), y1.max(y))),
                });
            }
        }
        bounds
    }
}
