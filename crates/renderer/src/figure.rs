//! Figures: the drawing surface that owns axes and renders them.

use serde::{Deserialize, Serialize};
use std::path::Path;

use ppath_common::{PpathError, PpathResult};

use crate::axes::{Axes, Projection, Rect};
use crate::style::Typography;

/// Figure size and resolution. Passed by value per figure; never shared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureOptions {
    pub dpi: f64,
    /// Width in inches
    pub width: f64,
    /// Height in inches
    pub height: f64,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self {
            dpi: 300.0,
            width: 6.4,
            height: 4.8,
        }
    }
}

impl FigureOptions {
    pub fn with_dpi(dpi: f64) -> Self {
        Self {
            dpi,
            ..Default::default()
        }
    }

    /// Figure size in pixels (before tight cropping).
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.width * self.dpi, self.height * self.dpi)
    }

    /// Points to pixels at this resolution.
    pub fn pt(&self, points: f64) -> f64 {
        points * self.dpi / 72.0
    }
}

/// Handle to an axes owned by a [`Figure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxesId(usize);

impl AxesId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Subplot grid spacing, in figure fractions.
const SUBPLOT_LEFT: f64 = 0.125;
const SUBPLOT_RIGHT: f64 = 0.9;
const SUBPLOT_BOTTOM: f64 = 0.11;
const SUBPLOT_TOP: f64 = 0.88;
const SUBPLOT_WSPACE: f64 = 0.2;
const SUBPLOT_HSPACE: f64 = 0.2;

/// Normalized box of cell `index` (1-based, row major) in an `nrows` x
/// `ncols` grid.
pub fn subplot_rect(nrows: usize, ncols: usize, index: usize) -> PpathResult<Rect> {
    if nrows == 0 || ncols == 0 {
        return Err(PpathError::invalid(
            "subplot",
            format!("grid must be at least 1x1, got {}x{}", nrows, ncols),
        ));
    }
    if index == 0 || index > nrows * ncols {
        return Err(PpathError::invalid(
            "subplot",
            format!("index {} outside 1..={}", index, nrows * ncols),
        ));
    }

    let cell_w = (SUBPLOT_RIGHT - SUBPLOT_LEFT) / (ncols as f64 + SUBPLOT_WSPACE * (ncols - 1) as f64);
    let cell_h = (SUBPLOT_TOP - SUBPLOT_BOTTOM) / (nrows as f64 + SUBPLOT_HSPACE * (nrows - 1) as f64);
    let row = (index - 1) / ncols;
    let col = (index - 1) % ncols;

    let left = SUBPLOT_LEFT + col as f64 * cell_w * (1.0 + SUBPLOT_WSPACE);
    let top = SUBPLOT_TOP - row as f64 * cell_h * (1.0 + SUBPLOT_HSPACE);
    Ok(Rect::new(left, top - cell_h, cell_w, cell_h))
}

/// A figure holding any number of axes.
#[derive(Debug, Clone)]
pub struct Figure {
    options: FigureOptions,
    typography: Typography,
    axes: Vec<Axes>,
}

impl Figure {
    pub fn new(options: FigureOptions) -> Self {
        Self {
            options,
            typography: Typography::default(),
            axes: Vec::new(),
        }
    }

    pub fn options(&self) -> &FigureOptions {
        &self.options
    }

    pub fn typography(&self) -> &Typography {
        &self.typography
    }

    /// Add an axes at an explicit normalized position.
    pub fn add_axes(&mut self, rect: impl Into<Rect>, projection: Projection) -> AxesId {
        self.axes.push(Axes::new(projection, rect.into()));
        AxesId(self.axes.len() - 1)
    }

    /// Add an axes in cell `index` of an `nrows` x `ncols` grid.
    pub fn add_subplot(
        &mut self,
        nrows: usize,
        ncols: usize,
        index: usize,
        projection: Projection,
    ) -> PpathResult<AxesId> {
        let rect = subplot_rect(nrows, ncols, index)?;
        Ok(self.add_axes(rect, projection))
    }

    pub fn axes(&self, id: AxesId) -> PpathResult<&Axes> {
        self.axes.get(id.0).ok_or(PpathError::UnknownAxes(id.0))
    }

    pub fn axes_mut(&mut self, id: AxesId) -> PpathResult<&mut Axes> {
        self.axes.get_mut(id.0).ok_or(PpathError::UnknownAxes(id.0))
    }

    pub fn all_axes(&self) -> &[Axes] {
        &self.axes
    }

    /// Normalized bounds covering the figure and every axes box:
    /// `(xmin, ymin, xmax, ymax)`.
    pub fn tight_bounds(&self) -> (f64, f64, f64, f64) {
        self.axes.iter().fold((0.0, 0.0, 1.0, 1.0), |(x0, y0, x1, y1), ax| {
            let r = ax.position();
            (x0.min(r.left), y0.min(r.bottom), x1.max(r.right()), y1.max(r.top()))
        })
    }

    /// Render to an SVG document.
    pub fn to_svg(&self) -> String {
        crate::svg::render_figure(self)
    }

    /// Render to PNG bytes.
    pub fn to_png(&self) -> PpathResult<Vec<u8>> {
        let svg = self.to_svg();
        let pixmap = crate::png::rasterize_svg(&svg)?;
        crate::png::encode_pixmap(&pixmap)
    }

    /// Write the figure to `path`; the format follows the extension
    /// (`.svg` or `.png`).
    pub fn save(&self, path: impl AsRef<Path>) -> PpathResult<()> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let bytes = match ext.as_deref() {
            Some("svg") => self.to_svg().into_bytes(),
            Some("png") => self.to_png()?,
            other => {
                return Err(PpathError::invalid(
                    "output",
                    format!("unsupported figure format {:?} for {}", other, path.display()),
                ))
            }
        };
        std::fs::write(path, &bytes)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "Saved figure");
        Ok(())
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::new(FigureOptions::default())
    }
}
