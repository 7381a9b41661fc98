//! SVG output for figures.
//!
//! Every axes is drawn into one SVG document sized to the tight bounds of
//! the figure, so axes placed partly outside the unit figure box are kept.

use geometry::ticks::{format_tick, nice_ceil, nice_ticks};
use geometry::{PolarFrame, ThetaZero};

use crate::axes::{Axes, CartesianSettings, Line, PolarSettings, Projection};
use crate::figure::Figure;
use crate::style::{Color, LineStyle};

const FONT_FAMILY: &str = "DejaVu Sans, Arial, Helvetica, sans-serif";

/// Extra room around the tight bounds for titles and tick labels (points).
const MARGIN_PT: f64 = 36.0;

/// Polar arcs are sampled this finely (radians).
const ARC_STEP: f64 = 0.02;

/// Pixel box of an axes, origin top-left.
#[derive(Debug, Clone, Copy)]
struct PxBox {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl PxBox {
    fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Escape text content for XML.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, Copy)]
enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Minimal SVG document builder.
struct SvgDoc {
    body: String,
    clip_count: usize,
}

impl SvgDoc {
    fn new() -> Self {
        Self {
            body: String::new(),
            clip_count: 0,
        }
    }

    fn polyline(&mut self, points: &[(f64, f64)], color: Color, width: f64, clip: Option<&str>) {
        if points.len() < 2 {
            return;
        }
        let pts: Vec<String> = points.iter().map(|(x, y)| format!("{:.2},{:.2}", x, y)).collect();
        let clip_attr = clip
            .map(|id| format!(" clip-path=\"url(#{})\"", id))
            .unwrap_or_default();
        self.body.push_str(&format!(
            "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-opacity=\"{:.3}\" stroke-width=\"{:.2}\" stroke-linejoin=\"round\" stroke-linecap=\"round\"{}/>\n",
            pts.join(" "),
            color.to_hex(),
            color.opacity(),
            width,
            clip_attr
        ));
    }

    fn line(&mut self, a: (f64, f64), b: (f64, f64), color: Color, width: f64) {
        self.polyline(&[a, b], color, width, None);
    }

    fn cross(&mut self, (x, y): (f64, f64), size: f64, color: Color, width: f64, clip: Option<&str>) {
        let h = size / 2.0;
        self.polyline(&[(x - h, y - h), (x + h, y + h)], color, width, clip);
        self.polyline(&[(x - h, y + h), (x + h, y - h)], color, width, clip);
    }

    fn rect(&mut self, b: &PxBox, stroke: Option<(Color, f64)>, fill: Option<Color>) {
        let fill_attr = fill.map(|c| c.to_hex()).unwrap_or_else(|| "none".to_string());
        let stroke_attr = match stroke {
            Some((c, w)) => format!(" stroke=\"{}\" stroke-width=\"{:.2}\"", c.to_hex(), w),
            None => String::new(),
        };
        self.body.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"{}/>\n",
            b.left, b.top, b.width, b.height, fill_attr, stroke_attr
        ));
    }

    fn clip_rect(&mut self, b: &PxBox) -> String {
        let id = format!("clip{}", self.clip_count);
        self.clip_count += 1;
        self.body.push_str(&format!(
            "<clipPath id=\"{}\"><rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"/></clipPath>\n",
            id, b.left, b.top, b.width, b.height
        ));
        id
    }

    fn text(&mut self, (x, y): (f64, f64), content: &str, size: f64, anchor: Anchor, rotate: Option<f64>) {
        let transform = rotate
            .map(|deg| format!(" transform=\"rotate({:.1} {:.2} {:.2})\"", deg, x, y))
            .unwrap_or_default();
        self.body.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{:.2}\" text-anchor=\"{}\" dominant-baseline=\"central\" fill=\"#000000\"{}>{}</text>\n",
            x,
            y,
            FONT_FAMILY,
            size,
            anchor.as_str(),
            transform,
            escape_xml(content)
        ));
    }
}

/// Render `figure` as a standalone SVG document.
pub fn render_figure(figure: &Figure) -> String {
    let opts = figure.options();
    let (w, h) = opts.pixel_size();
    let (x0, y0, x1, y1) = figure.tight_bounds();
    let margin = opts.pt(MARGIN_PT);

    let vx = x0 * w - margin;
    let vy = (1.0 - y1) * h - margin;
    let vw = (x1 - x0) * w + 2.0 * margin;
    let vh = (y1 - y0) * h + 2.0 * margin;

    let mut doc = SvgDoc::new();
    doc.rect(
        &PxBox {
            left: vx,
            top: vy,
            width: vw,
            height: vh,
        },
        None,
        Some(Color::WHITE),
    );

    for ax in figure.all_axes() {
        let r = ax.position();
        let b = PxBox {
            left: r.left * w,
            top: (1.0 - r.top()) * h,
            width: r.width * w,
            height: r.height * h,
        };
        match ax.projection() {
            Projection::Polar(p) => render_polar(&mut doc, figure, ax, p, &b),
            Projection::Cartesian(c) => render_cartesian(&mut doc, figure, ax, c, &b),
        }
    }

    tracing::debug!(
        axes = figure.all_axes().len(),
        width = vw,
        height = vh,
        "Rendered figure SVG"
    );

    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.0}\" height=\"{:.0}\" viewBox=\"{:.2} {:.2} {:.2} {:.2}\">\n{}</svg>\n",
        vw.ceil(),
        vh.ceil(),
        vx,
        vy,
        vw,
        vh,
        doc.body
    )
}

/// Radial limits of a polar axes: explicit values, otherwise autoscaled to
/// the data.
pub fn polar_limits(ax: &Axes, settings: &PolarSettings) -> (f64, f64) {
    let bounds = ax.data_bounds();
    let rmin = settings
        .rmin
        .unwrap_or_else(|| bounds.map(|(_, (y0, _))| y0.min(0.0)).unwrap_or(0.0));
    let rmax = settings.rmax.unwrap_or_else(|| match bounds {
        Some((_, (_, y1))) if y1 > rmin => nice_ceil(rmin, y1, 4),
        _ => rmin + 1.0,
    });
    if rmax > rmin {
        (rmin, rmax)
    } else {
        (rmin, rmin + 1.0)
    }
}

fn draw_series(doc: &mut SvgDoc, figure: &Figure, line: &Line, project: impl Fn(f64, f64) -> (f64, f64), clip: Option<&str>) {
    let opts = figure.options();
    let typo = figure.typography();
    let points: Vec<(f64, f64)> = line
        .x
        .iter()
        .zip(&line.y)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| project(x, y))
        .collect();
    match line.style {
        LineStyle::Solid => doc.polyline(&points, line.color, opts.pt(typo.line_width), clip),
        LineStyle::Cross => {
            for p in points {
                doc.cross(p, opts.pt(typo.marker_size), line.color, opts.pt(typo.line_width), clip);
            }
        }
    }
}

fn render_polar(doc: &mut SvgDoc, figure: &Figure, ax: &Axes, settings: &PolarSettings, b: &PxBox) {
    let opts = figure.options();
    let typo = figure.typography();
    let (rmin, rmax) = polar_limits(ax, settings);
    let radius = b.width.min(b.height) / 2.0;
    let frame = match PolarFrame::new(
        b.center(),
        radius,
        (rmin, rmax),
        settings.theta_zero,
        settings.theta_direction,
    ) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(error = %e, "Skipping polar axes with degenerate radial range");
            return;
        }
    };

    let (t0, t1) = settings.theta_lim;
    let full_circle = (t1 - t0).abs() >= 2.0 * std::f64::consts::PI - 1e-9;
    let grid_w = opts.pt(typo.grid_width);

    // Radial grid arcs
    for r in nice_ticks(rmin, rmax, 4).into_iter().filter(|&r| r > rmin) {
        doc.polyline(&frame.arc(r, t0, t1, ARC_STEP), Color::GRID, grid_w, None);
        if settings.r_tick_labels {
            let label_theta = t0 + (t1 - t0).signum() * 22.5f64.to_radians().min((t1 - t0).abs() / 2.0);
            doc.text(frame.project(label_theta, r), &format_tick(r), opts.pt(typo.tick_size), Anchor::Middle, None);
        }
    }

    // Angular grid spokes and labels
    let (lo, hi) = (t0.min(t1), t0.max(t1));
    let mut labelled: Vec<(f64, f64)> = Vec::new();
    for &deg in &settings.theta_grids_deg {
        let theta = deg.to_radians();
        if theta < lo - 1e-9 || theta > hi + 1e-9 {
            continue;
        }
        doc.line(frame.project_px(theta, 0.0), frame.project_px(theta, radius), Color::GRID, grid_w);
        let pos = frame.project_px(theta, radius + opts.pt(12.0));
        // full circles put -180 and 180 on the same spot
        if labelled.iter().any(|p| (p.0 - pos.0).abs() < 1.0 && (p.1 - pos.1).abs() < 1.0) {
            continue;
        }
        labelled.push(pos);
        doc.text(pos, &format!("{}°", format_tick(deg)), opts.pt(typo.tick_size), Anchor::Middle, None);
    }

    if ax.frame_on() {
        let mut outline = frame.arc(rmax, t0, t1, ARC_STEP);
        if !full_circle {
            outline.insert(0, frame.project_px(t0, 0.0));
            outline.push(frame.project_px(t1, 0.0));
        }
        doc.polyline(&outline, Color::BLACK, grid_w, None);
    }

    for line in ax.lines() {
        draw_series(doc, figure, line, |theta, r| frame.project(theta, r), None);
    }

    let (cx, cy) = b.center();
    if let Some(title) = ax.title() {
        doc.text((cx, cy - radius - opts.pt(26.0)), title, opts.pt(typo.title_size), Anchor::Middle, None);
    }
    if let Some(label) = ax.ylabel() {
        let x = match settings.theta_zero {
            ThetaZero::E | ThetaZero::W => cx - radius - opts.pt(30.0),
            ThetaZero::N | ThetaZero::S => cx - radius - opts.pt(24.0),
        };
        doc.text((x, cy), label, opts.pt(typo.label_size), Anchor::Middle, Some(-90.0));
    }
    if let Some(label) = ax.xlabel() {
        doc.text((cx, cy + radius + opts.pt(26.0)), label, opts.pt(typo.label_size), Anchor::Middle, None);
    }
}

/// Axis limits of a Cartesian axes: explicit values, otherwise the data
/// range padded by 5%.
pub fn cartesian_limits(ax: &Axes, settings: &CartesianSettings) -> ((f64, f64), (f64, f64)) {
    fn pad((lo, hi): (f64, f64)) -> (f64, f64) {
        if hi > lo {
            let m = (hi - lo) * 0.05;
            (lo - m, hi + m)
        } else {
            (lo - 0.5, hi + 0.5)
        }
    }
    let bounds = ax.data_bounds();
    let xlim = settings
        .xlim
        .unwrap_or_else(|| bounds.map(|(x, _)| pad(x)).unwrap_or((0.0, 1.0)));
    let ylim = settings
        .ylim
        .unwrap_or_else(|| bounds.map(|(_, y)| pad(y)).unwrap_or((0.0, 1.0)));
    (xlim, ylim)
}

fn render_cartesian(doc: &mut SvgDoc, figure: &Figure, ax: &Axes, settings: &CartesianSettings, b: &PxBox) {
    let opts = figure.options();
    let typo = figure.typography();
    let ((x0, x1), (y0, y1)) = cartesian_limits(ax, settings);

    // Shrink the box to honour the aspect ratio, keeping it centred.
    let mut plot = *b;
    if let Some(aspect) = settings.aspect {
        let want = aspect * (y1 - y0).abs() / (x1 - x0).abs();
        if want.is_finite() && want > 0.0 {
            if b.height / b.width > want {
                plot.height = b.width * want;
                plot.top = b.top + (b.height - plot.height) / 2.0;
            } else {
                plot.width = b.height / want;
                plot.left = b.left + (b.width - plot.width) / 2.0;
            }
        }
    }

    let to_px = |x: f64, y: f64| {
        (
            plot.left + (x - x0) / (x1 - x0) * plot.width,
            plot.top + (1.0 - (y - y0) / (y1 - y0)) * plot.height,
        )
    };

    let tick_len = opts.pt(3.5);
    let tick_w = opts.pt(typo.grid_width);
    let tick_size = opts.pt(typo.tick_size);
    let bottom = plot.top + plot.height;

    let xticks = settings.xticks.clone().unwrap_or_else(|| nice_ticks(x0.min(x1), x0.max(x1), 6));
    for x in xticks {
        let (px, _) = to_px(x, y0);
        doc.line((px, bottom), (px, bottom + tick_len), Color::BLACK, tick_w);
        doc.text((px, bottom + tick_len + tick_size * 0.8), &format_tick(x), tick_size, Anchor::Middle, None);
    }
    let yticks = settings.yticks.clone().unwrap_or_else(|| nice_ticks(y0.min(y1), y0.max(y1), 6));
    for y in yticks {
        let (_, py) = to_px(x0, y);
        doc.line((plot.left - tick_len, py), (plot.left, py), Color::BLACK, tick_w);
        doc.text((plot.left - tick_len - opts.pt(2.0), py), &format_tick(y), tick_size, Anchor::End, None);
    }

    let clip = doc.clip_rect(&plot);
    for line in ax.lines() {
        draw_series(doc, figure, line, to_px, Some(&clip));
    }

    if ax.frame_on() {
        doc.rect(&plot, Some((Color::BLACK, tick_w)), None);
    }

    let cx = plot.left + plot.width / 2.0;
    if let Some(title) = ax.title() {
        doc.text((cx, plot.top - opts.pt(10.0)), title, opts.pt(typo.title_size), Anchor::Middle, None);
    }
    if let Some(label) = ax.xlabel() {
        doc.text((cx, bottom + tick_len + tick_size * 2.3), label, opts.pt(typo.label_size), Anchor::Middle, None);
    }
    if let Some(label) = ax.ylabel() {
        doc.text(
            (plot.left - tick_len - tick_size * 2.8, plot.top + plot.height / 2.0),
            label,
            opts.pt(typo.label_size),
            Anchor::Middle,
            Some(-90.0),
        );
    }
}
