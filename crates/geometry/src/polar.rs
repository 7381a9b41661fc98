//! Polar coordinate frames.
//!
//! Maps (theta, r) data coordinates onto screen pixels, following the usual
//! polar-axes conventions: theta is measured from a configurable zero
//! location, counterclockwise for direction +1 and clockwise for -1, and the
//! radial axis starts at `rmin` in the centre.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{GeometryError, GeometryResult};

/// Where theta = 0 points on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThetaZero {
    /// East (to the right)
    #[default]
    E,
    /// North (up)
    N,
    /// West (to the left)
    W,
    /// South (down)
    S,
}

impl ThetaZero {
    /// Screen angle of theta = 0, counterclockwise from east (radians).
    pub fn offset(&self) -> f64 {
        match self {
            ThetaZero::E => 0.0,
            ThetaZero::N => FRAC_PI_2,
            ThetaZero::W => PI,
            ThetaZero::S => -FRAC_PI_2,
        }
    }
}

/// Placement of a polar plot on a pixel canvas (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarFrame {
    /// Centre x in pixels
    pub cx: f64,
    /// Centre y in pixels
    pub cy: f64,
    /// Pixel radius of `rmax`
    pub radius: f64,
    pub rmin: f64,
    pub rmax: f64,
    pub zero: ThetaZero,
    /// +1 counterclockwise, -1 clockwise
    pub direction: f64,
}

impl PolarFrame {
    pub fn new(
        (cx, cy): (f64, f64),
        radius: f64,
        (rmin, rmax): (f64, f64),
        zero: ThetaZero,
        direction: f64,
    ) -> GeometryResult<Self> {
        if !(rmax > rmin) {
            return Err(GeometryError::InvalidRange(format!(
                "rmax ({}) must exceed rmin ({})",
                rmax, rmin
            )));
        }
        Ok(Self {
            cx,
            cy,
            radius,
            rmin,
            rmax,
            zero,
            direction: if direction < 0.0 { -1.0 } else { 1.0 },
        })
    }

    /// Screen angle for data angle `theta`, counterclockwise from east.
    pub fn screen_angle(&self, theta: f64) -> f64 {
        self.zero.offset() + self.direction * theta
    }

    /// Pixel distance from the centre for data radius `r`.
    pub fn radial_px(&self, r: f64) -> f64 {
        (r - self.rmin) / (self.rmax - self.rmin) * self.radius
    }

    /// Pixel position of `(theta, r)`.
    pub fn project(&self, theta: f64, r: f64) -> (f64, f64) {
        self.project_px(theta, self.radial_px(r))
    }

    /// Pixel position at angle `theta` and pixel distance `rho`.
    pub fn project_px(&self, theta: f64, rho: f64) -> (f64, f64) {
        let phi = self.screen_angle(theta);
        (self.cx + rho * phi.cos(), self.cy - rho * phi.sin())
    }

    /// Points along an arc of data radius `r` from `theta0` to `theta1`,
    /// sampled at most `step` radians apart.
    pub fn arc(&self, r: f64, theta0: f64, theta1: f64, step: f64) -> Vec<(f64, f64)> {
        let span = theta1 - theta0;
        let n = ((span.abs() / step.max(1e-6)).ceil() as usize).max(1);
        (0..=n)
            .map(|i| self.project(theta0 + span * i as f64 / n as f64, r))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(zero: ThetaZero, direction: f64) -> PolarFrame {
        PolarFrame::new((100.0, 100.0), 50.0, (0.0, 1.0), zero, direction).unwrap()
    }

    fn assert_close(a: (f64, f64), b: (f64, f64)) {
        assert!((a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_east_zero_counterclockwise() {
        let f = frame(ThetaZero::E, 1.0);
        assert_close(f.project(0.0, 1.0), (150.0, 100.0));
        assert_close(f.project(FRAC_PI_2, 1.0), (100.0, 50.0));
    }

    #[test]
    fn test_north_zero_clockwise() {
        let f = frame(ThetaZero::N, -1.0);
        assert_close(f.project(0.0, 1.0), (100.0, 50.0));
        // 90 degrees clockwise from north is east
        assert_close(f.project(FRAC_PI_2, 1.0), (150.0, 100.0));
    }

    #[test]
    fn test_south_zero() {
        let f = frame(ThetaZero::S, 1.0);
        assert_close(f.project(0.0, 1.0), (100.0, 150.0));
    }

    #[test]
    fn test_rmin_maps_to_centre() {
        let f = PolarFrame::new((0.0, 0.0), 10.0, (6371.0, 6471.0), ThetaZero::E, 1.0).unwrap();
        assert_close(f.project(1.0, 6371.0), (0.0, 0.0));
        assert!((f.radial_px(6421.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_range() {
        assert!(PolarFrame::new((0.0, 0.0), 10.0, (1.0, 1.0), ThetaZero::E, 1.0).is_err());
    }

    #[test]
    fn test_arc_endpoints() {
        let f = frame(ThetaZero::E, 1.0);
        let pts = f.arc(1.0, 0.0, PI, 0.1);
        assert_close(pts[0], (150.0, 100.0));
        assert_close(*pts.last().unwrap(), (50.0, 100.0));
    }
}
