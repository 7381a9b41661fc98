//! Synthetic path generators.
//!
//! These create predictable limb-sounding geometries: the altitude falls to a
//! tangent point in the middle of the path and rises again, while latitude
//! and longitude advance linearly.

use ppath_common::{PathRecord, SampleMatrix};

use crate::fixtures::EARTH_RADIUS;

/// Wrap a longitude into [-180, 180).
pub fn wrap_lon(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Creates a limb path of `n` samples.
///
/// # Arguments
///
/// * `n` - Number of samples (at least 2 for a meaningful path)
/// * `tangent_alt` - Altitude at the middle sample (meters)
/// * `lon0` - Longitude of the first sample (degrees)
/// * `dlon` - Longitude step between samples (degrees), wrapped into [-180, 180)
///
/// # Example
///
/// ```
/// use test_utils::limb_path;
///
/// let path = limb_path(11, 20e3, 170.0, 2.0);
/// assert_eq!(path.nsamples(), 11);
/// assert_eq!(path.end_pos.len(), 3);
/// ```
pub fn limb_path(n: usize, tangent_alt: f64, lon0: f64, dlon: f64) -> PathRecord {
    let mid = (n.max(1) - 1) as f64 / 2.0;
    let mut pos = SampleMatrix::with_columns(3);
    let mut los = SampleMatrix::with_columns(2);
    let mut r = Vec::with_capacity(n);

    for i in 0..n {
        let t = i as f64 - mid;
        let alt = tangent_alt + 1e3 * t * t;
        let lat = -30.0 + 60.0 * i as f64 / n.max(2) as f64;
        let lon = wrap_lon(lon0 + dlon * i as f64);
        let za = 90.0 + t.signum() * (t.abs() / (mid + 1.0)) * 5.0;
        pos.push_row(&[alt, lat, lon]).expect("three columns");
        los.push_row(&[za, 45.0]).expect("two columns");
        r.push(EARTH_RADIUS + alt);
    }

    let first = pos.row(0).map(|v| v.to_vec()).unwrap_or_default();
    let last = n
        .checked_sub(1)
        .and_then(|i| pos.row(i))
        .map(|v| v.to_vec())
        .unwrap_or_default();
    let first_los = los.row(0).map(|v| v.to_vec()).unwrap_or_default();
    let last_los = n
        .checked_sub(1)
        .and_then(|i| los.row(i))
        .map(|v| v.to_vec())
        .unwrap_or_default();

    PathRecord {
        pos,
        los,
        r,
        start_pos: last,
        start_los: last_los,
        end_pos: first,
        end_los: first_los,
    }
}

/// Several limb paths with sensor longitudes spread around the globe.
pub fn limb_path_list(count: usize, samples: usize) -> Vec<PathRecord> {
    (0..count)
        .map(|k| limb_path(samples, 10e3 + 5e3 * k as f64, -150.0 + 60.0 * k as f64, 1.5))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_lon() {
        assert_eq!(wrap_lon(190.0), -170.0);
        assert_eq!(wrap_lon(-180.0), -180.0);
        assert_eq!(wrap_lon(45.0), 45.0);
    }

    #[test]
    fn test_limb_path_tangent_in_middle() {
        let path = limb_path(5, 20e3, 0.0, 1.0);
        let alt = path.pos.column(0).unwrap();
        assert_eq!(alt[2], 20e3);
        assert!(alt[0] > alt[2] && alt[4] > alt[2]);
        assert_eq!(path.r.len(), 5);
    }
}
