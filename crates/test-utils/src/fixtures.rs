//! Common path record fixtures.
//!
//! Each fixture reproduces one documented edge case of selection or
//! longitude segmentation.

use ppath_common::{PathRecord, SampleMatrix};

/// Mean Earth radius used by the fixtures (meters)
pub const EARTH_RADIUS: f64 = 6371e3;

/// Longitudes with a single jump across the antimeridian between index 1 and 2.
pub const ANTIMERIDIAN_LONS: [f64; 4] = [170.0, 175.0, -170.0, -175.0];

/// Latitudes paired with [`ANTIMERIDIAN_LONS`].
pub const ANTIMERIDIAN_LATS: [f64; 4] = [10.0, 11.0, 12.0, 13.0];

fn matrix(rows: &[&[f64]]) -> SampleMatrix {
    SampleMatrix::from_rows(rows).expect("fixture rows are rectangular")
}

/// Four-sample 3D path crossing the antimeridian.
pub fn antimeridian_path() -> PathRecord {
    let alts = [80e3, 40e3, 35e3, 70e3];
    let pos: Vec<Vec<f64>> = alts
        .iter()
        .zip(ANTIMERIDIAN_LATS)
        .zip(ANTIMERIDIAN_LONS)
        .map(|((&a, lat), lon)| vec![a, lat, lon])
        .collect();
    PathRecord {
        pos: SampleMatrix::from_rows(&pos).expect("fixture rows are rectangular"),
        los: matrix(&[&[95.0, 80.0], &[93.0, 82.0], &[91.0, 85.0], &[89.0, 88.0]]),
        r: alts.iter().map(|a| EARTH_RADIUS + a).collect(),
        start_pos: vec![70e3, 13.0, -175.0],
        start_los: vec![89.0, 88.0],
        end_pos: vec![80e3, 10.0, 170.0],
        end_los: vec![95.0, 80.0],
    }
}

/// Path with radii `[5, 2, 2, 9]`: two samples tie for the minimum.
pub fn tied_minimum_path() -> PathRecord {
    PathRecord {
        pos: matrix(&[
            &[5.0, 0.0, 10.0],
            &[2.0, 1.0, 11.0],
            &[2.0, 2.0, 12.0],
            &[9.0, 3.0, 13.0],
        ]),
        los: matrix(&[&[90.0, 0.0], &[91.0, 10.0], &[92.0, 20.0], &[93.0, 30.0]]),
        r: vec![5.0, 2.0, 2.0, 9.0],
        ..Default::default()
    }
}

/// Path whose start/end positions only carry radius and latitude.
pub fn two_column_end_path() -> PathRecord {
    PathRecord {
        pos: matrix(&[&[100.0, 5.0], &[50.0, 6.0]]),
        los: matrix(&[&[120.0], &[110.0]]),
        r: vec![100.0, 50.0],
        start_pos: vec![50.0, 6.0],
        start_los: vec![110.0],
        end_pos: vec![100.0, 5.0],
        end_los: vec![120.0],
    }
}

/// One dimensional atmosphere: radius only, zenith only.
pub fn one_dimensional_path() -> PathRecord {
    PathRecord {
        pos: matrix(&[&[60e3], &[30e3], &[10e3]]),
        los: matrix(&[&[100.0], &[95.0], &[90.0]]),
        r: vec![EARTH_RADIUS + 60e3, EARTH_RADIUS + 30e3, EARTH_RADIUS + 10e3],
        start_pos: vec![10e3],
        start_los: vec![90.0],
        end_pos: vec![60e3],
        end_los: vec![100.0],
    }
}
