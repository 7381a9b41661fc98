//! Longitude unwrapping for map plots.
//!
//! A path that crosses the antimeridian jumps from about +180 to about -180
//! degrees between two samples. Drawn as one polyline that jump becomes a
//! line across the whole map, so the samples are split into runs that never
//! step more than half a turn.

use num_traits::Float;

use crate::error::{GeometryError, GeometryResult};

/// One contiguous run of `(longitudes, latitudes)`.
pub type LongitudeSegment<T> = (Vec<T>, Vec<T>);

fn half_turn<T: Float + From<u8>>() -> T {
    <T as From<u8>>::from(180)
}

/// Indices `i` where `|lon[i + 1] - lon[i]| > 180`.
///
/// Raw differences only: no shortest-arc wrapping is applied.
pub fn longitude_breaks<T: Float + From<u8>>(lon: &[T]) -> Vec<usize> {
    let limit = half_turn::<T>();
    lon.windows(2)
        .enumerate()
        .filter(|(_, w)| (w[1] - w[0]).abs() > limit)
        .map(|(i, _)| i)
        .collect()
}

/// Split parallel longitude/latitude sequences at antimeridian jumps.
///
/// Without any jump the input comes back as a single segment. Otherwise each
/// segment runs from the previous break up to and including the sample
/// before the next jump, and the final segment stops one sample short of the
/// end: the last sample of the input is not part of the output.
///
/// ```
/// use geometry::unwrap_lon;
///
/// let segments = unwrap_lon(&[170.0, 175.0, -170.0, -175.0], &[0.0, 1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].0, vec![170.0, 175.0]);
/// assert_eq!(segments[1].0, vec![-170.0]);
/// ```
pub fn unwrap_lon<T: Float + From<u8>>(
    lon: &[T],
    lat: &[T],
) -> GeometryResult<Vec<LongitudeSegment<T>>> {
    if lon.len() != lat.len() {
        return Err(GeometryError::LengthMismatch {
            lon: lon.len(),
            lat: lat.len(),
        });
    }

    let breaks = longitude_breaks(lon);
    if breaks.is_empty() {
        return Ok(vec![(lon.to_vec(), lat.to_vec())]);
    }

    let mut segments = Vec::with_capacity(breaks.len() + 1);
    let mut start = 0;
    for b in breaks {
        let end = b + 1;
        segments.push((lon[start..end].to_vec(), lat[start..end].to_vec()));
        start = end;
    }
    // Closing segment stops before the final sample.
    let last = lon.len() - 1;
    segments.push((lon[start..last].to_vec(), lat[start..last].to_vec()));

    tracing::debug!(
        samples = lon.len(),
        segments = segments.len(),
        "Split longitudes at antimeridian"
    );

    Ok(segments)
}
