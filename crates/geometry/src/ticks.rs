//! Tick and grid value generation.

use crate::error::{GeometryError, GeometryResult};

/// Values `start, start + step, ...` strictly below `stop`.
pub fn arange(start: f64, stop: f64, step: f64) -> GeometryResult<Vec<f64>> {
    if step == 0.0 || !step.is_finite() {
        return Err(GeometryError::InvalidRange(format!("step must be non-zero, got {}", step)));
    }
    let n = ((stop - start) / step).ceil();
    if !(n > 0.0) {
        return Ok(Vec::new());
    }
    Ok((0..n as usize).map(|i| start + step * i as f64).collect())
}

/// `n` evenly spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// A "nice" step (1, 2, 2.5 or 5 times a power of ten) giving at most about
/// `target` intervals over `range`.
pub fn nice_step(range: f64, target: usize) -> f64 {
    if !(range > 0.0) || !range.is_finite() {
        return 1.0;
    }
    let raw = range / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 2.5 {
        2.5
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Tick positions on nice steps inside `[min, max]`.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    let step = nice_step(max - min, target);
    let first = (min / step).ceil() * step;
    let eps = step * 1e-9;
    let mut ticks = Vec::new();
    let mut k = 0;
    loop {
        let v = first + step * k as f64;
        if v > max + eps || k > 1000 {
            break;
        }
        ticks.push(if v.abs() < eps { 0.0 } else { v });
        k += 1;
    }
    ticks
}

/// Round `max` up to the next nice step above `min`.
pub fn nice_ceil(min: f64, max: f64, target: usize) -> f64 {
    let step = nice_step(max - min, target);
    let up = (max / step).ceil() * step;
    if up > min {
        up
    } else {
        min + step
    }
}

/// Short label for a tick value: integers without decimals, otherwise up to
/// three decimals with trailing zeros trimmed.
pub fn format_tick(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        let rounded = v.round();
        // avoid "-0"
        return format!("{}", if rounded == 0.0 { 0.0 } else { rounded });
    }
    let s = format!("{:.3}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
