// File: crates/forecast-core/src/grid.rs
// Summary: Tick layout helpers shared by the height and energy axes.

use crate::types::round_to;

/// `steps` evenly spaced values from `start` to `end` inclusive, rounded to `decimals`.
/// Fewer than two steps still yields both endpoints.
pub fn linspace(start: f64, end: f64, steps: usize, decimals: i32) -> Vec<f64> {
    if steps < 2 { return vec![round_to(start, decimals), round_to(end, decimals)]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| round_to(start + step * i as f64, decimals)).collect()
}

/// Ticks at `step` intervals from `first` through `last` inclusive.
pub fn ticks_by_step(first: f64, last: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !first.is_finite() || !last.is_finite() || first > last {
        return vec![round_to(first, 2)];
    }
    // integer stepping avoids accumulated float drift
    let count = ((last - first) / step + 1e-9).floor() as usize + 1;
    (0..count).map(|i| round_to(first + step * i as f64, 2)).collect()
}
