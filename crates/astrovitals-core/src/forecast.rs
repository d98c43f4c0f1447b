//! Static heart-rate forecast shown beside the live charts.
//!
//! The numbers are fixed; no model runs behind them.

use serde::Serialize;

/// Horizon labels, nearest first.
pub const LABELS: [&str; 9] = ["Now", "+1h", "+2h", "+3h", "+4h", "+5h", "+6h", "+12h", "+24h"];

/// Predicted heart rate (bpm) per horizon.
pub const PREDICTED: [f64; 9] = [72.0, 74.0, 73.0, 75.0, 76.0, 74.0, 72.0, 70.0, 72.0];

/// Lower confidence band.
pub const LOWER: [f64; 9] = [68.0, 70.0, 69.0, 71.0, 72.0, 70.0, 68.0, 66.0, 68.0];

/// Upper confidence band.
pub const UPPER: [f64; 9] = [76.0, 78.0, 77.0, 79.0, 80.0, 78.0, 76.0, 74.0, 76.0];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub label: &'static str,
    pub predicted: f64,
    pub lower: f64,
    pub upper: f64,
}

/// All forecast points in horizon order.
pub fn points() -> Vec<ForecastPoint> {
    (0..LABELS.len())
        .map(|i| ForecastPoint {
            label: LABELS[i],
            predicted: PREDICTED[i],
            lower: LOWER[i],
            upper: UPPER[i],
        })
        .collect()
}

/// `(index, value)` pairs for one band, for chart datasets.
pub fn series(values: &[f64; 9]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect()
}

/// Y range covering both bands with a little headroom.
pub fn y_bounds() -> (f64, f64) {
    let lo = LOWER.iter().copied().fold(f64::MAX, f64::min);
    let hi = UPPER.iter().copied().fold(f64::MIN, f64::max);
    (lo - 2.0, hi + 2.0)
}
