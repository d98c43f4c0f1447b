//! Fixed-length sliding windows backing the live charts.

use std::collections::VecDeque;

/// Number of samples in the heart-rate trend chart.
pub const TREND_LEN: usize = 20;

/// Number of samples in the ECG waveform chart.
pub const WAVEFORM_LEN: usize = 100;

/// A fixed-capacity series where every push displaces the oldest sample.
///
/// The window is created full and its length never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct SlidingWindow {
    samples: VecDeque<f64>,
}

impl SlidingWindow {
    /// Create a window of `len` samples, all set to `fill`.
    ///
    /// A zero length is bumped to one so the window always has a newest sample.
    pub fn filled(len: usize, fill: f64) -> Self {
        let len = len.max(1);
        Self {
            samples: std::iter::repeat_n(fill, len).collect(),
        }
    }

    /// Drop the oldest sample and append `value`.
    pub fn push(&mut self, value: f64) {
        self.samples.pop_front();
        self.samples.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recently pushed sample.
    pub fn latest(&self) -> f64 {
        self.samples.back().copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// `(index, value)` pairs in oldest-to-newest order, ready for a chart dataset.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }
}
