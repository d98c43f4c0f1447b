//! Synthetic ECG waveform.
//!
//! A phase accumulator advances a fixed step per rendered frame. The phase,
//! taken modulo 2π, lands in one of five open intervals, one per PQRST
//! deflection, each with its own closed-form amplitude:
//!
//! ```text
//!  P (0, 0.5)     0.2·sin(10c)
//!  Q (0.5, 0.7)  -0.2
//!  R (0.7, 1.0)   1.5
//!  S (1.0, 1.2)  -0.4
//!  T (1.5, 2.5)   0.3·sin(3(c − 1.5))
//! ```
//!
//! Everything else, including the interval endpoints, the ST gap
//! `[1.2, 1.5]` and the diastolic tail `[2.5, 2π)`, is flat baseline.

use std::f64::consts::TAU;

use serde::Serialize;

use crate::config::WaveformConfig;
use crate::random::UniformSource;

/// Deflection of one cardiac cycle a phase falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Segment {
    P,
    Q,
    R,
    S,
    T,
    /// Between named deflections, amplitude 0.
    Baseline,
}

impl Segment {
    /// Open phase interval `(start, end)` of a named deflection.
    pub fn interval(self) -> Option<(f64, f64)> {
        match self {
            Self::P => Some((0.0, 0.5)),
            Self::Q => Some((0.5, 0.7)),
            Self::R => Some((0.7, 1.0)),
            Self::S => Some((1.0, 1.2)),
            Self::T => Some((1.5, 2.5)),
            Self::Baseline => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::P => "P",
            Self::Q => "Q",
            Self::R => "R",
            Self::S => "S",
            Self::T => "T",
            Self::Baseline => "-",
        }
    }
}

/// Position of `phase` within its cycle, in `[0, 2π)`.
pub fn cycle_position(phase: f64) -> f64 {
    phase.rem_euclid(TAU)
}

/// Segment containing cycle position `c`. Interval endpoints are baseline.
pub fn segment_at(c: f64) -> Segment {
    if c > 0.0 && c < 0.5 {
        Segment::P
    } else if c > 0.5 && c < 0.7 {
        Segment::Q
    } else if c > 0.7 && c < 1.0 {
        Segment::R
    } else if c > 1.0 && c < 1.2 {
        Segment::S
    } else if c > 1.5 && c < 2.5 {
        Segment::T
    } else {
        Segment::Baseline
    }
}

/// Noise-free amplitude at cycle position `c`.
pub fn pqrst_amplitude(c: f64) -> f64 {
    match segment_at(c) {
        Segment::P => 0.2 * (c * 10.0).sin(),
        Segment::Q => -0.2,
        Segment::R => 1.5,
        Segment::S => -0.4,
        Segment::T => 0.3 * ((c - 1.5) * 3.0).sin(),
        Segment::Baseline => 0.0,
    }
}

/// One generated waveform sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaveSample {
    /// Accumulated phase after the advance.
    pub phase: f64,
    pub segment: Segment,
    /// Amplitude including noise.
    pub value: f64,
}

/// Phase-accumulating PQRST generator.
#[derive(Debug, Clone)]
pub struct WaveformGenerator {
    phase: f64,
    step: f64,
    noise_amplitude: f64,
}

impl WaveformGenerator {
    pub fn new(step: f64, noise_amplitude: f64) -> Self {
        Self {
            phase: 0.0,
            step,
            noise_amplitude,
        }
    }

    pub fn from_config(config: &WaveformConfig) -> Self {
        Self::new(config.phase_step, config.noise_amplitude)
    }

    /// Advance one frame and produce a noisy sample.
    pub fn next_sample(&mut self, rng: &mut impl UniformSource) -> WaveSample {
        self.phase += self.step;
        let c = cycle_position(self.phase);
        let noise = (rng.next_uniform() - 0.5) * self.noise_amplitude;
        WaveSample {
            phase: self.phase,
            segment: segment_at(c),
            value: pqrst_amplitude(c) + noise,
        }
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Half-width of the noise band around the clean amplitude.
    pub fn noise_tolerance(&self) -> f64 {
        self.noise_amplitude / 2.0
    }
}

impl Default for WaveformGenerator {
    fn default() -> Self {
        Self::from_config(&WaveformConfig::default())
    }
}
