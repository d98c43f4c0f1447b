//! Bounded random-walk simulation of the six crew vital signs.
//!
//! Each tick perturbs every metric by `(u - 0.5) * noise` for a uniform draw
//! `u`. Heart rate, SpO2, temperature and respiration are clamped to their
//! bounds; the two blood-pressure components drift freely and are shown
//! together as `"sys/dia"`.

use serde::{Deserialize, Serialize};

use crate::config::MetricsConfig;
use crate::random::UniformSource;

// ---------------------------------------------------------------------------
// MetricKind
// ---------------------------------------------------------------------------

/// The six simulated vital signs, in update order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    HeartRate,
    Spo2,
    Temperature,
    Respiration,
    BpSystolic,
    BpDiastolic,
}

impl MetricKind {
    /// All kinds in the order a tick updates them.
    pub const ALL: [MetricKind; 6] = [
        Self::HeartRate,
        Self::Spo2,
        Self::Temperature,
        Self::Respiration,
        Self::BpSystolic,
        Self::BpDiastolic,
    ];

    /// Short config key.
    pub fn key(self) -> &'static str {
        match self {
            Self::HeartRate => "bpm",
            Self::Spo2 => "spo2",
            Self::Temperature => "temp",
            Self::Respiration => "resp",
            Self::BpSystolic => "bp_sys",
            Self::BpDiastolic => "bp_dia",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::HeartRate => "Heart Rate",
            Self::Spo2 => "SpO2",
            Self::Temperature => "Body Temp",
            Self::Respiration => "Respiration",
            Self::BpSystolic => "BP Systolic",
            Self::BpDiastolic => "BP Diastolic",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::HeartRate => "bpm",
            Self::Spo2 => "%",
            Self::Temperature => "°C",
            Self::Respiration => "rpm",
            Self::BpSystolic | Self::BpDiastolic => "mmHg",
        }
    }

    /// Blood pressure drifts unclamped; everything else stays in bounds.
    pub fn is_clamped(self) -> bool {
        !matches!(self, Self::BpSystolic | Self::BpDiastolic)
    }

    fn index(self) -> usize {
        match self {
            Self::HeartRate => 0,
            Self::Spo2 => 1,
            Self::Temperature => 2,
            Self::Respiration => 3,
            Self::BpSystolic => 4,
            Self::BpDiastolic => 5,
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Metric
// ---------------------------------------------------------------------------

/// One scalar vital sign and its walk parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Current value.
    pub value: f64,
    /// Lower clamp bound.
    pub min: f64,
    /// Upper clamp bound.
    pub max: f64,
    /// Peak-to-peak step amplitude.
    pub noise: f64,
}

impl Metric {
    pub const fn new(value: f64, min: f64, max: f64, noise: f64) -> Self {
        Self {
            value,
            min,
            max,
            noise,
        }
    }

    /// Advance one step with uniform draw `u`. Returns the applied delta.
    pub fn step(&mut self, u: f64, clamp: bool) -> f64 {
        let delta = random_walk_delta(u, self.noise);
        self.value += delta;
        if clamp {
            self.value = self.value.clamp(self.min, self.max);
        }
        delta
    }

    pub fn in_bounds(&self) -> bool {
        (self.min..=self.max).contains(&self.value)
    }
}

/// `(u - 0.5) * noise`: centred step in `[-noise/2, noise/2)`.
pub fn random_walk_delta(u: f64, noise: f64) -> f64 {
    (u - 0.5) * noise
}

/// Display text for a single metric value.
///
/// Temperature keeps one decimal; everything else rounds to an integer.
/// Ties round up in both cases (`36.25` shows as `36.3`).
pub fn format_value(kind: MetricKind, value: f64) -> String {
    match kind {
        MetricKind::Temperature => {
            let tenths = (value * 10.0 + 0.5).floor() / 10.0;
            format!("{tenths:.1}")
        }
        _ => format!("{}", value.round() as i64),
    }
}

/// Combined blood-pressure text, e.g. `"120/80"`.
pub fn format_blood_pressure(systolic: f64, diastolic: f64) -> String {
    format!(
        "{}/{}",
        format_value(MetricKind::BpSystolic, systolic),
        format_value(MetricKind::BpDiastolic, diastolic)
    )
}

// ---------------------------------------------------------------------------
// MetricReadout
// ---------------------------------------------------------------------------

/// Formatted display strings produced by one simulator tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricReadout {
    pub bpm: String,
    pub spo2: String,
    pub temp: String,
    pub resp: String,
    pub bp: String,
}

impl MetricReadout {
    fn from_metrics(m: &[Metric; 6]) -> Self {
        Self {
            bpm: format_value(MetricKind::HeartRate, m[0].value),
            spo2: format_value(MetricKind::Spo2, m[1].value),
            temp: format_value(MetricKind::Temperature, m[2].value),
            resp: format_value(MetricKind::Respiration, m[3].value),
            bp: format_blood_pressure(m[4].value, m[5].value),
        }
    }

    /// Heart rate as shown on screen, parsed back to a number.
    ///
    /// The trend chart plots this rather than the raw simulator value.
    pub fn displayed_bpm(&self) -> Option<f64> {
        self.bpm.parse().ok()
    }
}

// ---------------------------------------------------------------------------
// MetricSimulator
// ---------------------------------------------------------------------------

/// Owns the six metrics and their latest formatted readout.
#[derive(Debug, Clone)]
pub struct MetricSimulator {
    metrics: [Metric; 6],
    readout: MetricReadout,
    ticks: u64,
}

impl MetricSimulator {
    pub fn new(config: &MetricsConfig) -> Self {
        let metrics = [
            config.bpm,
            config.spo2,
            config.temp,
            config.resp,
            config.bp_sys,
            config.bp_dia,
        ];
        let readout = MetricReadout::from_metrics(&metrics);
        Self {
            metrics,
            readout,
            ticks: 0,
        }
    }

    /// Advance every metric by one random-walk step, one draw each, in
    /// [`MetricKind::ALL`] order.
    pub fn tick(&mut self, rng: &mut impl UniformSource) -> &MetricReadout {
        for kind in MetricKind::ALL {
            let u = rng.next_uniform();
            self.metrics[kind.index()].step(u, kind.is_clamped());
        }
        self.ticks += 1;
        self.readout = MetricReadout::from_metrics(&self.metrics);
        log::debug!(
            "metrics tick {}: bpm={} spo2={} temp={} resp={} bp={}",
            self.ticks,
            self.readout.bpm,
            self.readout.spo2,
            self.readout.temp,
            self.readout.resp,
            self.readout.bp
        );
        &self.readout
    }

    pub fn metric(&self, kind: MetricKind) -> &Metric {
        &self.metrics[kind.index()]
    }

    pub fn readout(&self) -> &MetricReadout {
        &self.readout
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
