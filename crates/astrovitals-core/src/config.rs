//! Dashboard configuration.
//!
//! Every knob has a default matching the stock dashboard, so an empty JSON
//! object `{}` is a valid config. Files are loaded with [`DashboardConfig::load`]
//! and validated before any generator is built.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metric::{Metric, MetricKind};
use crate::window::{TREND_LEN, WAVEFORM_LEN};

/// Initial state and walk parameters for the six metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub bpm: Metric,
    pub spo2: Metric,
    pub temp: Metric,
    pub resp: Metric,
    pub bp_sys: Metric,
    pub bp_dia: Metric,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            bpm: Metric::new(72.0, 60.0, 100.0, 2.0),
            spo2: Metric::new(98.0, 95.0, 100.0, 0.5),
            temp: Metric::new(36.6, 36.4, 37.2, 0.1),
            resp: Metric::new(16.0, 12.0, 20.0, 1.0),
            bp_sys: Metric::new(120.0, 110.0, 130.0, 2.0),
            bp_dia: Metric::new(80.0, 70.0, 90.0, 1.0),
        }
    }
}

impl MetricsConfig {
    pub fn get(&self, kind: MetricKind) -> &Metric {
        match kind {
            MetricKind::HeartRate => &self.bpm,
            MetricKind::Spo2 => &self.spo2,
            MetricKind::Temperature => &self.temp,
            MetricKind::Respiration => &self.resp,
            MetricKind::BpSystolic => &self.bp_sys,
            MetricKind::BpDiastolic => &self.bp_dia,
        }
    }
}

/// Synthetic ECG parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveformConfig {
    /// Phase advance per frame.
    pub phase_step: f64,
    /// Peak-to-peak width of the additive uniform noise.
    pub noise_amplitude: f64,
    /// Samples kept in the waveform chart.
    pub window_len: usize,
}

impl Default for WaveformConfig {
    fn default() -> Self {
        Self {
            phase_step: 0.1,
            noise_amplitude: 0.05,
            window_len: WAVEFORM_LEN,
        }
    }
}

/// Anomaly drill parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    /// A draw strictly above this raises an alert.
    pub alert_threshold: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            alert_threshold: 0.8,
        }
    }
}

/// Tick cadence of the three periodic sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub metric_interval_ms: u64,
    pub anomaly_interval_ms: u64,
    /// Target frames per second for the waveform.
    pub fps: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            metric_interval_ms: 1_000,
            anomaly_interval_ms: 10_000,
            fps: 60,
        }
    }
}

impl TimingConfig {
    pub fn metric_interval(&self) -> Duration {
        Duration::from_millis(self.metric_interval_ms)
    }

    pub fn anomaly_interval(&self) -> Duration {
        Duration::from_millis(self.anomaly_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }
}

/// Top-level configuration for a dashboard instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub metrics: MetricsConfig,
    pub waveform: WaveformConfig,
    pub anomaly: AnomalyConfig,
    pub timing: TimingConfig,
    /// Samples kept in the heart-rate trend chart.
    pub trend_len: usize,
    /// Fixed RNG seed; `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            metrics: MetricsConfig::default(),
            waveform: WaveformConfig::default(),
            anomaly: AnomalyConfig::default(),
            timing: TimingConfig::default(),
            trend_len: TREND_LEN,
            seed: None,
        }
    }
}

impl DashboardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::info!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse and validate a JSON config string.
    ///
    /// Missing sections, section fields and whole metrics take their
    /// defaults. A metric that is present must list all four of its fields.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field the generators rely on.
    pub fn validate(&self) -> Result<()> {
        for kind in MetricKind::ALL {
            validate_metric(kind, self.metrics.get(kind))?;
        }

        let w = &self.waveform;
        if !(w.phase_step.is_finite() && w.phase_step > 0.0) {
            return Err(Error::invalid(
                "waveform.phase_step",
                format!("must be a positive number, got {}", w.phase_step),
            ));
        }
        if !(w.noise_amplitude.is_finite() && w.noise_amplitude >= 0.0) {
            return Err(Error::invalid(
                "waveform.noise_amplitude",
                format!("must be non-negative, got {}", w.noise_amplitude),
            ));
        }
        if w.window_len == 0 {
            return Err(Error::invalid("waveform.window_len", "must be at least 1"));
        }
        if self.trend_len == 0 {
            return Err(Error::invalid("trend_len", "must be at least 1"));
        }

        let t = self.anomaly.alert_threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(Error::invalid(
                "anomaly.alert_threshold",
                format!("must lie in [0, 1], got {t}"),
            ));
        }

        let timing = &self.timing;
        if timing.metric_interval_ms == 0 {
            return Err(Error::invalid("timing.metric_interval_ms", "must be positive"));
        }
        if timing.anomaly_interval_ms == 0 {
            return Err(Error::invalid("timing.anomaly_interval_ms", "must be positive"));
        }
        if !(1..=240).contains(&timing.fps) {
            return Err(Error::invalid(
                "timing.fps",
                format!("must lie in 1..=240, got {}", timing.fps),
            ));
        }
        Ok(())
    }
}

fn validate_metric(kind: MetricKind, m: &Metric) -> Result<()> {
    let field = match kind {
        MetricKind::HeartRate => "metrics.bpm",
        MetricKind::Spo2 => "metrics.spo2",
        MetricKind::Temperature => "metrics.temp",
        MetricKind::Respiration => "metrics.resp",
        MetricKind::BpSystolic => "metrics.bp_sys",
        MetricKind::BpDiastolic => "metrics.bp_dia",
    };
    if ![m.value, m.min, m.max, m.noise].iter().all(|v| v.is_finite()) {
        return Err(Error::invalid(field, "all values must be finite"));
    }
    if m.min > m.max {
        return Err(Error::invalid(
            field,
            format!("min {} exceeds max {}", m.min, m.max),
        ));
    }
    if m.noise < 0.0 {
        return Err(Error::invalid(
            field,
            format!("noise must be non-negative, got {}", m.noise),
        ));
    }
    if kind.is_clamped() && !m.in_bounds() {
        return Err(Error::invalid(
            field,
            format!("initial value {} outside [{}, {}]", m.value, m.min, m.max),
        ));
    }
    Ok(())
}
