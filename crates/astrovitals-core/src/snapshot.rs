//! Serializable point-in-time view of a running dashboard.

use serde::Serialize;

use crate::anomaly::AnomalyAssessment;
use crate::controls::InferenceMode;
use crate::dashboard::{Dashboard, TickCounts};
use crate::metric::MetricReadout;
use crate::random::UniformSource;
use crate::sink::{DisplayState, Series};

#[derive(Debug, Clone, Serialize)]
pub struct CountsSnapshot {
    pub metrics: u64,
    pub frames: u64,
    pub anomalies: u64,
    pub alerts: u64,
}

impl From<TickCounts> for CountsSnapshot {
    fn from(c: TickCounts) -> Self {
        Self {
            metrics: c.metrics,
            frames: c.frames,
            anomalies: c.anomalies,
            alerts: c.alerts,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnomalySnapshot {
    pub state: String,
    pub risk: &'static str,
    pub meter_percent: u8,
    pub factors: [&'static str; 2],
}

impl From<&AnomalyAssessment> for AnomalySnapshot {
    fn from(a: &AnomalyAssessment) -> Self {
        Self {
            state: a.state.to_string(),
            risk: a.state.risk_label(),
            meter_percent: a.state.meter_percent(),
            factors: a.factors,
        }
    }
}

/// One JSON-lines record of the headless runner.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    /// Seconds since the run started.
    pub elapsed_secs: f64,
    pub readout: MetricReadout,
    pub anomaly: AnomalySnapshot,
    pub mode: InferenceMode,
    pub counts: CountsSnapshot,
    /// Latest sample on each chart.
    pub trend_latest: f64,
    pub ecg_latest: f64,
}

impl DashboardSnapshot {
    pub fn capture<R: UniformSource>(
        dashboard: &Dashboard<R>,
        display: &DisplayState,
        elapsed_secs: f64,
    ) -> Self {
        Self {
            elapsed_secs,
            readout: dashboard.readout().clone(),
            anomaly: dashboard.assessment().into(),
            mode: dashboard.inference_mode(),
            counts: dashboard.counts().into(),
            trend_latest: display.series(Series::Trend).latest(),
            ecg_latest: display.series(Series::Waveform).latest(),
        }
    }

    /// Single-line human summary, e.g.
    /// `[  3.0s] HR 72 bpm  SpO2 98%  T 36.6°C  RR 16  BP 120/80  | safe (Low)`.
    pub fn summary_line(&self) -> String {
        let r = &self.readout;
        format!(
            "[{:>6.1}s] HR {} bpm  SpO2 {}%  T {}°C  RR {}  BP {}  | {} ({})",
            self.elapsed_secs,
            r.bpm,
            r.spo2,
            r.temp,
            r.resp,
            r.bp,
            self.anomaly.state,
            self.anomaly.risk
        )
    }
}
