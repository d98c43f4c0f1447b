//! The dashboard context: every generator plus the RNG they share.
//!
//! A [`Dashboard`] is owned by the host loop and handed each [`Tick`] along
//! with a [`DisplaySink`] to write into. It holds no display state of its
//! own; the trend chart is fed from the heart-rate *text* last written, the
//! way a reader of the screen would see it.

use crate::anomaly::{AnomalyAssessment, AnomalyEvaluator};
use crate::config::DashboardConfig;
use crate::controls::{ASSISTANT_MESSAGE, InferenceMode};
use crate::metric::{MetricKind, MetricReadout, MetricSimulator};
use crate::random::UniformSource;
use crate::schedule::Tick;
use crate::sink::{DisplaySink, Series, Slot, StyleSlot};
use crate::waveform::{WaveSample, WaveformGenerator};

/// Tick counters, mostly for status lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickCounts {
    pub metrics: u64,
    pub frames: u64,
    pub anomalies: u64,
    pub alerts: u64,
}

pub struct Dashboard<R: UniformSource> {
    simulator: MetricSimulator,
    waveform: WaveformGenerator,
    evaluator: AnomalyEvaluator,
    assessment: AnomalyAssessment,
    mode: InferenceMode,
    rng: R,
    counts: TickCounts,
    last_sample: Option<WaveSample>,
}

impl<R: UniformSource> Dashboard<R> {
    pub fn new(config: &DashboardConfig, rng: R) -> Self {
        Self {
            simulator: MetricSimulator::new(&config.metrics),
            waveform: WaveformGenerator::from_config(&config.waveform),
            evaluator: AnomalyEvaluator::from_config(&config.anomaly),
            assessment: AnomalyAssessment::safe(),
            mode: InferenceMode::default(),
            rng,
            counts: TickCounts::default(),
            last_sample: None,
        }
    }

    /// Write the initial readout and the calm assessment to `sink`.
    pub fn render_initial(&self, sink: &mut impl DisplaySink) {
        write_readout(sink, self.simulator.readout());
        write_assessment(sink, &self.assessment);
    }

    /// Dispatch one scheduled tick.
    pub fn handle(&mut self, tick: Tick, sink: &mut impl DisplaySink) {
        match tick {
            Tick::Metrics => {
                self.tick_metrics(sink);
            }
            Tick::Frame => {
                self.tick_frame(sink);
            }
            Tick::Anomaly => {
                self.tick_anomaly(sink);
            }
        }
    }

    /// Random-walk step for every metric; writes the formatted readout.
    pub fn tick_metrics(&mut self, sink: &mut impl DisplaySink) -> &MetricReadout {
        self.counts.metrics += 1;
        let readout = self.simulator.tick(&mut self.rng);
        write_readout(sink, readout);
        readout
    }

    /// One rendered frame: push the displayed heart rate onto the trend chart
    /// and a fresh ECG sample onto the waveform chart.
    pub fn tick_frame(&mut self, sink: &mut impl DisplaySink) -> WaveSample {
        self.counts.frames += 1;
        let readout = self.simulator.readout();
        let shown_bpm = readout
            .displayed_bpm()
            .unwrap_or_else(|| self.simulator.metric(MetricKind::HeartRate).value);
        sink.push_sample(Series::Trend, shown_bpm);

        let sample = self.waveform.next_sample(&mut self.rng);
        sink.push_sample(Series::Waveform, sample.value);
        self.last_sample = Some(sample);
        sample
    }

    /// Anomaly drill; overwrites status, meter, classes and factors.
    pub fn tick_anomaly(&mut self, sink: &mut impl DisplaySink) -> &AnomalyAssessment {
        self.counts.anomalies += 1;
        let next = self.evaluator.evaluate(&mut self.rng);
        if next.is_alert() {
            self.counts.alerts += 1;
        }
        if next.state != self.assessment.state {
            log::info!(
                "anomaly state {} -> {} (factors: {}, {})",
                self.assessment.state,
                next.state,
                next.factors[0],
                next.factors[1]
            );
        }
        self.assessment = next;
        write_assessment(sink, &self.assessment);
        &self.assessment
    }

    /// Flip the inference mode and announce it. Generators are unaffected.
    pub fn toggle_inference(&mut self, sink: &mut impl DisplaySink) -> InferenceMode {
        self.mode = self.mode.toggled();
        log::info!("inference mode: {}", self.mode);
        sink.notify(&self.mode.switch_message());
        self.mode
    }

    /// Show the assistant's fixed reply.
    pub fn ask_assistant(&self, sink: &mut impl DisplaySink) {
        sink.notify(ASSISTANT_MESSAGE);
    }

    pub fn readout(&self) -> &MetricReadout {
        self.simulator.readout()
    }

    pub fn simulator(&self) -> &MetricSimulator {
        &self.simulator
    }

    pub fn assessment(&self) -> &AnomalyAssessment {
        &self.assessment
    }

    /// Draw level above which a drill raises an alert.
    pub fn alert_threshold(&self) -> f64 {
        self.evaluator.threshold()
    }

    pub fn inference_mode(&self) -> InferenceMode {
        self.mode
    }

    pub fn counts(&self) -> TickCounts {
        self.counts
    }

    pub fn last_sample(&self) -> Option<WaveSample> {
        self.last_sample
    }

    pub fn phase(&self) -> f64 {
        self.waveform.phase()
    }
}

fn write_readout(sink: &mut impl DisplaySink, r: &MetricReadout) {
    sink.set_text(Slot::HeartRate, &r.bpm);
    sink.set_text(Slot::Spo2, &r.spo2);
    sink.set_text(Slot::Temperature, &r.temp);
    sink.set_text(Slot::Respiration, &r.resp);
    sink.set_text(Slot::BloodPressure, &r.bp);
}

fn write_assessment(sink: &mut impl DisplaySink, a: &AnomalyAssessment) {
    let state = a.state;
    sink.set_class(StyleSlot::AnomalyIndicator, state.indicator_class());
    sink.set_text(Slot::AnomalyStatus, state.status_text());
    sink.set_meter(state.meter_percent());
    sink.set_class(StyleSlot::RiskMeter, state.meter_class());
    sink.set_class(StyleSlot::RiskLabel, state.risk_class());
    sink.set_text(Slot::RiskLabel, state.risk_label());
    sink.set_factors(&a.factors);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anomaly::{AnomalyState, FACTOR_CATALOG, SAFE_FACTORS};
    use crate::random::{ScriptedUniform, SeededUniform};
    use crate::sink::DisplayState;

    fn setup(draws: Vec<f64>) -> (Dashboard<ScriptedUniform>, DisplayState) {
        let config = DashboardConfig::new();
        let dash = Dashboard::new(&config, ScriptedUniform::new(draws));
        let mut display = DisplayState::for_config(&config);
        dash.render_initial(&mut display);
        (dash, display)
    }

    #[test]
    fn initial_render_shows_defaults_and_calm_state() {
        let (_, d) = setup(vec![]);
        assert_eq!(d.text(Slot::HeartRate), "72");
        assert_eq!(d.text(Slot::Temperature), "36.6");
        assert_eq!(d.text(Slot::BloodPressure), "120/80");
        assert_eq!(d.text(Slot::AnomalyStatus), "No Anomalies Detected");
        assert_eq!(d.text(Slot::RiskLabel), "Low");
        assert_eq!(d.meter(), 15);
        assert_eq!(d.factors(), SAFE_FACTORS.map(String::from));
    }

    #[test]
    fn midpoint_metrics_tick_keeps_72() {
        let (mut dash, mut d) = setup(vec![0.5]);
        let r = dash.tick_metrics(&mut d).clone();
        assert_eq!(r.bpm, "72");
        assert_eq!(d.text(Slot::HeartRate), "72");
        assert_eq!(dash.counts().metrics, 1);
    }

    #[test]
    fn frame_feeds_trend_from_displayed_text() {
        // Walk bpm to 72.8 (shown as "73"), then render a frame.
        let (mut dash, mut d) = setup(vec![0.9, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5]);
        dash.tick_metrics(&mut d);
        dash.tick_frame(&mut d);
        assert_eq!(d.series(Series::Trend).latest(), 73.0);
        assert_eq!(d.series(Series::Trend).len(), 20);
    }

    #[test]
    fn frame_pushes_waveform_sample() {
        let (mut dash, mut d) = setup(vec![0.5]);
        let s = dash.tick_frame(&mut d);
        assert_eq!(d.series(Series::Waveform).latest(), s.value);
        assert_eq!(dash.last_sample(), Some(s));
        assert!((dash.phase() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn alert_drill_updates_every_target() {
        let (mut dash, mut d) = setup(vec![0.99, 0.2, 0.7]);
        let a = dash.tick_anomaly(&mut d).clone();
        assert_eq!(a.state, AnomalyState::Alert);
        assert_eq!(d.text(Slot::AnomalyStatus), "Warning: Arrhythmia Risk Detected");
        assert_eq!(d.class(StyleSlot::AnomalyIndicator), "alert");
        assert_eq!(d.class(StyleSlot::RiskMeter), "high");
        assert_eq!(d.class(StyleSlot::RiskLabel), "warning-text");
        assert_eq!(d.text(Slot::RiskLabel), "High");
        assert_eq!(d.meter(), 85);
        assert_eq!(d.factors(), [FACTOR_CATALOG[1], FACTOR_CATALOG[4]].map(String::from));
        assert_eq!(dash.counts().alerts, 1);
    }

    #[test]
    fn calm_drill_after_alert_resets_display() {
        let (mut dash, mut d) = setup(vec![0.99, 0.0, 0.0, 0.3]);
        dash.tick_anomaly(&mut d);
        dash.tick_anomaly(&mut d);
        assert_eq!(d.meter(), 15);
        assert_eq!(d.class(StyleSlot::RiskMeter), "");
        assert_eq!(d.factors(), SAFE_FACTORS.map(String::from));
        assert_eq!(dash.counts().anomalies, 2);
    }

    #[test]
    fn toggle_and_assistant_only_notify() {
        let (mut dash, mut d) = setup(vec![0.5]);
        let before = dash.readout().clone();
        assert_eq!(dash.toggle_inference(&mut d), InferenceMode::Cloud);
        assert_eq!(
            d.latest_notification(),
            Some("Switched to Cloud Inference Model.")
        );
        dash.ask_assistant(&mut d);
        assert_eq!(d.latest_notification(), Some(ASSISTANT_MESSAGE));
        assert_eq!(dash.toggle_inference(&mut d), InferenceMode::LocalEdge);
        assert_eq!(dash.readout(), &before);
        assert_eq!(dash.counts(), TickCounts::default());
    }

    #[test]
    fn alert_threshold_follows_config() {
        let mut config = DashboardConfig::new();
        config.anomaly.alert_threshold = 0.6;
        let dash = Dashboard::new(&config, ScriptedUniform::default());
        assert_eq!(dash.alert_threshold(), 0.6);
    }

    #[test]
    fn handle_dispatches_ticks() {
        let config = DashboardConfig::new();
        let mut dash = Dashboard::new(&config, SeededUniform::new(8));
        let mut d = DisplayState::for_config(&config);
        for tick in [Tick::Metrics, Tick::Frame, Tick::Frame, Tick::Anomaly] {
            dash.handle(tick, &mut d);
        }
        let c = dash.counts();
        assert_eq!((c.metrics, c.frames, c.anomalies), (1, 2, 1));
        assert_eq!(d.redraws(), 4);
    }
}
