//! Display sink: where the dashboard writes what it wants shown.
//!
//! The [`Dashboard`](crate::dashboard::Dashboard) never renders anything
//! itself. It sets text, style classes, the risk meter and the factor list,
//! appends chart samples, and raises notifications through [`DisplaySink`].
//! [`DisplayState`] is the in-memory implementation both front ends render
//! from.

use std::collections::{HashMap, VecDeque};

use crate::config::DashboardConfig;
use crate::window::SlidingWindow;

/// Text targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    HeartRate,
    Spo2,
    Temperature,
    Respiration,
    BloodPressure,
    AnomalyStatus,
    RiskLabel,
}

/// Targets that carry a style class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleSlot {
    AnomalyIndicator,
    RiskMeter,
    RiskLabel,
}

/// Live chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    /// Displayed heart rate, one sample per frame.
    Trend,
    /// Synthetic ECG, one sample per frame.
    Waveform,
}

/// Write-only view of a display. No operation can fail.
pub trait DisplaySink {
    fn set_text(&mut self, slot: Slot, text: &str);

    fn set_class(&mut self, slot: StyleSlot, class: &str);

    /// Risk meter fill in percent.
    fn set_meter(&mut self, percent: u8);

    /// Replace the risk factor list.
    fn set_factors(&mut self, factors: &[&str]);

    /// Append a sample to a chart, shifting out its oldest sample, and redraw.
    fn push_sample(&mut self, series: Series, value: f64);

    /// Surface a one-off message to the user.
    fn notify(&mut self, message: &str);
}

/// Notifications kept for display; older ones are dropped.
pub const MAX_NOTIFICATIONS: usize = 8;

/// In-memory display state.
#[derive(Debug, Clone)]
pub struct DisplayState {
    texts: HashMap<Slot, String>,
    classes: HashMap<StyleSlot, String>,
    meter: u8,
    factors: Vec<String>,
    trend: SlidingWindow,
    waveform: SlidingWindow,
    redraws: u64,
    notifications: VecDeque<String>,
}

impl DisplayState {
    /// Empty display with a trend window pre-filled with `trend_fill` and a
    /// flat waveform window.
    pub fn new(trend_len: usize, trend_fill: f64, waveform_len: usize) -> Self {
        Self {
            texts: HashMap::new(),
            classes: HashMap::new(),
            meter: 0,
            factors: Vec::new(),
            trend: SlidingWindow::filled(trend_len, trend_fill),
            waveform: SlidingWindow::filled(waveform_len, 0.0),
            redraws: 0,
            notifications: VecDeque::new(),
        }
    }

    /// Window sizes from `config`, trend seeded with the initial heart rate.
    pub fn for_config(config: &DashboardConfig) -> Self {
        Self::new(
            config.trend_len,
            config.metrics.bpm.value,
            config.waveform.window_len,
        )
    }

    /// Current text of `slot`, empty if never set.
    pub fn text(&self, slot: Slot) -> &str {
        self.texts.get(&slot).map(String::as_str).unwrap_or("")
    }

    /// Current class of `slot`, empty if never set.
    pub fn class(&self, slot: StyleSlot) -> &str {
        self.classes.get(&slot).map(String::as_str).unwrap_or("")
    }

    pub fn meter(&self) -> u8 {
        self.meter
    }

    pub fn factors(&self) -> &[String] {
        &self.factors
    }

    pub fn series(&self, series: Series) -> &SlidingWindow {
        match series {
            Series::Trend => &self.trend,
            Series::Waveform => &self.waveform,
        }
    }

    /// Number of chart redraws requested so far.
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    /// Newest notification, if any.
    pub fn latest_notification(&self) -> Option<&str> {
        self.notifications.back().map(String::as_str)
    }

    pub fn notifications(&self) -> impl Iterator<Item = &str> {
        self.notifications.iter().map(String::as_str)
    }

    /// Remove and return the newest notification.
    pub fn dismiss_notification(&mut self) -> Option<String> {
        self.notifications.pop_back()
    }
}

impl DisplaySink for DisplayState {
    fn set_text(&mut self, slot: Slot, text: &str) {
        self.texts.insert(slot, text.to_string());
    }

    fn set_class(&mut self, slot: StyleSlot, class: &str) {
        self.classes.insert(slot, class.to_string());
    }

    fn set_meter(&mut self, percent: u8) {
        self.meter = percent.min(100);
    }

    fn set_factors(&mut self, factors: &[&str]) {
        self.factors = factors.iter().map(|f| f.to_string()).collect();
    }

    fn push_sample(&mut self, series: Series, value: f64) {
        match series {
            Series::Trend => self.trend.push(value),
            Series::Waveform => self.waveform.push(value),
        }
        self.redraws += 1;
    }

    fn notify(&mut self, message: &str) {
        if self.notifications.len() == MAX_NOTIFICATIONS {
            self.notifications.pop_front();
        }
        self.notifications.push_back(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_slots_read_empty() {
        let d = DisplayState::new(20, 72.0, 100);
        assert_eq!(d.text(Slot::HeartRate), "");
        assert_eq!(d.class(StyleSlot::RiskMeter), "");
        assert!(d.factors().is_empty());
    }

    #[test]
    fn text_and_class_overwrite() {
        let mut d = DisplayState::new(20, 72.0, 100);
        d.set_text(Slot::BloodPressure, "120/80");
        d.set_text(Slot::BloodPressure, "121/80");
        d.set_class(StyleSlot::AnomalyIndicator, "alert");
        assert_eq!(d.text(Slot::BloodPressure), "121/80");
        assert_eq!(d.class(StyleSlot::AnomalyIndicator), "alert");
    }

    #[test]
    fn windows_start_filled_and_keep_length() {
        let mut d = DisplayState::new(20, 72.0, 100);
        assert_eq!(d.series(Series::Trend).len(), 20);
        assert_eq!(d.series(Series::Trend).latest(), 72.0);
        assert_eq!(d.series(Series::Waveform).len(), 100);
        for i in 0..500 {
            d.push_sample(Series::Trend, i as f64);
            d.push_sample(Series::Waveform, 0.1);
        }
        assert_eq!(d.series(Series::Trend).len(), 20);
        assert_eq!(d.series(Series::Waveform).len(), 100);
        assert_eq!(d.redraws(), 1_000);
    }

    #[test]
    fn meter_is_capped() {
        let mut d = DisplayState::new(1, 0.0, 1);
        d.set_meter(150);
        assert_eq!(d.meter(), 100);
    }

    #[test]
    fn notifications_are_bounded_and_dismissable() {
        let mut d = DisplayState::new(1, 0.0, 1);
        for i in 0..12 {
            d.notify(&format!("n{i}"));
        }
        assert_eq!(d.notifications().count(), MAX_NOTIFICATIONS);
        assert_eq!(d.latest_notification(), Some("n11"));
        assert_eq!(d.dismiss_notification().as_deref(), Some("n11"));
        assert_eq!(d.latest_notification(), Some("n10"));
    }

    #[test]
    fn factors_replace_previous_list() {
        let mut d = DisplayState::new(1, 0.0, 1);
        d.set_factors(&["a", "b"]);
        d.set_factors(&["c", "c"]);
        assert_eq!(d.factors(), ["c".to_string(), "c".to_string()]);
    }
}
