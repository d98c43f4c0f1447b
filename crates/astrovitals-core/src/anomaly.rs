//! Random anomaly drill.
//!
//! Every evaluation draws one uniform value. Above the alert threshold the
//! dashboard flips to an arrhythmia warning and lists two contributing
//! factors sampled with replacement from [`FACTOR_CATALOG`]; otherwise it
//! shows the calm state with two fixed factors. Nothing is remembered between
//! evaluations.

use serde::Serialize;

use crate::config::AnomalyConfig;
use crate::random::UniformSource;

/// Factors an alert can cite.
pub const FACTOR_CATALOG: [&str; 6] = [
    "Sleep Quality (Variable)",
    "Hydration (Analysis Needed)",
    "Stress Level (Elevated)",
    "Radiation (Nominal)",
    "CO2 Exposure (Low)",
    "Muscle Fatigue (Detected)",
];

/// Factors shown while no anomaly is flagged.
pub const SAFE_FACTORS: [&str; 2] = ["Sleep Quality (Stable)", "Hydration (Optimal)"];

/// Two-valued classification of the latest drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyState {
    Safe,
    Alert,
}

impl AnomalyState {
    /// Banner text.
    pub fn status_text(self) -> &'static str {
        match self {
            Self::Safe => "No Anomalies Detected",
            Self::Alert => "Warning: Arrhythmia Risk Detected",
        }
    }

    pub fn risk_label(self) -> &'static str {
        match self {
            Self::Safe => "Low",
            Self::Alert => "High",
        }
    }

    /// Fill of the risk meter, in percent.
    pub fn meter_percent(self) -> u8 {
        match self {
            Self::Safe => 15,
            Self::Alert => 85,
        }
    }

    /// Style class for the status banner.
    pub fn indicator_class(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Alert => "alert",
        }
    }

    /// Style class for the meter fill; the calm state has none.
    pub fn meter_class(self) -> &'static str {
        match self {
            Self::Safe => "",
            Self::Alert => "high",
        }
    }

    /// Style class for the risk label.
    pub fn risk_class(self) -> &'static str {
        match self {
            Self::Safe => "success-text",
            Self::Alert => "warning-text",
        }
    }
}

impl std::fmt::Display for AnomalyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Alert => write!(f, "alert"),
        }
    }
}

/// Outcome of one drill: state plus the two factors to list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnomalyAssessment {
    pub state: AnomalyState,
    pub factors: [&'static str; 2],
}

impl AnomalyAssessment {
    /// The calm assessment, also shown before the first drill.
    pub fn safe() -> Self {
        Self {
            state: AnomalyState::Safe,
            factors: SAFE_FACTORS,
        }
    }

    pub fn is_alert(&self) -> bool {
        self.state == AnomalyState::Alert
    }
}

impl Default for AnomalyAssessment {
    fn default() -> Self {
        Self::safe()
    }
}

/// Stateless evaluator holding only the alert threshold.
#[derive(Debug, Clone, Copy)]
pub struct AnomalyEvaluator {
    threshold: f64,
}

impl AnomalyEvaluator {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &AnomalyConfig) -> Self {
        Self::new(config.alert_threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Run one drill. Consumes one draw when calm, three on alert.
    pub fn evaluate(&self, rng: &mut impl UniformSource) -> AnomalyAssessment {
        let trigger = rng.next_uniform();
        if trigger > self.threshold {
            let first = FACTOR_CATALOG[rng.pick_index(FACTOR_CATALOG.len())];
            let second = FACTOR_CATALOG[rng.pick_index(FACTOR_CATALOG.len())];
            AnomalyAssessment {
                state: AnomalyState::Alert,
                factors: [first, second],
            }
        } else {
            AnomalyAssessment::safe()
        }
    }
}

impl Default for AnomalyEvaluator {
    fn default() -> Self {
        Self::from_config(&AnomalyConfig::default())
    }
}
