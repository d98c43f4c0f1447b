//! # astrovitals-core
//!
//! **A crew vitals dashboard with nothing plugged in.**
//!
//! `astrovitals-core` fabricates believable biometric telemetry: six vital
//! signs on bounded random walks, a synthetic PQRST ECG trace, and a random
//! anomaly drill that flips the dashboard between calm and alert.
//!
//! ## Quick Start
//!
//! ```
//! use astrovitals_core::{Dashboard, DashboardConfig, DisplayState, ScriptedUniform, Slot};
//!
//! let config = DashboardConfig::default();
//! let mut display = DisplayState::for_config(&config);
//! let mut dash = Dashboard::new(&config, ScriptedUniform::constant(0.5));
//! dash.render_initial(&mut display);
//!
//! // A draw of 0.5 is a zero step, so the heart rate stays put.
//! dash.tick_metrics(&mut display);
//! assert_eq!(display.text(Slot::HeartRate), "72");
//! ```
//!
//! ## Architecture
//!
//! Schedule (1 s metrics · per-frame waveform · 10 s drills) → Dashboard → DisplaySink
//!
//! - [`MetricSimulator`]: random walk `(u - 0.5) * noise`, clamped except for
//!   blood pressure, formatted for display.
//! - [`WaveformGenerator`]: phase accumulator mapped onto five closed-form
//!   PQRST segments plus uniform noise.
//! - [`AnomalyEvaluator`]: one draw per drill; above 0.8 raises an alert with
//!   two factors sampled from [`FACTOR_CATALOG`].
//! - [`Schedule`]: cooperative deadlines driven by a [`Clock`], cancelled by a
//!   [`StopSignal`].
//!
//! All randomness flows through [`UniformSource`], so any run can be made
//! reproducible with [`SeededUniform`] or fully scripted with
//! [`ScriptedUniform`].

pub mod anomaly;
pub mod config;
pub mod controls;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod metric;
pub mod random;
pub mod schedule;
pub mod sink;
pub mod snapshot;
pub mod waveform;
pub mod window;

pub use anomaly::{AnomalyAssessment, AnomalyEvaluator, AnomalyState, FACTOR_CATALOG, SAFE_FACTORS};
pub use config::{AnomalyConfig, DashboardConfig, MetricsConfig, TimingConfig, WaveformConfig};
pub use controls::{ASSISTANT_MESSAGE, InferenceMode};
pub use dashboard::{Dashboard, TickCounts};
pub use error::{Error, Result};
pub use forecast::ForecastPoint;
pub use metric::{Metric, MetricKind, MetricReadout, MetricSimulator, format_value};
pub use random::{ScriptedUniform, SeededUniform, ThreadUniform, UniformSource, make_source};
pub use schedule::{Clock, ManualClock, Schedule, StopSignal, SystemClock, Tick};
pub use sink::{DisplaySink, DisplayState, Series, Slot, StyleSlot};
pub use snapshot::DashboardSnapshot;
pub use waveform::{Segment, WaveSample, WaveformGenerator, pqrst_amplitude, segment_at};
pub use window::{SlidingWindow, TREND_LEN, WAVEFORM_LEN};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
