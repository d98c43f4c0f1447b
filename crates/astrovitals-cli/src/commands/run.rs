//! `astrovitals run`: headless dashboard that prints readouts instead of drawing.

use std::time::Duration;

use serde::Serialize;

use astrovitals_core::snapshot::CountsSnapshot;
use astrovitals_core::{
    AnomalyState, Clock, Dashboard, DashboardSnapshot, DisplayState, Schedule, StopSignal,
    SystemClock, Tick, UniformSource, make_source,
};

pub struct RunCommandConfig<'a> {
    pub config_path: Option<&'a str>,
    pub seed: Option<u64>,
    pub duration_secs: Option<f64>,
    pub json: bool,
}

/// One JSON line of output.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum RunEvent<'a> {
    Readout(&'a DashboardSnapshot),
    AnomalyChange {
        elapsed_secs: f64,
        from: AnomalyState,
        to: AnomalyState,
        factors: [&'static str; 2],
    },
    Summary {
        elapsed_secs: f64,
        counts: CountsSnapshot,
    },
}

pub fn run(cmd: RunCommandConfig<'_>) {
    let max_duration = cmd.duration_secs.map(|secs| {
        parse_duration_secs(secs).unwrap_or_else(|| {
            eprintln!("Invalid duration: {secs} (expected a non-negative number of seconds)");
            std::process::exit(1);
        })
    });

    let config = super::load_config(cmd.config_path, cmd.seed, None);
    let mut dashboard = Dashboard::new(&config, make_source(config.seed));
    let mut display = DisplayState::for_config(&config);
    dashboard.render_initial(&mut display);

    let stop = StopSignal::new();
    let handler_stop = stop.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_stop.stop()) {
        eprintln!("Error setting Ctrl+C handler: {e}");
        std::process::exit(1);
    }

    if !cmd.json {
        println!("Running headless dashboard");
        match max_duration {
            Some(d) => println!("  Duration:  {:.1}s", d.as_secs_f64()),
            None => println!("  Duration:  until Ctrl+C"),
        }
        match config.seed {
            Some(seed) => println!("  Seed:      {seed}"),
            None => println!("  Seed:      random"),
        }
        println!("  Alert at:  draw > {:.2}", dashboard.alert_threshold());
        println!();
    }

    let clock = SystemClock;
    let start = clock.now();
    let mut schedule = Schedule::new(&config.timing, start, stop);

    let elapsed = drive(
        &mut dashboard,
        &mut display,
        &mut schedule,
        &clock,
        max_duration,
        |event| println!("{}", render_event(event, cmd.json)),
    );

    let counts = dashboard.counts();
    let summary = RunEvent::Summary {
        elapsed_secs: elapsed,
        counts: counts.into(),
    };
    if !cmd.json {
        println!();
    }
    println!("{}", render_event(&summary, cmd.json));
}

/// Run the schedule against `clock` until it is stopped or `max_duration`
/// has passed, handing every readout and anomaly transition to `emit`.
/// Returns the elapsed seconds.
fn drive<R: UniformSource, C: Clock>(
    dashboard: &mut Dashboard<R>,
    display: &mut DisplayState,
    schedule: &mut Schedule,
    clock: &C,
    max_duration: Option<Duration>,
    mut emit: impl FnMut(&RunEvent<'_>),
) -> f64 {
    let start = clock.now();
    let stop = schedule.stop_signal().clone();

    schedule.run(clock, |tick| {
        let before = dashboard.assessment().state;
        dashboard.handle(tick, &mut *display);
        let elapsed = clock.now().saturating_duration_since(start);
        let elapsed_secs = elapsed.as_secs_f64();

        match tick {
            Tick::Metrics => {
                let snapshot = DashboardSnapshot::capture(&*dashboard, &*display, elapsed_secs);
                emit(&RunEvent::Readout(&snapshot));
            }
            Tick::Anomaly => {
                let assessment = dashboard.assessment();
                if assessment.state != before {
                    emit(&RunEvent::AnomalyChange {
                        elapsed_secs,
                        from: before,
                        to: assessment.state,
                        factors: assessment.factors,
                    });
                }
            }
            Tick::Frame => {}
        }

        if let Some(max) = max_duration {
            if elapsed >= max {
                stop.stop();
            }
        }
    });

    clock.now().saturating_duration_since(start).as_secs_f64()
}

/// One output line, JSON or plain text.
fn render_event(event: &RunEvent<'_>, json: bool) -> String {
    if json {
        return serde_json::to_string(event)
            .unwrap_or_else(|e| format!("{{\"event\":\"error\",\"message\":\"{e}\"}}"));
    }
    match event {
        RunEvent::Readout(snapshot) => snapshot.summary_line(),
        RunEvent::AnomalyChange {
            elapsed_secs,
            to,
            factors,
            ..
        } => format!(
            "[{elapsed_secs:>6.1}s] {}  (risk {}, {}%: {}, {})",
            to.status_text(),
            to.risk_label(),
            to.meter_percent(),
            factors[0],
            factors[1]
        ),
        RunEvent::Summary {
            elapsed_secs,
            counts,
        } => format!(
            "Stopped after {elapsed_secs:.1}s: {} readouts, {} frames, {} drills ({} alerts)",
            counts.metrics, counts.frames, counts.anomalies, counts.alerts
        ),
    }
}

/// Seconds from the command line; rejects negative, non-finite and
/// out-of-range values.
fn parse_duration_secs(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use astrovitals_core::{DashboardConfig, ManualClock, ScriptedUniform, TickCounts};

    #[test]
    fn duration_parsing() {
        assert_eq!(parse_duration_secs(1.5), Some(Duration::from_millis(1_500)));
        assert_eq!(parse_duration_secs(0.0), Some(Duration::ZERO));
        assert_eq!(parse_duration_secs(-1.0), None);
        assert_eq!(parse_duration_secs(f64::NAN), None);
        assert_eq!(parse_duration_secs(f64::INFINITY), None);
        assert_eq!(parse_duration_secs(1e30), None);
        assert_eq!(parse_duration_secs(f64::MAX), None);
    }

    // -----------------------------------------------------------------------
    // drive tests
    // -----------------------------------------------------------------------

    /// Lines `drive` emits, rendered as plain text or JSON.
    fn drive_for(
        config: &DashboardConfig,
        rng: ScriptedUniform,
        max_duration: Duration,
        json: bool,
    ) -> (Vec<String>, TickCounts, f64) {
        let t0 = Instant::now();
        let clock = ManualClock::new(t0);
        let mut dash = Dashboard::new(config, rng);
        let mut display = DisplayState::for_config(config);
        dash.render_initial(&mut display);
        let mut schedule = Schedule::new(&config.timing, t0, StopSignal::new());

        let mut lines = Vec::new();
        let elapsed = drive(
            &mut dash,
            &mut display,
            &mut schedule,
            &clock,
            Some(max_duration),
            |event| lines.push(render_event(event, json)),
        );
        (lines, dash.counts(), elapsed)
    }

    /// One frame and one readout per second, drills every 5 s.
    fn drill_config() -> DashboardConfig {
        let mut config = DashboardConfig::default();
        config.timing.fps = 1;
        config.timing.anomaly_interval_ms = 5_000;
        config
    }

    /// Draws that make the 5 s drill alert and the 10 s drill calm.
    ///
    /// Per second: 6 metric draws then 1 frame draw; the first frame at t=0
    /// takes draw 0. The 5 s drill is draw 36 (plus 37 and 38 for factors),
    /// the 10 s drill is draw 74 and the 15 s drill draw 110.
    fn safe_alert_safe_draws() -> ScriptedUniform {
        let mut draws = vec![0.5; 400];
        draws[36] = 0.95;
        draws[74] = 0.1;
        draws[110] = 0.3;
        ScriptedUniform::new(draws)
    }

    #[test]
    fn drive_stops_at_duration_with_one_readout_per_second() {
        let (lines, counts, elapsed) = drive_for(
            &drill_config(),
            safe_alert_safe_draws(),
            Duration::from_secs(20),
            false,
        );
        assert_eq!(counts.metrics, 20);
        assert_eq!(elapsed, 20.0);
        let readouts = lines.iter().filter(|l| l.contains("HR ")).count();
        assert_eq!(readouts, 20);
        // The readout that hit the limit is the last thing emitted.
        assert!(lines.last().unwrap().starts_with("[  20.0s] HR 72 bpm"));
    }

    #[test]
    fn drive_reports_only_anomaly_transitions() {
        let (lines, counts, _) = drive_for(
            &drill_config(),
            safe_alert_safe_draws(),
            Duration::from_secs(20),
            true,
        );
        assert_eq!(counts.anomalies, 3);
        assert_eq!(counts.alerts, 1);

        let events: Vec<serde_json::Value> = lines
            .iter()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        let changes: Vec<&serde_json::Value> = events
            .iter()
            .filter(|e| e["event"] == "anomaly_change")
            .collect();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0]["from"], "safe");
        assert_eq!(changes[0]["to"], "alert");
        assert_eq!(changes[0]["elapsed_secs"], 5.0);
        assert_eq!(changes[0]["factors"][0], "Radiation (Nominal)");
        assert_eq!(changes[1]["from"], "alert");
        assert_eq!(changes[1]["to"], "safe");
        assert_eq!(changes[1]["elapsed_secs"], 10.0);
        assert_eq!(
            events.iter().filter(|e| e["event"] == "readout").count(),
            20
        );
    }

    #[test]
    fn drive_emits_nothing_once_stopped() {
        let config = drill_config();
        let t0 = Instant::now();
        let clock = ManualClock::new(t0);
        let mut dash = Dashboard::new(&config, ScriptedUniform::constant(0.5));
        let mut display = DisplayState::for_config(&config);
        let stop = StopSignal::new();
        stop.stop();
        let mut schedule = Schedule::new(&config.timing, t0, stop);
        let mut emitted = 0;
        let elapsed = drive(
            &mut dash,
            &mut display,
            &mut schedule,
            &clock,
            None,
            |_| emitted += 1,
        );
        assert_eq!(emitted, 0);
        assert_eq!(elapsed, 0.0);
        assert_eq!(dash.counts(), TickCounts::default());
    }

    #[test]
    fn summary_renders_counts() {
        let counts = TickCounts {
            metrics: 3,
            frames: 180,
            anomalies: 0,
            alerts: 0,
        };
        let line = render_event(
            &RunEvent::Summary {
                elapsed_secs: 3.0,
                counts: counts.into(),
            },
            false,
        );
        assert_eq!(line, "Stopped after 3.0s: 3 readouts, 180 frames, 0 drills (0 alerts)");
    }

    #[test]
    fn readout_event_is_tagged() {
        let config = DashboardConfig::default();
        let dash = Dashboard::new(&config, ScriptedUniform::constant(0.5));
        let display = DisplayState::for_config(&config);
        let snap = DashboardSnapshot::capture(&dash, &display, 2.0);
        let v = serde_json::to_value(RunEvent::Readout(&snap)).unwrap();
        assert_eq!(v["event"], "readout");
        assert_eq!(v["readout"]["bpm"], "72");
        assert_eq!(v["elapsed_secs"], 2.0);
    }

    #[test]
    fn anomaly_change_event_is_tagged() {
        let v = serde_json::to_value(RunEvent::AnomalyChange {
            elapsed_secs: 10.0,
            from: AnomalyState::Safe,
            to: AnomalyState::Alert,
            factors: ["Radiation (Nominal)", "CO2 Exposure (Low)"],
        })
        .unwrap();
        assert_eq!(v["event"], "anomaly_change");
        assert_eq!(v["from"], "safe");
        assert_eq!(v["to"], "alert");
        assert_eq!(v["factors"][0], "Radiation (Nominal)");
    }
}
