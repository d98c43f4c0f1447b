//! Cooperative tick scheduling for the three periodic sources.
//!
//! One thread of control owns the [`Dashboard`](crate::dashboard::Dashboard)
//! and asks a [`Schedule`] which ticks are due. Each source keeps its own
//! deadline and fires at most once per poll; if the host stalls past a whole
//! interval, the deadline is re-anchored to the poll time instead of firing
//! a backlog. A shared [`StopSignal`] ends the loop, after which nothing
//! fires.

use std::cell::Cell;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::config::TimingConfig;

/// Kind of periodic work that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tick {
    /// Random-walk step for the vital signs.
    Metrics,
    /// One rendered frame: waveform and trend samples.
    Frame,
    /// Anomaly drill.
    Anomaly,
}

// ---------------------------------------------------------------------------
// StopSignal
// ---------------------------------------------------------------------------

/// Cloneable cancellation flag shared between the loop and whoever stops it.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Time source the schedule runs against.
pub trait Clock {
    fn now(&self) -> Instant;

    /// Block until `deadline` (or return at once if it has passed).
    fn sleep_until(&self, deadline: Instant);
}

/// Wall clock backed by `thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep_until(&self, deadline: Instant) {
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
    }
}

/// Clock that only moves when slept on, for deterministic runs.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    pub fn new(start: Instant) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }

    fn sleep_until(&self, deadline: Instant) {
        if deadline > self.now.get() {
            self.now.set(deadline);
        }
    }
}

// ---------------------------------------------------------------------------
// Periodic
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Periodic {
    interval: Duration,
    next_due: Instant,
}

impl Periodic {
    fn new(interval: Duration, first_due: Instant) -> Self {
        Self {
            interval,
            next_due: first_due,
        }
    }

    fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        let next = self.next_due + self.interval;
        self.next_due = if next <= now { now + self.interval } else { next };
        true
    }
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// Deadlines for metrics, frames and anomaly drills.
///
/// Frames start immediately; metric and anomaly ticks first fire one interval
/// after `start`.
#[derive(Debug, Clone)]
pub struct Schedule {
    metrics: Periodic,
    frame: Periodic,
    anomaly: Periodic,
    stop: StopSignal,
    paused: bool,
}

impl Schedule {
    pub fn new(timing: &TimingConfig, start: Instant, stop: StopSignal) -> Self {
        let metric_interval = timing.metric_interval();
        let anomaly_interval = timing.anomaly_interval();
        Self {
            metrics: Periodic::new(metric_interval, start + metric_interval),
            frame: Periodic::new(timing.frame_interval(), start),
            anomaly: Periodic::new(anomaly_interval, start + anomaly_interval),
            stop,
            paused: false,
        }
    }

    pub fn stop_signal(&self) -> &StopSignal {
        &self.stop
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    /// While paused, `poll` fires nothing but deadlines keep moving.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Ticks due at `now`, in metrics, frame, anomaly order.
    pub fn poll(&mut self, now: Instant) -> Vec<Tick> {
        if self.is_stopped() {
            return Vec::new();
        }
        let mut due = Vec::with_capacity(3);
        if self.metrics.poll(now) {
            due.push(Tick::Metrics);
        }
        if self.frame.poll(now) {
            due.push(Tick::Frame);
        }
        if self.anomaly.poll(now) {
            due.push(Tick::Anomaly);
        }
        if self.paused {
            due.clear();
        }
        due
    }

    /// Earliest upcoming deadline.
    pub fn next_deadline(&self) -> Instant {
        self.metrics
            .next_due
            .min(self.frame.next_due)
            .min(self.anomaly.next_due)
    }

    /// Drive ticks against `clock` until the stop signal is raised.
    pub fn run<C: Clock>(&mut self, clock: &C, mut on_tick: impl FnMut(Tick)) {
        while !self.is_stopped() {
            for tick in self.poll(clock.now()) {
                on_tick(tick);
                if self.is_stopped() {
                    break;
                }
            }
            if self.is_stopped() {
                break;
            }
            clock.sleep_until(self.next_deadline());
        }
        log::debug!("schedule stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing() -> TimingConfig {
        TimingConfig {
            metric_interval_ms: 1_000,
            anomaly_interval_ms: 10_000,
            fps: 10,
        }
    }

    #[test]
    fn frame_fires_immediately_others_wait() {
        let t0 = Instant::now();
        let mut s = Schedule::new(&timing(), t0, StopSignal::new());
        assert_eq!(s.poll(t0), vec![Tick::Frame]);
        assert!(s.poll(t0).is_empty());
    }

    #[test]
    fn metrics_fire_each_second() {
        let t0 = Instant::now();
        let mut s = Schedule::new(&timing(), t0, StopSignal::new());
        let at = |ms| t0 + Duration::from_millis(ms);
        assert!(s.poll(at(999)).contains(&Tick::Frame));
        assert!(s.poll(at(1_000)).contains(&Tick::Metrics));
        assert!(!s.poll(at(1_500)).contains(&Tick::Metrics));
        assert!(s.poll(at(2_000)).contains(&Tick::Metrics));
    }

    #[test]
    fn anomaly_fires_every_ten_seconds() {
        let t0 = Instant::now();
        let mut s = Schedule::new(&timing(), t0, StopSignal::new());
        let mut anomalies = 0;
        for ms in (0..=30_000).step_by(100) {
            if s.poll(t0 + Duration::from_millis(ms)).contains(&Tick::Anomaly) {
                anomalies += 1;
            }
        }
        assert_eq!(anomalies, 3);
    }

    #[test]
    fn stall_does_not_burst() {
        let t0 = Instant::now();
        let mut s = Schedule::new(&timing(), t0, StopSignal::new());
        let late = t0 + Duration::from_millis(5_500);
        let due = s.poll(late);
        assert_eq!(due.iter().filter(|t| **t == Tick::Metrics).count(), 1);
        assert!(s.poll(late).is_empty());
        assert!(s.poll(late + Duration::from_millis(1_000)).contains(&Tick::Metrics));
    }

    #[test]
    fn nothing_fires_after_stop() {
        let t0 = Instant::now();
        let stop = StopSignal::new();
        let mut s = Schedule::new(&timing(), t0, stop.clone());
        stop.stop();
        assert!(s.poll(t0 + Duration::from_secs(60)).is_empty());
        assert!(s.is_stopped());
    }

    #[test]
    fn paused_schedule_fires_nothing() {
        let t0 = Instant::now();
        let mut s = Schedule::new(&timing(), t0, StopSignal::new());
        s.set_paused(true);
        assert!(s.poll(t0 + Duration::from_secs(20)).is_empty());
        s.set_paused(false);
        assert!(!s.poll(t0 + Duration::from_secs(21)).is_empty());
    }

    #[test]
    fn next_deadline_is_earliest() {
        let t0 = Instant::now();
        let mut s = Schedule::new(&timing(), t0, StopSignal::new());
        s.poll(t0);
        assert_eq!(s.next_deadline(), t0 + Duration::from_millis(100));
    }

    #[test]
    fn run_on_manual_clock_until_stopped() {
        let t0 = Instant::now();
        let clock = ManualClock::new(t0);
        let stop = StopSignal::new();
        let mut s = Schedule::new(&timing(), t0, stop.clone());
        let (mut metrics, mut frames, mut anomalies) = (0, 0, 0);
        s.run(&clock, |tick| {
            match tick {
                Tick::Metrics => metrics += 1,
                Tick::Frame => frames += 1,
                Tick::Anomaly => anomalies += 1,
            }
            if metrics == 20 {
                stop.stop();
            }
        });
        assert_eq!(metrics, 20);
        // Stopping on the 20 s metrics tick preempts that instant's frame and drill.
        assert_eq!(anomalies, 1);
        assert_eq!(frames, 200);
        assert_eq!(clock.now(), t0 + Duration::from_secs(20));
    }

    #[test]
    fn manual_clock_sleep_never_goes_backwards() {
        let t0 = Instant::now();
        let clock = ManualClock::new(t0 + Duration::from_secs(5));
        clock.sleep_until(t0);
        assert_eq!(clock.now(), t0 + Duration::from_secs(5));
        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.now(), t0 + Duration::from_secs(6));
    }
}
