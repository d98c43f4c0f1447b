//! TUI application state and event loop.
//!
//! The schedule and the dashboard both live on the UI thread. Each pass of the
//! loop applies whatever ticks are due, draws, then waits for input no longer
//! than the next deadline.

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use astrovitals_core::{
    Dashboard, DashboardConfig, DisplayState, Schedule, StopSignal, UniformSource, make_source,
};

/// Upper bound on how long one pass waits for a key.
const INPUT_POLL: Duration = Duration::from_millis(50);

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    dashboard: Dashboard<Box<dyn UniformSource>>,
    display: DisplayState,
    schedule: Schedule,
    running: bool,
    started: Instant,
    fps: u32,
    seed: Option<u64>,
}

impl App {
    pub fn new(config: &DashboardConfig) -> Self {
        let started = Instant::now();
        let dashboard = Dashboard::new(config, make_source(config.seed));
        let mut display = DisplayState::for_config(config);
        dashboard.render_initial(&mut display);

        Self {
            dashboard,
            display,
            schedule: Schedule::new(&config.timing, started, StopSignal::new()),
            running: true,
            started,
            fps: config.timing.fps,
            seed: config.seed,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Install panic hook that restores terminal before printing the panic.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            original_hook(info);
        }));

        let result = self.run_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error.
        let _ = std::panic::take_hook();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        let counts = self.dashboard.counts();
        log::info!(
            "monitor closed after {:.1}s ({} readouts, {} drills, {} alerts)",
            self.elapsed().as_secs_f64(),
            counts.metrics,
            counts.anomalies,
            counts.alerts
        );

        result
    }

    fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        while self.running {
            self.pump(Instant::now());
            terminal.draw(|f| super::ui::draw(f, self))?;

            let wait = self
                .schedule
                .next_deadline()
                .saturating_duration_since(Instant::now())
                .min(INPUT_POLL);
            if event::poll(wait)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if key.modifiers.contains(KeyModifiers::CONTROL)
                            && key.code == KeyCode::Char('c')
                        {
                            self.quit();
                        } else {
                            self.handle_key(key.code);
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Apply every tick due at `now`. Returns how many were applied.
    fn pump(&mut self, now: Instant) -> usize {
        let due = self.schedule.poll(now);
        for &tick in &due {
            self.dashboard.handle(tick, &mut self.display);
        }
        due.len()
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('c') => {
                self.dashboard.toggle_inference(&mut self.display);
            }
            KeyCode::Char('a') => self.dashboard.ask_assistant(&mut self.display),
            KeyCode::Char('p') => {
                let paused = !self.schedule.is_paused();
                self.schedule.set_paused(paused);
            }
            KeyCode::Char('d') => {
                self.display.dismiss_notification();
            }
            _ => {}
        }
    }

    fn quit(&mut self) {
        self.schedule.stop_signal().stop();
        self.running = false;
    }

    pub fn dashboard(&self) -> &Dashboard<Box<dyn UniformSource>> {
        &self.dashboard
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn is_paused(&self) -> bool {
        self.schedule.is_paused()
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
