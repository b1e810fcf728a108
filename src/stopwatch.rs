use crate::models::TimerPhase;
use std::time::Instant;

/// Start/stop stopwatch driven by explicit instants.
///
/// Callers pass `Instant::now()` in production; tests pass synthetic
/// instants so elapsed values are exact.
#[derive(Debug, Default)]
pub struct Stopwatch {
    phase: TimerPhase,
    started: Option<Instant>,
    elapsed: f64,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    /// Seconds as of the last start, tick or stop.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn start(&mut self, now: Instant) {
        if self.is_running() {
            return;
        }
        self.phase = TimerPhase::Running;
        self.started = Some(now);
        self.elapsed = 0.0;
    }

    /// Ends the run and returns its duration in seconds. `None` when idle.
    pub fn stop(&mut self, now: Instant) -> Option<f64> {
        if !self.is_running() {
            return None;
        }
        self.refresh(now);
        self.phase = TimerPhase::Idle;
        self.started = None;
        Some(self.elapsed)
    }

    pub fn toggle(&mut self, now: Instant) -> Option<f64> {
        match self.phase {
            TimerPhase::Idle => {
                self.start(now);
                None
            }
            TimerPhase::Running => self.stop(now),
        }
    }

    /// Periodic refresh. Idle ticks leave the last value frozen.
    pub fn tick(&mut self, now: Instant) {
        if self.is_running() {
            self.refresh(now);
        }
    }

    fn refresh(&mut self, now: Instant) {
        if let Some(start) = self.started {
            self.elapsed = now.saturating_duration_since(start).as_secs_f64();
        }
    }
}
