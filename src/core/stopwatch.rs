//! Stopwatch state machine.
//!
//! Elapsed time is `buffered + (now - cycle_start)` while running and
//! `buffered` (frozen) while stopped. Every time-dependent method has an
//! `*_at(now)` variant so callers can drive it with explicit instants.

use crate::errors::{AppError, AppResult};
use crate::utils::time::format_duration;
use std::time::{Duration, Instant};

/// Default tick interval (~24 Hz).
pub const DEFAULT_TICK: Duration = Duration::from_millis(41);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchState {
    Stopped,
    Running,
}

#[derive(Debug, Clone)]
pub struct Stopwatch {
    state: StopwatchState,
    buffered: Duration,
    cycle_start: Instant,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            state: StopwatchState::Stopped,
            buffered: Duration::ZERO,
            cycle_start: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn state(&self) -> StopwatchState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == StopwatchState::Running
    }

    /// Time accrued in completed running segments since the last reset.
    pub fn buffered(&self) -> Duration {
        self.buffered
    }

    /// Cached elapsed duration, as last computed by a tick or transition.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Whole elapsed seconds, sub-second remainder truncated.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.as_secs()
    }

    /// `HH:MM:SS`
    pub fn display(&self) -> String {
        format_duration(self.elapsed)
    }

    pub fn start(&mut self) -> AppResult<()> {
        self.start_at(Instant::now())
    }

    pub fn start_at(&mut self, now: Instant) -> AppResult<()> {
        if self.is_running() {
            return Err(AppError::InvalidTransition(
                "stopwatch is already running".into(),
            ));
        }
        self.cycle_start = now;
        self.state = StopwatchState::Running;
        Ok(())
    }

    pub fn stop(&mut self) -> AppResult<()> {
        self.stop_at(Instant::now())
    }

    pub fn stop_at(&mut self, now: Instant) -> AppResult<()> {
        if !self.is_running() {
            return Err(AppError::InvalidTransition(
                "stopwatch is not running".into(),
            ));
        }
        self.buffered += now.saturating_duration_since(self.cycle_start);
        self.elapsed = self.buffered;
        self.state = StopwatchState::Stopped;
        Ok(())
    }

    /// Start when stopped, stop when running. Returns the new state.
    pub fn toggle_at(&mut self, now: Instant) -> StopwatchState {
        // both branches are valid from the state they are taken in
        let _ = if self.is_running() {
            self.stop_at(now)
        } else {
            self.start_at(now)
        };
        self.state
    }

    pub fn tick(&mut self) -> Duration {
        self.tick_at(Instant::now())
    }

    /// Recompute the cached elapsed value. A no-op while stopped.
    pub fn tick_at(&mut self, now: Instant) -> Duration {
        if self.is_running() {
            self.elapsed = self.buffered + now.saturating_duration_since(self.cycle_start);
        }
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.reset_at(Instant::now())
    }

    /// Zero everything; the running/stopped state is kept.
    pub fn reset_at(&mut self, now: Instant) {
        self.buffered = Duration::ZERO;
        self.cycle_start = now;
        self.elapsed = Duration::ZERO;
    }
}
