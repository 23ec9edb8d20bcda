//! One-second countdown driving match duration.
//!
//! The clock does not read wall time. Whoever owns it calls [`Clock::tick`]
//! once per elapsed second; the clock only tracks what a tick means.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Lifecycle of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockState {
    /// Not started, or stopped.
    Stopped,
    /// Counting down.
    Running,
    /// Suspended; the count is kept.
    Paused,
    /// Reached zero and reported it.
    Expired,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// Count went down; seconds left.
    Ticked(u32),
    /// Count reached zero. Reported exactly once.
    Expired,
    /// Clock was not running; nothing changed.
    Idle,
}

/// Countdown timer in whole seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    seconds_remaining: u32,
    state: ClockState,
}

impl Clock {
    /// Creates a stopped clock at zero.
    pub fn new() -> Self {
        Self {
            seconds_remaining: 0,
            state: ClockState::Stopped,
        }
    }

    /// Sets the count and begins ticking.
    #[instrument(skip(self))]
    pub fn start(&mut self, initial_seconds: u32) {
        debug!("Starting clock");
        self.seconds_remaining = initial_seconds;
        self.state = ClockState::Running;
    }

    /// Suspends ticking without touching the count.
    pub fn pause(&mut self) {
        if self.state == ClockState::Running {
            self.state = ClockState::Paused;
        }
    }

    /// Resumes a paused clock.
    pub fn resume(&mut self) {
        if self.state == ClockState::Paused {
            self.state = ClockState::Running;
        }
    }

    /// Cancels ticking. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.state != ClockState::Expired {
            self.state = ClockState::Stopped;
        }
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> ClockTick {
        if self.state != ClockState::Running {
            return ClockTick::Idle;
        }

        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            debug!("Clock expired");
            self.state = ClockState::Expired;
            ClockTick::Expired
        } else {
            ClockTick::Ticked(self.seconds_remaining)
        }
    }

    /// Seconds left on the clock.
    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Returns true while ticks have an effect.
    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    /// Returns true while suspended.
    pub fn is_paused(&self) -> bool {
        self.state == ClockState::Paused
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_and_expires_once() {
        let mut clock = Clock::new();
        clock.start(3);
        assert_eq!(clock.tick(), ClockTick::Ticked(2));
        assert_eq!(clock.tick(), ClockTick::Ticked(1));
        assert_eq!(clock.tick(), ClockTick::Expired);
        assert_eq!(clock.tick(), ClockTick::Idle);
        assert_eq!(clock.seconds_remaining(), 0);
        assert_eq!(clock.state(), ClockState::Expired);
    }

    #[test]
    fn paused_clock_does_not_tick() {
        let mut clock = Clock::new();
        clock.start(10);
        clock.pause();
        assert_eq!(clock.tick(), ClockTick::Idle);
        assert_eq!(clock.seconds_remaining(), 10);
        clock.resume();
        assert_eq!(clock.tick(), ClockTick::Ticked(9));
    }

    #[test]
    fn stop_is_idempotent_and_keeps_expiry() {
        let mut clock = Clock::new();
        clock.start(5);
        clock.stop();
        clock.stop();
        assert_eq!(clock.state(), ClockState::Stopped);
        assert_eq!(clock.tick(), ClockTick::Idle);
        // Resume only applies to a paused clock.
        clock.resume();
        assert_eq!(clock.state(), ClockState::Stopped);

        let mut expired = Clock::new();
        expired.start(1);
        assert_eq!(expired.tick(), ClockTick::Expired);
        expired.stop();
        assert_eq!(expired.state(), ClockState::Expired);
    }

    #[test]
    fn zero_budget_expires_on_first_tick() {
        let mut clock = Clock::new();
        clock.start(0);
        assert_eq!(clock.tick(), ClockTick::Expired);
        assert_eq!(clock.tick(), ClockTick::Idle);
    }
}
