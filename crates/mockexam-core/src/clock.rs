//! Attempt countdown clock.
//!
//! The clock is the single source of elapsed/remaining time for an
//! attempt and the only component allowed to produce the expiry signal.
//! It counts down in whole seconds; the host drives it by calling
//! [`Clock::tick`] once per second from its timer.

use crate::error::AttemptError;

/// Where the clock is in its own small lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    /// Created but not started.
    Idle,
    /// Counting down.
    Running,
    /// Halted by [`Clock::stop`] before reaching zero.
    Stopped,
    /// Reached zero and emitted [`ClockEvent::Expired`].
    Expired,
}

/// What a single tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// Time moved forward; this many seconds remain.
    Tick { remaining_seconds: u32 },
    /// The countdown hit zero. Emitted exactly once per attempt; this is
    /// the only signal that may trigger an automatic submission.
    Expired,
}

/// A 1-second-resolution countdown.
#[derive(Debug, Clone)]
pub struct Clock {
    remaining: u32,
    state: ClockState,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            remaining: 0,
            state: ClockState::Idle,
        }
    }

    /// Begin counting down from `duration_seconds`.
    ///
    /// Starting an already-running clock is an error; restarting a
    /// stopped or expired clock is allowed (a fresh attempt reuses a
    /// fresh clock, but the operation itself is not one-shot).
    pub fn start(&mut self, duration_seconds: u32) -> Result<(), AttemptError> {
        if self.state == ClockState::Running {
            return Err(AttemptError::ClockAlreadyRunning);
        }
        self.remaining = duration_seconds;
        self.state = ClockState::Running;
        Ok(())
    }

    /// Advance time by one second.
    ///
    /// Returns `None` when the clock is not running (idle, stopped, or
    /// already expired). A late timer callback after expiry therefore
    /// falls straight through without re-emitting `Expired`.
    pub fn tick(&mut self) -> Option<ClockEvent> {
        if self.state != ClockState::Running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = ClockState::Expired;
            return Some(ClockEvent::Expired);
        }
        Some(ClockEvent::Tick {
            remaining_seconds: self.remaining,
        })
    }

    /// Halt the countdown without emitting `Expired`.
    ///
    /// Used when the user submits before time runs out. Safe to call in
    /// any state, including after expiry.
    pub fn stop(&mut self) {
        if self.state == ClockState::Running {
            self.state = ClockState::Stopped;
        }
    }

    /// Seconds left on the clock. Never negative: the counter is
    /// unsigned and decremented with saturating arithmetic, so a timer
    /// firing late cannot push it below zero.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    /// True once `Expired` has been emitted.
    pub fn is_expired(&self) -> bool {
        self.state == ClockState::Expired
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
