//! Timed-choice countdown.
//!
//! A two-state machine (`Idle` / `Running`) owned by the narrative state. At
//! most one countdown runs at a time; starting a new one replaces the old.
//! Ticks are driven from outside, one per elapsed period, and never catch up
//! on missed periods.

use serde::Serialize;

use super::book::TimedChoiceSpec;

/// A countdown bound to the screen that started it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunningCountdown {
    /// Screen that owns the countdown.
    pub screen_id: String,
    /// Whole seconds left.
    pub remaining: u32,
    /// Option picked on expiry.
    pub default_index: usize,
}

/// Countdown phase.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum CountdownPhase {
    /// No countdown.
    #[default]
    Idle,
    /// Counting down.
    Running(RunningCountdown),
}

/// Result of one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing was running.
    Idle,
    /// Still counting.
    Counting {
        /// Seconds left after this tick.
        remaining: u32,
    },
    /// Reached zero; the countdown is now idle.
    Expired {
        /// Screen that owned the countdown.
        screen_id: String,
        /// Option to pick.
        default_index: usize,
    },
}

/// The countdown scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Countdown {
    phase: CountdownPhase,
    /// Bumped on every start so a driver can re-arm its clock.
    epoch: u64,
}

impl Countdown {
    /// Starts counting down from `timed`'s duration for `screen_id`,
    /// cancelling whatever was running.
    pub fn start(&mut self, screen_id: &str, timed: &TimedChoiceSpec) {
        self.cancel();
        self.epoch += 1;
        self.phase = CountdownPhase::Running(RunningCountdown {
            screen_id: screen_id.to_owned(),
            remaining: timed.duration_secs(),
            default_index: timed.default_index,
        });
    }

    /// Stops the countdown. Returns `true` if one was running.
    pub fn cancel(&mut self) -> bool {
        let was_running = self.is_running();
        self.phase = CountdownPhase::Idle;
        was_running
    }

    /// Consumes one elapsed second.
    pub fn tick(&mut self) -> TickOutcome {
        let CountdownPhase::Running(running) = &mut self.phase else {
            return TickOutcome::Idle;
        };
        running.remaining = running.remaining.saturating_sub(1);
        if running.remaining > 0 {
            return TickOutcome::Counting {
                remaining: running.remaining,
            };
        }
        let CountdownPhase::Running(expired) = std::mem::take(&mut self.phase) else {
            return TickOutcome::Idle;
        };
        TickOutcome::Expired {
            screen_id: expired.screen_id,
            default_index: expired.default_index,
        }
    }

    /// Returns `true` while counting down.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.phase, CountdownPhase::Running(_))
    }

    /// Seconds left, 0 when idle.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        match &self.phase {
            CountdownPhase::Running(running) => running.remaining,
            CountdownPhase::Idle => 0,
        }
    }

    /// Number of countdowns started so far.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
