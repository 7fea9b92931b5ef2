//! Session driver: the host-side event loop around one interpreter.
//!
//! Inputs arrive over a channel, countdown ticks come from a tokio interval,
//! and both are handled strictly one at a time. After every handled input or
//! tick the driver publishes the new view and the recorded events.

use std::time::Duration;

use inkbound_core::error::LoadError;
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::{debug, info, warn};

use crate::application::interpreter::Interpreter;
use crate::application::query_handlers::{ScreenView, screen_view};
use crate::domain::commands::SessionInput;
use crate::domain::events::NarrativeEvent;

/// Default countdown tick period.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Something the host should react to.
#[derive(Debug, Clone)]
pub enum SessionUpdate {
    /// The state changed (or may have); redraw.
    View(ScreenView),
    /// Events recorded while handling the last input or tick.
    Events(Vec<NarrativeEvent>),
    /// A book load failed; state is unchanged.
    LoadFailed(LoadError),
}

/// Runs one interpreter until its input channel closes.
#[derive(Debug)]
pub struct SessionDriver {
    interpreter: Interpreter,
    inputs: mpsc::Receiver<SessionInput>,
    updates: mpsc::UnboundedSender<SessionUpdate>,
    tick_period: Duration,
}

impl SessionDriver {
    /// Creates a driver ticking every [`DEFAULT_TICK_PERIOD`].
    #[must_use]
    pub fn new(
        interpreter: Interpreter,
        inputs: mpsc::Receiver<SessionInput>,
        updates: mpsc::UnboundedSender<SessionUpdate>,
    ) -> Self {
        Self {
            interpreter,
            inputs,
            updates,
            tick_period: DEFAULT_TICK_PERIOD,
        }
    }

    /// Overrides the countdown tick period.
    #[must_use]
    pub fn with_tick_period(mut self, tick_period: Duration) -> Self {
        self.tick_period = tick_period;
        self
    }

    /// Drives the session until the input channel closes or the update
    /// receiver is dropped, then hands the interpreter back.
    pub async fn run(mut self) -> Interpreter {
        let mut ticker = self.ticker();
        let mut armed_epoch = self.interpreter.state().countdown().epoch();
        info!(session_id = %self.interpreter.session_id(), "session started");

        if !self.publish() {
            return self.interpreter;
        }

        loop {
            let counting = self.interpreter.state().countdown().is_running();
            tokio::select! {
                biased;

                input = self.inputs.recv() => {
                    let Some(input) = input else {
                        break;
                    };
                    debug!(?input, "handling input");
                    if let Err(err) = self.interpreter.handle(input).await {
                        warn!(locator = err.locator(), error = %err, "load failed");
                        if self.updates.send(SessionUpdate::LoadFailed(err)).is_err() {
                            break;
                        }
                    }
                }
                _ = ticker.tick(), if counting => {
                    self.interpreter.tick();
                }
            }

            let epoch = self.interpreter.state().countdown().epoch();
            if epoch != armed_epoch {
                armed_epoch = epoch;
                ticker.reset();
            }

            if !self.publish() {
                break;
            }
        }

        info!(session_id = %self.interpreter.session_id(), "session ended");
        self.interpreter
    }

    fn ticker(&self) -> Interval {
        let mut ticker = interval_at(Instant::now() + self.tick_period, self.tick_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }

    /// Returns `false` once nobody is listening.
    fn publish(&mut self) -> bool {
        let events = self.interpreter.take_events();
        if !events.is_empty() && self.updates.send(SessionUpdate::Events(events)).is_err() {
            return false;
        }
        self.updates
            .send(SessionUpdate::View(screen_view(self.interpreter.state())))
            .is_ok()
    }
}
