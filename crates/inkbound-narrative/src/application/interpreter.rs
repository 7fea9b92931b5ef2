//! The narrative interpreter.
//!
//! Owns the narrative state of one play session and exposes the entry points
//! a host calls in response to viewer input. Every entry point runs to
//! completion before the next one starts (`&mut self`), so a book swap is
//! never observed half-applied.
//!
//! Misuse (picking while no menu is open, out-of-range indices, unknown
//! screen ids) is ignored: the call returns `false` and state is unchanged.
//! Only book loads report errors.

use std::fmt;
use std::sync::Arc;

use inkbound_core::assets::AssetPreloader;
use inkbound_core::clock::SharedClock;
use inkbound_core::error::LoadError;
use inkbound_core::event::EventMetadata;
use inkbound_core::source::BookSource;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::application::loader;
use crate::domain::book::{Action, Screen, ScreenKind, TimedChoiceSpec};
use crate::domain::commands::SessionInput;
use crate::domain::countdown::TickOutcome;
use crate::domain::events::{
    BookLoaded, ChoiceMade, ChoicesPresented, CountdownExpired, CountdownStarted,
    CountdownTicked, DialogueAdvanced, NarrativeEvent, NarrativeEventKind, ScreenEntered,
};
use crate::domain::mode::Mode;
use crate::domain::progression::{AdvanceStep, plan_advance};
use crate::domain::state::NarrativeState;
use crate::domain::validate::validate_book;

/// State machine driving one play session.
pub struct Interpreter {
    session_id: Uuid,
    state: NarrativeState,
    source: Arc<dyn BookSource>,
    preloader: Arc<dyn AssetPreloader>,
    clock: SharedClock,
    correlation_id: Uuid,
    last_sequence: u64,
    uncommitted_events: Vec<NarrativeEvent>,
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("session_id", &self.session_id)
            .field("state", &self.state)
            .field("uncommitted_events", &self.uncommitted_events.len())
            .finish_non_exhaustive()
    }
}

impl Interpreter {
    /// Creates an interpreter with an empty state and a fresh session id.
    #[must_use]
    pub fn new(
        source: Arc<dyn BookSource>,
        preloader: Arc<dyn AssetPreloader>,
        clock: SharedClock,
    ) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            state: NarrativeState::new(),
            source,
            preloader,
            clock,
            correlation_id: Uuid::nil(),
            last_sequence: 0,
            uncommitted_events: Vec::new(),
        }
    }

    /// The play session this interpreter drives.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Read-only view of the narrative state.
    #[must_use]
    pub fn state(&self) -> &NarrativeState {
        &self.state
    }

    /// The current presentation mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Events recorded since the last [`Interpreter::take_events`].
    #[must_use]
    pub fn uncommitted_events(&self) -> &[NarrativeEvent] {
        &self.uncommitted_events
    }

    /// Drains the recorded events.
    pub fn take_events(&mut self) -> Vec<NarrativeEvent> {
        std::mem::take(&mut self.uncommitted_events)
    }

    /// Dispatches a host input to the matching entry point.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the input triggered a book load that failed.
    pub async fn handle(&mut self, input: SessionInput) -> Result<(), LoadError> {
        match input {
            SessionInput::Advance => self.advance().await?,
            SessionInput::Select(index) => {
                self.select(index);
            }
            SessionInput::Choose(index) => {
                self.choose(index);
            }
            SessionInput::ChooseTimed(index) => {
                self.choose_timed(index);
            }
            SessionInput::Navigate(screen_id) => {
                self.navigate(&screen_id);
            }
            SessionInput::RunAction(action) => self.run_action(&action).await?,
            SessionInput::PressButton(index) => {
                self.press_button(index).await?;
            }
            SessionInput::Scroll(delta) => {
                self.scroll(delta);
            }
            SessionInput::LoadBook(locator) => self.load_book(&locator).await?,
        }
        Ok(())
    }

    /// Fetches, decodes and adopts the book at `locator`, moving to its start
    /// screen.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the book cannot be fetched or decoded. The state
    /// is then exactly as it was before the call.
    pub async fn load_book(&mut self, locator: &str) -> Result<(), LoadError> {
        self.begin_call();
        self.swap_in_book(locator).await
    }

    /// Advances by exactly one logical step: the next dialogue line, or, once
    /// dialogue is exhausted, the screen's choices, countdown, action or next
    /// screen (first that applies).
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the step was a `loadBook` action that failed.
    pub async fn advance(&mut self) -> Result<(), LoadError> {
        self.begin_call();
        self.step().await
    }

    /// Runs a deferred action.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if a `loadBook` action failed.
    pub async fn run_action(&mut self, action: &Action) -> Result<(), LoadError> {
        self.begin_call();
        match action {
            Action::Navigate { screen } => {
                self.enter(screen);
                Ok(())
            }
            Action::LoadBook { path } => self.swap_in_book(path).await,
            Action::Advance => self.step().await,
        }
    }

    /// Runs the action attached to the `index`-th button of the active screen.
    /// Returns `Ok(false)` when there is no such button, it has no action, or
    /// the screen's type is unknown.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the button's `loadBook` action failed.
    pub async fn press_button(&mut self, index: usize) -> Result<bool, LoadError> {
        let action = self
            .state
            .current_screen()
            .filter(|screen| screen.kind != ScreenKind::Unknown)
            .and_then(|screen| screen.buttons().nth(index))
            .and_then(|button| button.action.clone());
        let Some(action) = action else {
            debug!(index, "button press ignored");
            return Ok(false);
        };
        self.run_action(&action).await?;
        Ok(true)
    }

    /// Moves to `screen_id` in the active book, resetting the dialogue cursor
    /// and scroll and stopping any countdown. Returns `false` if the id does
    /// not resolve.
    pub fn navigate(&mut self, screen_id: &str) -> bool {
        self.begin_call();
        self.enter(screen_id)
    }

    /// Picks option `index` from the open choice menu.
    pub fn choose(&mut self, index: usize) -> bool {
        self.begin_call();
        if self.state.mode() != Mode::Choice {
            warn!(index, mode = ?self.state.mode(), "choose ignored outside a choice menu");
            return false;
        }
        let next = self
            .state
            .current_screen()
            .and_then(|screen| screen.choice_set().get(index).map(|choice| choice.next.clone()));
        let Some(next) = next else {
            warn!(index, "choose ignored: no such option");
            return false;
        };
        self.resolve_choice(index, &next, false)
    }

    /// Picks option `index` from the active screen's timed choices, stopping
    /// the countdown first. Ignored unless the mode is [`Mode::Timed`].
    pub fn choose_timed(&mut self, index: usize) -> bool {
        self.begin_call();
        if self.state.mode() != Mode::Timed {
            warn!(index, mode = ?self.state.mode(), "timed choice ignored outside a countdown");
            return false;
        }
        self.pick_timed(index)
    }

    /// Routes "option `index` selected" to [`Interpreter::choose`] or
    /// [`Interpreter::choose_timed`] depending on the mode.
    pub fn select(&mut self, index: usize) -> bool {
        match self.state.mode() {
            Mode::Choice => self.choose(index),
            Mode::Timed => self.choose_timed(index),
            mode => {
                debug!(index, ?mode, "select ignored: no menu on screen");
                false
            }
        }
    }

    /// Consumes one elapsed countdown second. On expiry the default option is
    /// picked. Returns `true` if anything changed.
    pub fn tick(&mut self) -> bool {
        self.begin_call();
        match self.state.countdown.tick() {
            TickOutcome::Idle => false,
            TickOutcome::Counting { remaining } => {
                debug!(remaining, "countdown ticked");
                let screen_id = self.active_screen_id();
                self.record(NarrativeEventKind::CountdownTicked(CountdownTicked {
                    screen_id,
                    remaining,
                }));
                true
            }
            TickOutcome::Expired {
                screen_id,
                default_index,
            } => {
                info!(%screen_id, default_index, "countdown expired");
                let owner_active = self.state.screen_id() == Some(screen_id.as_str());
                self.record(NarrativeEventKind::CountdownExpired(CountdownExpired {
                    screen_id,
                    default_index,
                }));
                if !owner_active {
                    warn!("expired countdown no longer owns the active screen");
                    return true;
                }
                self.pick_timed(default_index);
                true
            }
        }
    }

    /// Scrolls the active screen by `delta`, never above the top. Returns
    /// `false` when no screen is active.
    pub fn scroll(&mut self, delta: f64) -> bool {
        if self.state.current_screen().is_none() {
            return false;
        }
        self.state.scroll_offset = (self.state.scroll_offset + delta).max(0.0);
        true
    }

    async fn step(&mut self) -> Result<(), LoadError> {
        match plan_advance(&self.state) {
            AdvanceStep::NextLine => {
                self.state.dialogue_index += 1;
                let index = self.state.dialogue_index;
                debug!(index, "dialogue advanced");
                let screen_id = self.active_screen_id();
                self.record(NarrativeEventKind::DialogueAdvanced(DialogueAdvanced {
                    screen_id,
                    index,
                }));
            }
            AdvanceStep::OpenChoices => {
                self.state.menu_open = true;
                let count = self
                    .state
                    .current_screen()
                    .map_or(0, |screen| screen.choice_set().len());
                let screen_id = self.active_screen_id();
                info!(%screen_id, count, "choices presented");
                self.record(NarrativeEventKind::ChoicesPresented(ChoicesPresented {
                    screen_id,
                    count,
                }));
            }
            AdvanceStep::StartCountdown(timed) => self.start_countdown(&timed),
            AdvanceStep::Dispatch(Action::Navigate { screen }) | AdvanceStep::GoTo(screen) => {
                self.enter(&screen);
            }
            AdvanceStep::Dispatch(Action::LoadBook { path }) => {
                return self.swap_in_book(&path).await;
            }
            AdvanceStep::Dispatch(Action::Advance) | AdvanceStep::Stay => {
                debug!("advance had nothing to do");
            }
        }
        Ok(())
    }

    #[instrument(skip(self), fields(session_id = %self.session_id))]
    async fn swap_in_book(&mut self, locator: &str) -> Result<(), LoadError> {
        let raw = self
            .source
            .fetch(locator)
            .await
            .inspect_err(|err| warn!(error = %err, "book fetch failed"))?;
        let book = loader::decode_book(locator, &raw)
            .inspect_err(|err| warn!(error = %err, "book decode failed"))?;

        for issue in validate_book(&book) {
            warn!(%issue, "content issue");
        }

        let loaded = BookLoaded {
            locator: locator.to_owned(),
            start: book.start.clone(),
            screen_count: book.screens.len(),
            version_hash: loader::version_hash(&raw),
        };
        if self.state.countdown.is_running() {
            info!("countdown cancelled by book load");
        }
        info!(start = %loaded.start, screens = loaded.screen_count, "book loaded");

        self.state.adopt_book(book);
        self.record(NarrativeEventKind::BookLoaded(loaded));
        self.announce_screen();
        Ok(())
    }

    fn enter(&mut self, screen_id: &str) -> bool {
        let resolves = self
            .state
            .book()
            .is_some_and(|book| book.contains(screen_id));
        if !resolves {
            warn!(screen_id, "navigation to undefined screen ignored");
            return false;
        }
        if self.state.countdown.is_running() {
            info!("countdown cancelled by navigation");
        }
        self.state.enter_screen(screen_id);
        info!(screen_id, mode = ?self.state.mode(), "screen entered");
        self.announce_screen();
        true
    }

    fn pick_timed(&mut self, index: usize) -> bool {
        let next = self
            .state
            .current_screen()
            .and_then(|screen| screen.timed_choices.as_ref())
            .and_then(|timed| timed.options.get(index))
            .map(|option| option.next.clone());
        let Some(next) = next else {
            warn!(index, "timed choice ignored: no such option");
            return false;
        };
        self.resolve_choice(index, &next, true)
    }

    fn resolve_choice(&mut self, index: usize, next: &str, timed: bool) -> bool {
        let resolves = self.state.book().is_some_and(|book| book.contains(next));
        if !resolves {
            warn!(index, next, "choice leads to undefined screen; ignored");
            return false;
        }
        let screen_id = self.active_screen_id();
        info!(%screen_id, index, next, timed, "choice made");
        self.record(NarrativeEventKind::ChoiceMade(ChoiceMade {
            screen_id,
            index,
            next: next.to_owned(),
            timed,
        }));
        self.enter(next)
    }

    fn start_countdown(&mut self, timed: &TimedChoiceSpec) {
        let screen_id = self.active_screen_id();
        self.state.countdown.start(&screen_id, timed);
        let seconds = self.state.countdown.remaining();
        info!(%screen_id, seconds, default_index = timed.default_index, "countdown started");
        self.record(NarrativeEventKind::CountdownStarted(CountdownStarted {
            screen_id,
            seconds,
            default_index: timed.default_index,
        }));
    }

    fn announce_screen(&mut self) {
        let Some(screen_id) = self.state.screen_id.clone() else {
            return;
        };
        if let Some(reference) = self.state.current_screen().and_then(Screen::backdrop) {
            self.preloader.preload(reference);
        }
        self.record(NarrativeEventKind::ScreenEntered(ScreenEntered { screen_id }));
    }

    fn active_screen_id(&self) -> String {
        self.state.screen_id.clone().unwrap_or_default()
    }

    fn begin_call(&mut self) {
        self.correlation_id = Uuid::new_v4();
    }

    fn record(&mut self, kind: NarrativeEventKind) {
        self.last_sequence += 1;
        self.uncommitted_events.push(NarrativeEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                session_id: self.session_id,
                sequence_number: self.last_sequence,
                correlation_id: self.correlation_id,
                occurred_at: self.clock.now(),
            },
            kind,
        });
    }
}
