//! Narrative events recorded by the interpreter.

use inkbound_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

/// Event type for [`BookLoaded`].
pub const BOOK_LOADED_EVENT_TYPE: &str = "narrative.book_loaded";
/// Event type for [`ScreenEntered`].
pub const SCREEN_ENTERED_EVENT_TYPE: &str = "narrative.screen_entered";
/// Event type for [`DialogueAdvanced`].
pub const DIALOGUE_ADVANCED_EVENT_TYPE: &str = "narrative.dialogue_advanced";
/// Event type for [`ChoicesPresented`].
pub const CHOICES_PRESENTED_EVENT_TYPE: &str = "narrative.choices_presented";
/// Event type for [`CountdownStarted`].
pub const COUNTDOWN_STARTED_EVENT_TYPE: &str = "narrative.countdown_started";
/// Event type for [`CountdownTicked`].
pub const COUNTDOWN_TICKED_EVENT_TYPE: &str = "narrative.countdown_ticked";
/// Event type for [`CountdownExpired`].
pub const COUNTDOWN_EXPIRED_EVENT_TYPE: &str = "narrative.countdown_expired";
/// Event type for [`ChoiceMade`].
pub const CHOICE_MADE_EVENT_TYPE: &str = "narrative.choice_made";

/// Emitted when a book replaces the active one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLoaded {
    /// Where the book came from.
    pub locator: String,
    /// Its start screen.
    pub start: String,
    /// Number of screens it defines.
    pub screen_count: usize,
    /// SHA-256 hex digest of the raw document.
    pub version_hash: String,
}

/// Emitted whenever the cursor lands on a screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenEntered {
    /// The screen now active.
    pub screen_id: String,
}

/// Emitted when the next dialogue line is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueAdvanced {
    /// The active screen.
    pub screen_id: String,
    /// Index of the line now shown.
    pub index: usize,
}

/// Emitted when exhausted dialogue opens a choice menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoicesPresented {
    /// The active screen.
    pub screen_id: String,
    /// Number of options.
    pub count: usize,
}

/// Emitted when a timed choice starts counting down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownStarted {
    /// Screen owning the countdown.
    pub screen_id: String,
    /// Countdown length.
    pub seconds: u32,
    /// Option picked on expiry.
    pub default_index: usize,
}

/// Emitted on every tick that leaves time on the clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownTicked {
    /// Screen owning the countdown.
    pub screen_id: String,
    /// Seconds left.
    pub remaining: u32,
}

/// Emitted when a countdown runs out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownExpired {
    /// Screen owning the countdown.
    pub screen_id: String,
    /// Option picked as a result.
    pub default_index: usize,
}

/// Emitted when a menu option is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceMade {
    /// Screen the choice was made on.
    pub screen_id: String,
    /// Picked option.
    pub index: usize,
    /// Screen the option leads to.
    pub next: String,
    /// Whether it came from a timed menu.
    pub timed: bool,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NarrativeEventKind {
    /// A book was loaded.
    BookLoaded(BookLoaded),
    /// A screen was entered.
    ScreenEntered(ScreenEntered),
    /// A dialogue line was advanced.
    DialogueAdvanced(DialogueAdvanced),
    /// A choice menu opened.
    ChoicesPresented(ChoicesPresented),
    /// A countdown started.
    CountdownStarted(CountdownStarted),
    /// A countdown ticked.
    CountdownTicked(CountdownTicked),
    /// A countdown expired.
    CountdownExpired(CountdownExpired),
    /// An option was picked.
    ChoiceMade(ChoiceMade),
}

impl NarrativeEventKind {
    /// The event type name for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::BookLoaded(_) => BOOK_LOADED_EVENT_TYPE,
            Self::ScreenEntered(_) => SCREEN_ENTERED_EVENT_TYPE,
            Self::DialogueAdvanced(_) => DIALOGUE_ADVANCED_EVENT_TYPE,
            Self::ChoicesPresented(_) => CHOICES_PRESENTED_EVENT_TYPE,
            Self::CountdownStarted(_) => COUNTDOWN_STARTED_EVENT_TYPE,
            Self::CountdownTicked(_) => COUNTDOWN_TICKED_EVENT_TYPE,
            Self::CountdownExpired(_) => COUNTDOWN_EXPIRED_EVENT_TYPE,
            Self::ChoiceMade(_) => CHOICE_MADE_EVENT_TYPE,
        }
    }
}

/// Narrative event envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: NarrativeEventKind,
}

impl DomainEvent for NarrativeEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("NarrativeEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
