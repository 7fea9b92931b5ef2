//! Narrative state: the interpreter's cursor into a book.

use super::book::{Book, Screen};
use super::countdown::Countdown;
use super::mode::{Mode, derive_mode};

/// The only mutable entity of the runtime.
///
/// Owned by the interpreter; renderers read it through the accessors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NarrativeState {
    pub(crate) book: Option<Book>,
    pub(crate) screen_id: Option<String>,
    pub(crate) dialogue_index: usize,
    pub(crate) scroll_offset: f64,
    /// Set when a screen's dialogue ran out into its `choices` menu.
    pub(crate) menu_open: bool,
    pub(crate) countdown: Countdown,
}

impl NarrativeState {
    /// Creates an empty state with no book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active book.
    #[must_use]
    pub fn book(&self) -> Option<&Book> {
        self.book.as_ref()
    }

    /// Id of the active screen.
    #[must_use]
    pub fn screen_id(&self) -> Option<&str> {
        self.screen_id.as_deref()
    }

    /// The active screen, if the id resolves in the active book.
    #[must_use]
    pub fn current_screen(&self) -> Option<&Screen> {
        let book = self.book.as_ref()?;
        book.screen(self.screen_id.as_deref()?)
    }

    /// Cursor into the active screen's dialogue.
    #[must_use]
    pub fn dialogue_index(&self) -> usize {
        self.dialogue_index
    }

    /// Vertical scroll of long panels.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// The timed-choice countdown.
    #[must_use]
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Whole seconds left on the countdown, 0 when idle.
    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    /// What is currently on screen.
    ///
    /// A running countdown pins the mode to `Timed` and an opened menu to
    /// `Choice`; otherwise the active screen's type decides.
    #[must_use]
    pub fn mode(&self) -> Mode {
        if self.countdown.is_running() {
            Mode::Timed
        } else if self.menu_open {
            Mode::Choice
        } else {
            derive_mode(self.current_screen())
        }
    }

    /// Replaces the book and moves the cursor to its start screen.
    pub(crate) fn adopt_book(&mut self, book: Book) {
        let start = book.start.clone();
        self.countdown.cancel();
        self.book = Some(book);
        self.place_cursor(start);
    }

    /// Moves the cursor to `screen_id` within the active book.
    pub(crate) fn enter_screen(&mut self, screen_id: &str) {
        self.countdown.cancel();
        self.place_cursor(screen_id.to_owned());
    }

    fn place_cursor(&mut self, screen_id: String) {
        self.screen_id = Some(screen_id);
        self.dialogue_index = 0;
        self.scroll_offset = 0.0;
        self.menu_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::{Choice, ScreenKind, TimedChoiceSpec};

    fn two_screen_book() -> Book {
        let mut book = Book {
            start: "a".into(),
            screens: std::collections::BTreeMap::new(),
        };
        book.screens.insert(
            "a".into(),
            Screen {
                kind: ScreenKind::Dialogue,
                ..Screen::default()
            },
        );
        book.screens.insert(
            "b".into(),
            Screen {
                kind: ScreenKind::Choices,
                ..Screen::default()
            },
        );
        book
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = NarrativeState::new();

        assert!(state.book().is_none());
        assert!(state.screen_id().is_none());
        assert_eq!(state.dialogue_index(), 0);
        assert_eq!(state.mode(), Mode::None);
    }

    #[test]
    fn test_adopt_book_moves_to_start_screen() {
        let mut state = NarrativeState::new();

        state.adopt_book(two_screen_book());

        assert_eq!(state.screen_id(), Some("a"));
        assert_eq!(state.mode(), Mode::Dialogue);
    }

    #[test]
    fn test_enter_screen_resets_cursor_and_countdown() {
        // Arrange
        let mut state = NarrativeState::new();
        state.adopt_book(two_screen_book());
        state.dialogue_index = 3;
        state.scroll_offset = 120.0;
        state.menu_open = true;
        state.countdown.start(
            "a",
            &TimedChoiceSpec {
                time: 5,
                default_index: 0,
                options: vec![Choice {
                    text: "Run".into(),
                    next: "b".into(),
                }],
            },
        );

        // Act
        state.enter_screen("b");

        // Assert
        assert_eq!(state.screen_id(), Some("b"));
        assert_eq!(state.dialogue_index(), 0);
        assert!(state.scroll_offset().abs() < f64::EPSILON);
        assert!(!state.countdown().is_running());
        assert_eq!(state.mode(), Mode::Choice);
    }

    #[test]
    fn test_dangling_screen_id_derives_none() {
        let mut state = NarrativeState::new();
        state.adopt_book(two_screen_book());

        state.enter_screen("missing");

        assert!(state.current_screen().is_none());
        assert_eq!(state.mode(), Mode::None);
    }
}
