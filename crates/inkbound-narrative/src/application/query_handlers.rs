//! Query handlers for the renderer.
//!
//! The renderer never reads the book directly; it draws a `ScreenView`
//! built from the narrative state after each change.

use serde::Serialize;

use crate::domain::book::{DialogueLine, Element};
use crate::domain::mode::Mode;
use crate::domain::state::NarrativeState;

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenView {
    /// Active screen id, if any.
    pub screen_id: Option<String>,
    /// Presentation mode.
    pub mode: Mode,
    /// Background asset reference.
    pub background: Option<String>,
    /// Page-covering asset reference.
    pub cover: Option<String>,
    /// The line currently shown.
    pub line: Option<DialogueLine>,
    /// Index of that line.
    pub dialogue_index: usize,
    /// Number of lines on the screen.
    pub dialogue_len: usize,
    /// Option labels of the open menu, in order.
    pub choices: Vec<String>,
    /// Seconds left on the countdown, when one is running.
    pub time_remaining: Option<u32>,
    /// Vertical scroll of long panels.
    pub scroll_offset: f64,
    /// Presentation elements.
    pub elements: Vec<Element>,
}

/// Builds the view of the current state.
#[must_use]
pub fn screen_view(state: &NarrativeState) -> ScreenView {
    let mode = state.mode();
    let screen = state.current_screen();

    let choices = screen
        .map(|screen| match mode {
            Mode::Choice => screen
                .choice_set()
                .iter()
                .map(|choice| choice.text.clone())
                .collect(),
            Mode::Timed => screen
                .timed_choices
                .iter()
                .flat_map(|timed| timed.options.iter())
                .map(|option| option.text.clone())
                .collect(),
            _ => Vec::new(),
        })
        .unwrap_or_default();

    ScreenView {
        screen_id: state.screen_id().map(str::to_owned),
        mode,
        background: screen.and_then(|screen| screen.background.clone()),
        cover: screen.and_then(|screen| screen.cover.clone()),
        line: screen.and_then(|screen| screen.lines().get(state.dialogue_index()).cloned()),
        dialogue_index: state.dialogue_index(),
        dialogue_len: screen.map_or(0, |screen| screen.lines().len()),
        choices,
        time_remaining: state
            .countdown()
            .is_running()
            .then(|| state.time_remaining()),
        scroll_offset: state.scroll_offset(),
        elements: screen.map(|screen| screen.elements.clone()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use inkbound_test_support::{FixedClock, RecordingPreloader, StaticBookSource};

    use super::*;
    use crate::application::interpreter::Interpreter;

    const BOOK: &str = r#"{
        "start": "hall",
        "screens": {
            "hall": {
                "type": "dialogue",
                "background": "img/hall.png",
                "dialogue": [{ "speaker": "Ada", "text": "Listen." }, { "speaker": "Ada", "text": "A clock ticks." }],
                "timedChoices": { "time": 4, "options": [{ "text": "Wait", "next": "hall" }, { "text": "Leave", "next": "door" }] }
            },
            "door": { "type": "choices", "elements": [{ "type": "button", "text": "Back", "action": { "type": "navigate", "screen": "hall" } }] }
        }
    }"#;

    async fn interpreter() -> Interpreter {
        let source = StaticBookSource::new().with_document("books/hall.json", BOOK);
        let mut interpreter = Interpreter::new(
            Arc::new(source),
            Arc::new(RecordingPreloader::new()),
            Arc::new(FixedClock::default()),
        );
        interpreter.load_book("books/hall.json").await.unwrap();
        interpreter
    }

    #[test]
    fn test_empty_state_view() {
        let view = screen_view(&NarrativeState::new());

        assert_eq!(view.screen_id, None);
        assert_eq!(view.mode, Mode::None);
        assert!(view.line.is_none());
        assert!(view.choices.is_empty());
        assert_eq!(view.time_remaining, None);
    }

    #[tokio::test]
    async fn test_dialogue_view_shows_current_line_only() {
        let mut interpreter = interpreter().await;
        interpreter.advance().await.unwrap();

        let view = screen_view(interpreter.state());

        assert_eq!(view.mode, Mode::Dialogue);
        assert_eq!(view.line.map(|line| line.text), Some("A clock ticks.".into()));
        assert_eq!(view.dialogue_index, 1);
        assert_eq!(view.dialogue_len, 2);
        assert_eq!(view.background.as_deref(), Some("img/hall.png"));
        assert!(view.choices.is_empty());
    }

    #[tokio::test]
    async fn test_countdown_view_lists_timed_options_and_time() {
        let mut interpreter = interpreter().await;
        interpreter.advance().await.unwrap();
        interpreter.advance().await.unwrap();
        interpreter.tick();

        let view = screen_view(interpreter.state());

        assert_eq!(view.mode, Mode::Timed);
        assert_eq!(view.choices, vec!["Wait".to_owned(), "Leave".to_owned()]);
        assert_eq!(view.time_remaining, Some(3));
    }

    #[tokio::test]
    async fn test_menu_view_lists_button_derived_choices() {
        let mut interpreter = interpreter().await;
        interpreter.navigate("door");

        let view = screen_view(interpreter.state());

        assert_eq!(view.mode, Mode::Choice);
        assert_eq!(view.choices, vec!["Back".to_owned()]);
        assert_eq!(view.elements.len(), 1);
    }
}
