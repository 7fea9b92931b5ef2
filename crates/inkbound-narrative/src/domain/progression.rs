//! Dialogue advancement rules.
//!
//! `plan_advance` decides, without mutating anything, which single step an
//! advance request performs. The interpreter then carries out exactly that
//! step.

use super::book::{Action, ScreenKind, TimedChoiceSpec};
use super::state::NarrativeState;

/// The one thing an advance request does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceStep {
    /// Show the next dialogue line.
    NextLine,
    /// Open the screen's choice menu.
    OpenChoices,
    /// Start the screen's countdown.
    StartCountdown(TimedChoiceSpec),
    /// Run the screen's action (never `Action::Advance`).
    Dispatch(Action),
    /// Move to the screen's `next`.
    GoTo(String),
    /// Nothing: no screen, an inert screen, a countdown already running, or a
    /// dead end.
    Stay,
}

/// Works out what advancing from `state` does.
///
/// Resolution order once dialogue is exhausted: choices, timed choices,
/// action, next. An `advance` action is skipped here since running it would
/// only re-enter this resolution.
#[must_use]
pub fn plan_advance(state: &NarrativeState) -> AdvanceStep {
    let Some(screen) = state.current_screen() else {
        return AdvanceStep::Stay;
    };
    if screen.kind == ScreenKind::Unknown || state.countdown().is_running() {
        return AdvanceStep::Stay;
    }

    let line_count = screen.lines().len();
    if state.dialogue_index() + 1 < line_count {
        return AdvanceStep::NextLine;
    }

    if screen.choices.is_some() {
        return AdvanceStep::OpenChoices;
    }
    if let Some(timed) = &screen.timed_choices {
        return AdvanceStep::StartCountdown(timed.clone());
    }
    match &screen.action {
        Some(Action::Advance) | None => {}
        Some(action) => return AdvanceStep::Dispatch(action.clone()),
    }
    if let Some(next) = &screen.next {
        return AdvanceStep::GoTo(next.clone());
    }
    AdvanceStep::Stay
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::book::{Book, Choice, DialogueLine, Screen, ScreenKind};

    fn line(text: &str) -> DialogueLine {
        DialogueLine {
            speaker: "N".into(),
            text: text.into(),
        }
    }

    fn choice(next: &str) -> Choice {
        Choice {
            text: next.to_uppercase(),
            next: next.into(),
        }
    }

    fn state_on(screen: Screen) -> NarrativeState {
        let mut screens = BTreeMap::new();
        screens.insert("s".to_owned(), screen);
        let mut state = NarrativeState::new();
        state.adopt_book(Book {
            start: "s".into(),
            screens,
        });
        state
    }

    fn dialogue_screen(lines: usize) -> Screen {
        Screen {
            kind: ScreenKind::Dialogue,
            dialogue: Some((0..lines).map(|i| line(&i.to_string())).collect()),
            ..Screen::default()
        }
    }

    #[test]
    fn test_no_book_stays() {
        assert_eq!(plan_advance(&NarrativeState::new()), AdvanceStep::Stay);
    }

    #[test]
    fn test_remaining_lines_advance_dialogue() {
        let mut state = state_on(Screen {
            next: Some("elsewhere".into()),
            ..dialogue_screen(3)
        });

        assert_eq!(plan_advance(&state), AdvanceStep::NextLine);
        state.dialogue_index = 1;
        assert_eq!(plan_advance(&state), AdvanceStep::NextLine);
        state.dialogue_index = 2;
        assert_eq!(
            plan_advance(&state),
            AdvanceStep::GoTo("elsewhere".into())
        );
    }

    #[test]
    fn test_choices_win_over_everything_else() {
        let state = state_on(Screen {
            choices: Some(vec![choice("a")]),
            timed_choices: Some(TimedChoiceSpec {
                time: 3,
                default_index: 0,
                options: vec![choice("b")],
            }),
            action: Some(Action::Navigate { screen: "c".into() }),
            next: Some("d".into()),
            ..dialogue_screen(1)
        });

        assert_eq!(plan_advance(&state), AdvanceStep::OpenChoices);
    }

    #[test]
    fn test_timed_choices_win_over_action_and_next() {
        let timed = TimedChoiceSpec {
            time: 3,
            default_index: 0,
            options: vec![choice("b")],
        };
        let state = state_on(Screen {
            timed_choices: Some(timed.clone()),
            next: Some("d".into()),
            ..dialogue_screen(0)
        });

        assert_eq!(plan_advance(&state), AdvanceStep::StartCountdown(timed));
    }

    #[test]
    fn test_action_wins_over_next() {
        let state = state_on(Screen {
            action: Some(Action::LoadBook {
                path: "books/chapter2.json".into(),
            }),
            next: Some("d".into()),
            ..dialogue_screen(1)
        });

        assert_eq!(
            plan_advance(&state),
            AdvanceStep::Dispatch(Action::LoadBook {
                path: "books/chapter2.json".into()
            })
        );
    }

    #[test]
    fn test_advance_action_falls_through_to_next() {
        let state = state_on(Screen {
            kind: ScreenKind::Splash,
            action: Some(Action::Advance),
            next: Some("menu".into()),
            ..Screen::default()
        });

        assert_eq!(plan_advance(&state), AdvanceStep::GoTo("menu".into()));
    }

    #[test]
    fn test_exhausted_screen_without_exits_is_a_dead_end() {
        let state = state_on(dialogue_screen(1));

        assert_eq!(plan_advance(&state), AdvanceStep::Stay);
    }

    #[test]
    fn test_unknown_screen_type_is_inert() {
        let state = state_on(Screen {
            kind: ScreenKind::Unknown,
            action: Some(Action::Navigate { screen: "c".into() }),
            next: Some("d".into()),
            ..dialogue_screen(2)
        });

        assert_eq!(plan_advance(&state), AdvanceStep::Stay);
    }

    #[test]
    fn test_running_countdown_blocks_advance() {
        let timed = TimedChoiceSpec {
            time: 3,
            default_index: 0,
            options: vec![choice("b")],
        };
        let mut state = state_on(Screen {
            kind: ScreenKind::Timed,
            timed_choices: Some(timed.clone()),
            ..Screen::default()
        });
        state.countdown.start("s", &timed);

        assert_eq!(plan_advance(&state), AdvanceStep::Stay);
    }
}
