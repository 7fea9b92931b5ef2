//! Inputs a host can feed into a play session.

use super::book::Action;

/// One viewer or host request, translated from raw pointer/keyboard input.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionInput {
    /// "Advance requested": next line or post-dialogue resolution.
    Advance,
    /// "Choice N selected": routed to the menu or the countdown by mode.
    Select(usize),
    /// Pick from an open choice menu.
    Choose(usize),
    /// Pick from a timed choice menu.
    ChooseTimed(usize),
    /// Jump to a screen in the active book.
    Navigate(String),
    /// Run an action, e.g. one attached to a drawn button.
    RunAction(Action),
    /// Press the n-th button element of the active screen.
    PressButton(usize),
    /// Scroll a long panel by a signed delta.
    Scroll(f64),
    /// Load a book by locator.
    LoadBook(String),
}
