//! Mode derivation.

use serde::{Deserialize, Serialize};

use super::book::{Screen, ScreenKind};

/// What kind of thing is currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Title or interstitial panel.
    Splash,
    /// Generic panel.
    Ui,
    /// Spoken lines.
    Dialogue,
    /// Choice menu awaiting a pick.
    Choice,
    /// Timed choice menu.
    Timed,
    /// Nothing to show: no book, a dangling screen id, or an unknown type.
    None,
}

/// Maps the active screen's authored type to a mode.
#[must_use]
pub fn derive_mode(screen: Option<&Screen>) -> Mode {
    let Some(screen) = screen else {
        return Mode::None;
    };
    match screen.kind {
        ScreenKind::Splash => Mode::Splash,
        ScreenKind::Ui => Mode::Ui,
        ScreenKind::Dialogue => Mode::Dialogue,
        ScreenKind::Choices => Mode::Choice,
        ScreenKind::Timed => Mode::Timed,
        ScreenKind::Unknown => Mode::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen_of(kind: ScreenKind) -> Screen {
        Screen {
            kind,
            ..Screen::default()
        }
    }

    #[test]
    fn test_no_screen_derives_none() {
        assert_eq!(derive_mode(None), Mode::None);
    }

    #[test]
    fn test_each_screen_type_maps_to_its_mode() {
        let cases = [
            (ScreenKind::Splash, Mode::Splash),
            (ScreenKind::Ui, Mode::Ui),
            (ScreenKind::Dialogue, Mode::Dialogue),
            (ScreenKind::Choices, Mode::Choice),
            (ScreenKind::Timed, Mode::Timed),
            (ScreenKind::Unknown, Mode::None),
        ];

        for (kind, expected) in cases {
            assert_eq!(derive_mode(Some(&screen_of(kind))), expected, "{kind:?}");
        }
    }
}
