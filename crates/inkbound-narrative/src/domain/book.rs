//! Content model for authored books.
//!
//! These types are passive: they describe what an author wrote and carry no
//! behavior beyond convenience lookups. Unknown screen and element types are
//! accepted and left inert.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Countdown length used when a timed choice omits `time` or sets it to 0.
pub const DEFAULT_COUNTDOWN_SECS: u32 = 5;

/// The full authored narrative document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Id of the screen shown after the book is loaded.
    pub start: String,
    /// Every addressable screen, keyed by id.
    #[serde(default)]
    pub screens: BTreeMap<String, Screen>,
}

impl Book {
    /// Looks up a screen by id.
    #[must_use]
    pub fn screen(&self, id: &str) -> Option<&Screen> {
        self.screens.get(id)
    }

    /// Returns `true` if `id` names a screen in this book.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.screens.contains_key(id)
    }
}

/// The authored `type` of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenKind {
    /// Full-screen title or interstitial panel.
    Splash,
    /// Generic panel of labels and buttons.
    Ui,
    /// Sequence of spoken lines.
    Dialogue,
    /// Menu awaiting an explicit pick.
    Choices,
    /// Menu with a countdown and a default pick.
    Timed,
    /// Any type this runtime does not understand.
    #[default]
    #[serde(other)]
    Unknown,
}

/// One addressable unit of content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    /// Authored screen type.
    #[serde(rename = "type", default)]
    pub kind: ScreenKind,
    /// Background asset reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Page-covering asset reference; preferred over `background` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    /// Ordered lines shown one per step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialogue: Option<Vec<DialogueLine>>,
    /// Screen reached once this one is exhausted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Deferred effect run once this screen is exhausted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    /// Presentation elements (labels, buttons).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<Element>,
    /// Choice menu opened once dialogue is exhausted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
    /// Countdown menu started once dialogue is exhausted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timed_choices: Option<TimedChoiceSpec>,
}

impl Screen {
    /// The dialogue lines, empty when the screen has none.
    #[must_use]
    pub fn lines(&self) -> &[DialogueLine] {
        self.dialogue.as_deref().unwrap_or_default()
    }

    /// The options offered while this screen's choice menu is open.
    ///
    /// Authored `choices` win; otherwise every button carrying a `navigate`
    /// action becomes an option.
    #[must_use]
    pub fn choice_set(&self) -> Cow<'_, [Choice]> {
        if let Some(choices) = &self.choices {
            return Cow::Borrowed(choices.as_slice());
        }
        Cow::Owned(
            self.buttons()
                .filter_map(|button| match &button.action {
                    Some(Action::Navigate { screen }) => Some(Choice {
                        text: button.text.clone(),
                        next: screen.clone(),
                    }),
                    _ => None,
                })
                .collect(),
        )
    }

    /// Button elements in authored order.
    pub fn buttons(&self) -> impl Iterator<Item = &Element> {
        self.elements
            .iter()
            .filter(|element| element.kind == ElementKind::Button)
    }

    /// Asset to warm up when the screen is entered.
    #[must_use]
    pub fn backdrop(&self) -> Option<&str> {
        self.cover.as_deref().or(self.background.as_deref())
    }
}

/// A single spoken line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    /// Who says it.
    pub speaker: String,
    /// What is said.
    pub text: String,
}

/// One option in a choice menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Label shown to the viewer.
    pub text: String,
    /// Screen reached when picked.
    pub next: String,
}

/// A choice menu with a countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedChoiceSpec {
    /// Countdown length in whole seconds.
    #[serde(default = "default_time")]
    pub time: u32,
    /// Option picked when the countdown expires.
    #[serde(default)]
    pub default_index: usize,
    /// The offered options.
    #[serde(default)]
    pub options: Vec<Choice>,
}

fn default_time() -> u32 {
    DEFAULT_COUNTDOWN_SECS
}

impl TimedChoiceSpec {
    /// Effective countdown length; a zero `time` falls back to the default.
    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        if self.time == 0 {
            DEFAULT_COUNTDOWN_SECS
        } else {
            self.time
        }
    }
}

/// A deferred effect a screen (or button) can request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    /// Move to another screen in the active book.
    #[serde(rename = "navigate")]
    Navigate {
        /// Target screen id.
        screen: String,
    },
    /// Replace the active book.
    #[serde(rename = "loadBook")]
    LoadBook {
        /// Locator of the new book.
        path: String,
    },
    /// Fall through to the screen's post-dialogue resolution.
    #[serde(rename = "advance")]
    Advance,
}

/// Kind of a presentation element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Static text.
    Label,
    /// Clickable region, optionally carrying an action.
    Button,
    /// Anything else; drawn or ignored by the renderer.
    #[default]
    #[serde(other)]
    Other,
}

/// A presentation element. Layout fields stay opaque to the interpreter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Element {
    /// Element kind.
    #[serde(rename = "type", default)]
    pub kind: ElementKind,
    /// Displayed text.
    #[serde(default)]
    pub text: String,
    /// Effect run when a button is pressed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    /// Position, colors, fonts and any other renderer-only fields.
    #[serde(flatten)]
    pub layout: serde_json::Map<String, serde_json::Value>,
}
