//! Content checks for authored books.
//!
//! The interpreter tolerates every issue listed here (the affected screen or
//! option simply does nothing); the checks exist so hosts can log them after a
//! load.

use thiserror::Error;

use super::book::{Action, Book, ScreenKind};

/// A content error found in a book.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentIssue {
    /// `start` does not name a screen.
    #[error("start screen '{start}' is not defined")]
    MissingStart {
        /// The dangling start id.
        start: String,
    },

    /// A `next`, choice, or navigate action points nowhere.
    #[error("screen '{screen}' {field} references undefined screen '{target}'")]
    DanglingReference {
        /// Screen holding the reference.
        screen: String,
        /// Where in the screen the reference lives.
        field: String,
        /// The undefined target.
        target: String,
    },

    /// The screen's `type` is not understood; it will be inert.
    #[error("screen '{screen}' has an unknown type")]
    UnknownScreenType {
        /// The screen.
        screen: String,
    },

    /// A `choices` screen has nothing to choose from.
    #[error("choice screen '{screen}' has no options")]
    EmptyChoiceSet {
        /// The screen.
        screen: String,
    },

    /// A `timed` screen has no `timedChoices`.
    #[error("timed screen '{screen}' has no timedChoices")]
    MissingTimedChoices {
        /// The screen.
        screen: String,
    },

    /// `timedChoices.options` is empty.
    #[error("screen '{screen}' timedChoices has no options")]
    EmptyTimedOptions {
        /// The screen.
        screen: String,
    },

    /// `timedChoices.defaultIndex` is past the last option.
    #[error("screen '{screen}' timedChoices defaultIndex {index} is past {len} options")]
    DefaultIndexOutOfRange {
        /// The screen.
        screen: String,
        /// Authored default.
        index: usize,
        /// Number of options.
        len: usize,
    },
}

/// Lists every content issue in `book`, in screen-id order.
#[must_use]
pub fn validate_book(book: &Book) -> Vec<ContentIssue> {
    let mut issues = Vec::new();

    if !book.contains(&book.start) {
        issues.push(ContentIssue::MissingStart {
            start: book.start.clone(),
        });
    }

    for (id, screen) in &book.screens {
        let mut check = |field: String, target: &str| {
            if !book.contains(target) {
                issues.push(ContentIssue::DanglingReference {
                    screen: id.clone(),
                    field,
                    target: target.to_owned(),
                });
            }
        };

        if let Some(next) = &screen.next {
            check("next".to_owned(), next);
        }
        if let Some(Action::Navigate { screen: target }) = &screen.action {
            check("action".to_owned(), target);
        }
        for (i, choice) in screen.choices.iter().flatten().enumerate() {
            check(format!("choices[{i}]"), &choice.next);
        }
        if let Some(timed) = &screen.timed_choices {
            for (i, option) in timed.options.iter().enumerate() {
                check(format!("timedChoices.options[{i}]"), &option.next);
            }
        }
        for (i, element) in screen.elements.iter().enumerate() {
            if let Some(Action::Navigate { screen: target }) = &element.action {
                check(format!("elements[{i}]"), target);
            }
        }

        match screen.kind {
            ScreenKind::Unknown => {
                issues.push(ContentIssue::UnknownScreenType { screen: id.clone() });
            }
            ScreenKind::Choices if screen.choice_set().is_empty() => {
                issues.push(ContentIssue::EmptyChoiceSet { screen: id.clone() });
            }
            ScreenKind::Timed if screen.timed_choices.is_none() => {
                issues.push(ContentIssue::MissingTimedChoices { screen: id.clone() });
            }
            _ => {}
        }

        if let Some(timed) = &screen.timed_choices {
            if timed.options.is_empty() {
                issues.push(ContentIssue::EmptyTimedOptions { screen: id.clone() });
            } else if timed.default_index >= timed.options.len() {
                issues.push(ContentIssue::DefaultIndexOutOfRange {
                    screen: id.clone(),
                    index: timed.default_index,
                    len: timed.options.len(),
                });
            }
        }
    }

    issues
}
