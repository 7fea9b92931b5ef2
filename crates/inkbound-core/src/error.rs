//! Error types surfaced across the interpreter boundary.

use thiserror::Error;

/// Failure while retrieving or decoding a book.
///
/// A load error never mutates narrative state; the host decides whether to
/// offer a retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Nothing exists at the locator.
    #[error("book not found: {locator}")]
    NotFound {
        /// The locator that was requested.
        locator: String,
    },

    /// The document could not be retrieved.
    #[error("failed to fetch book {locator}: {message}")]
    Fetch {
        /// The locator that was requested.
        locator: String,
        /// Underlying transport or I/O failure.
        message: String,
    },

    /// The document was retrieved but is not a valid book.
    #[error("failed to parse book {locator}: {message}")]
    Parse {
        /// The locator that was requested.
        locator: String,
        /// Decoder diagnostic.
        message: String,
    },
}

impl LoadError {
    /// Returns the locator the failed load was addressed to.
    #[must_use]
    pub fn locator(&self) -> &str {
        match self {
            Self::NotFound { locator }
            | Self::Fetch { locator, .. }
            | Self::Parse { locator, .. } => locator,
        }
    }
}
