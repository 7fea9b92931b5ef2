//! Player configuration, read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

/// Default content directory.
pub const DEFAULT_CONTENT_ROOT: &str = ".";
/// Default first book.
pub const DEFAULT_START_BOOK: &str = "books/startmenu.json";
/// Default countdown tick period in milliseconds.
pub const DEFAULT_TICK_MILLIS: u64 = 1_000;

/// Resolved player settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Directory books and assets resolve against (`INKBOUND_CONTENT_ROOT`).
    pub content_root: PathBuf,
    /// Locator of the first book (`INKBOUND_START_BOOK`).
    pub start_book: String,
    /// Countdown tick period (`INKBOUND_TICK_MILLIS`).
    pub tick_period: Duration,
}

impl PlayerConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, applying defaults for unset
    /// keys.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `INKBOUND_TICK_MILLIS` is not a positive
    /// integer or `INKBOUND_START_BOOK` is blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let content_root = lookup("INKBOUND_CONTENT_ROOT")
            .unwrap_or_else(|| DEFAULT_CONTENT_ROOT.to_string())
            .into();
        let start_book =
            lookup("INKBOUND_START_BOOK").unwrap_or_else(|| DEFAULT_START_BOOK.to_string());
        if start_book.trim().is_empty() {
            return Err(AppError::Config(
                "INKBOUND_START_BOOK must not be blank".into(),
            ));
        }
        let tick_millis: u64 = lookup("INKBOUND_TICK_MILLIS")
            .unwrap_or_else(|| DEFAULT_TICK_MILLIS.to_string())
            .parse()
            .map_err(|e| {
                AppError::Config(format!("INKBOUND_TICK_MILLIS must be a valid u64: {e}"))
            })?;
        if tick_millis == 0 {
            return Err(AppError::Config(
                "INKBOUND_TICK_MILLIS must be greater than zero".into(),
            ));
        }

        Ok(Self {
            content_root,
            start_book,
            tick_period: Duration::from_millis(tick_millis),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply_when_unset() {
        let config = PlayerConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.content_root, PathBuf::from("."));
        assert_eq!(config.start_book, "books/startmenu.json");
        assert_eq!(config.tick_period, Duration::from_secs(1));
    }

    #[test]
    fn test_values_are_read_from_lookup() {
        let config = PlayerConfig::from_lookup(lookup_from(&[
            ("INKBOUND_CONTENT_ROOT", "/srv/stories"),
            ("INKBOUND_START_BOOK", "books/chase.yaml"),
            ("INKBOUND_TICK_MILLIS", "250"),
        ]))
        .unwrap();

        assert_eq!(config.content_root, PathBuf::from("/srv/stories"));
        assert_eq!(config.start_book, "books/chase.yaml");
        assert_eq!(config.tick_period, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_tick_period_is_rejected() {
        let garbage = PlayerConfig::from_lookup(lookup_from(&[("INKBOUND_TICK_MILLIS", "soon")]));
        let zero = PlayerConfig::from_lookup(lookup_from(&[("INKBOUND_TICK_MILLIS", "0")]));

        assert!(matches!(garbage, Err(AppError::Config(_))));
        assert!(matches!(zero, Err(AppError::Config(_))));
    }

    #[test]
    fn test_blank_start_book_is_rejected() {
        let result = PlayerConfig::from_lookup(lookup_from(&[("INKBOUND_START_BOOK", "  ")]));

        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
