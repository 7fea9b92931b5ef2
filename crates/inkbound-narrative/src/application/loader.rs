//! Book decoding.
//!
//! A book is decoded completely before the interpreter touches its state, so
//! a document that fails here leaves the running session untouched.

use std::path::Path;

use inkbound_core::error::LoadError;
use sha2::{Digest, Sha256};

use crate::domain::book::Book;

/// Document encodings a locator can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookFormat {
    /// `.json`, and the fallback for unrecognized extensions.
    Json,
    /// `.yaml` / `.yml`.
    Yaml,
}

impl BookFormat {
    /// Picks the encoding from the locator's extension.
    #[must_use]
    pub fn from_locator(locator: &str) -> Self {
        let extension = Path::new(locator)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Decodes `raw` into a [`Book`].
///
/// # Errors
///
/// Returns `LoadError::Parse` if the document does not match the book schema.
pub fn decode_book(locator: &str, raw: &str) -> Result<Book, LoadError> {
    let decoded = match BookFormat::from_locator(locator) {
        BookFormat::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
        BookFormat::Yaml => serde_yaml::from_str(raw).map_err(|e| e.to_string()),
    };
    decoded.map_err(|message| LoadError::Parse {
        locator: locator.to_owned(),
        message,
    })
}

/// SHA-256 hex digest identifying a document revision.
#[must_use]
pub fn version_hash(raw: &str) -> String {
    Sha256::digest(raw.as_bytes())
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::ScreenKind;

    #[test]
    fn test_format_follows_extension() {
        assert_eq!(BookFormat::from_locator("books/a.json"), BookFormat::Json);
        assert_eq!(BookFormat::from_locator("books/a.YAML"), BookFormat::Yaml);
        assert_eq!(BookFormat::from_locator("books/a.yml"), BookFormat::Yaml);
        assert_eq!(BookFormat::from_locator("books/a"), BookFormat::Json);
    }

    #[test]
    fn test_decode_json_book() {
        let raw = r#"{ "start": "a", "screens": { "a": { "type": "splash", "background": "img/title.png" } } }"#;

        let book = decode_book("books/startmenu.json", raw).unwrap();

        assert_eq!(book.start, "a");
        assert_eq!(book.screens["a"].kind, ScreenKind::Splash);
        assert_eq!(book.screens["a"].background.as_deref(), Some("img/title.png"));
    }

    #[test]
    fn test_decode_yaml_book() {
        let raw = "start: a\nscreens:\n  a:\n    type: dialogue\n    dialogue:\n      - speaker: N\n        text: Hi\n    next: b\n  b:\n    type: splash\n";

        let book = decode_book("books/chapter1.yaml", raw).unwrap();

        assert_eq!(book.screens["a"].lines()[0].text, "Hi");
        assert_eq!(book.screens["a"].next.as_deref(), Some("b"));
    }

    #[test]
    fn test_malformed_document_is_a_parse_error() {
        let err = decode_book("books/broken.json", "{ \"start\": ").unwrap_err();

        assert!(matches!(
            err,
            LoadError::Parse { ref locator, .. } if locator == "books/broken.json"
        ));
    }

    #[test]
    fn test_missing_start_is_a_parse_error() {
        let err = decode_book("books/empty.json", "{ \"screens\": {} }").unwrap_err();

        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_version_hash_is_stable_hex_sha256() {
        let hash = version_hash("abc");

        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
