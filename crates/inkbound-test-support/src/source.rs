//! Test book sources: in-memory `BookSource` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use inkbound_core::error::LoadError;
use inkbound_core::source::BookSource;

/// A book source serving documents from memory. Unknown locators fail with
/// `LoadError::NotFound`. Every requested locator is recorded.
#[derive(Debug, Default)]
pub struct StaticBookSource {
    documents: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl StaticBookSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `raw` at `locator`.
    #[must_use]
    pub fn with_document(mut self, locator: &str, raw: impl Into<String>) -> Self {
        self.documents.insert(locator.to_owned(), raw.into());
        self
    }

    /// Returns every locator fetched so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookSource for StaticBookSource {
    async fn fetch(&self, locator: &str) -> Result<String, LoadError> {
        self.requested.lock().unwrap().push(locator.to_owned());
        self.documents
            .get(locator)
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                locator: locator.to_owned(),
            })
    }
}

/// A book source that always fails to fetch. Useful for testing that a failed
/// load leaves the session untouched.
#[derive(Debug)]
pub struct FailingBookSource;

#[async_trait]
impl BookSource for FailingBookSource {
    async fn fetch(&self, locator: &str) -> Result<String, LoadError> {
        Err(LoadError::Fetch {
            locator: locator.to_owned(),
            message: "connection refused".into(),
        })
    }
}
