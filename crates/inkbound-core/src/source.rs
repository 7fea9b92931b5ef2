//! Book retrieval abstraction.

use async_trait::async_trait;

use crate::error::LoadError;

/// Retrieves the raw text of a book document by locator.
///
/// Implementations only move bytes; decoding happens in the interpreter so
/// a half-decoded book is never observable.
#[async_trait]
pub trait BookSource: Send + Sync {
    /// Fetch the document addressed by `locator`.
    async fn fetch(&self, locator: &str) -> Result<String, LoadError>;
}
