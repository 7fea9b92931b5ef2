//! Filesystem asset preloader.

use std::path::PathBuf;

use inkbound_book_store::fs_book_source::resolve_under;
use inkbound_core::assets::AssetPreloader;
use tracing::{debug, warn};

/// Checks that referenced images exist under the content root.
///
/// A terminal cannot draw images, so "preloading" only verifies the file in
/// the background and logs missing assets for the author.
#[derive(Debug, Clone)]
pub struct FsAssetPreloader {
    root: PathBuf,
}

impl FsAssetPreloader {
    /// Creates a preloader rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of `reference` under the content root, or `None` if it would
    /// escape the root.
    #[must_use]
    pub fn resolve(&self, reference: &str) -> Option<PathBuf> {
        resolve_under(&self.root, reference)
    }
}

impl AssetPreloader for FsAssetPreloader {
    fn preload(&self, reference: &str) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let Some(path) = self.resolve(reference) else {
            warn!(%reference, "asset reference escapes the content root");
            return;
        };
        let reference = reference.to_owned();
        runtime.spawn(async move {
            match tokio::fs::metadata(&path).await {
                Ok(meta) => debug!(%reference, bytes = meta.len(), "asset available"),
                Err(err) => warn!(%reference, error = %err, "asset missing"),
            }
        });
    }
}
