//! Asset preloading abstraction.

/// Fire-and-forget warm-up of an image reference.
///
/// The interpreter passes references through untouched and never waits on
/// the result.
pub trait AssetPreloader: Send + Sync {
    /// Begin loading the asset named by `reference`.
    fn preload(&self, reference: &str);
}

