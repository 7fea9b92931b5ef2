//! Test preloader: records every asset reference it is asked to warm up.

use std::sync::Mutex;

use inkbound_core::assets::AssetPreloader;

/// An asset preloader that only records requested references.
#[derive(Debug, Default)]
pub struct RecordingPreloader {
    requested: Mutex<Vec<String>>,
}

impl RecordingPreloader {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the requested references.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl AssetPreloader for RecordingPreloader {
    fn preload(&self, reference: &str) {
        self.requested.lock().unwrap().push(reference.to_owned());
    }
}
