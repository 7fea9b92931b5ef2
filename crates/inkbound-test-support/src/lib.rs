//! Shared test mocks and utilities for the Inkbound narrative runtime.

mod assets;
mod clock;
mod source;

pub use assets::RecordingPreloader;
pub use clock::{FixedClock, fixed_now};
pub use source::{FailingBookSource, StaticBookSource};
