//! Inkbound terminal player.
//!
//! Hosts one narrative session in a terminal: loads the configured start
//! book, draws each view as text and turns typed lines into session inputs.

pub mod assets;
pub mod config;
pub mod error;
pub mod session;
pub mod terminal;
