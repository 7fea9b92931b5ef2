//! Inkbound: narrative interpreter.
//!
//! Responsible for the book content model, the narrative cursor, mode
//! derivation, dialogue advancement, choice resolution and the timed-choice
//! countdown.

pub mod application;
pub mod domain;
