//! Inkbound Core: collaborator abstractions.
//!
//! This crate defines the seams between the narrative interpreter and the
//! outside world: time, book retrieval, asset preloading and the event
//! envelope. It contains no infrastructure code.

pub mod assets;
pub mod clock;
pub mod error;
pub mod event;
pub mod source;
