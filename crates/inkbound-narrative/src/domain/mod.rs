//! Domain layer: passive content, the narrative cursor and the pure rules
//! that move it.

pub mod book;
pub mod commands;
pub mod countdown;
pub mod events;
pub mod mode;
pub mod progression;
pub mod state;
pub mod validate;
