//! Application layer: the interpreter, book decoding, read models and the
//! session driver that feeds inputs and ticks into the interpreter.

pub mod driver;
pub mod interpreter;
pub mod loader;
pub mod query_handlers;
