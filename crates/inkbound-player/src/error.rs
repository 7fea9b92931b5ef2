//! Inkbound player error types.

use inkbound_core::error::LoadError;
use thiserror::Error;

/// Startup and runtime errors for the player.
#[derive(Debug, Error)]
pub enum AppError {
    /// A configuration variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The start book could not be loaded.
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// Terminal I/O failed.
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    /// The session task stopped abnormally.
    #[error("session driver failed: {0}")]
    Driver(#[from] tokio::task::JoinError),
}
