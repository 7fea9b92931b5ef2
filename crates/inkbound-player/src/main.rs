//! Inkbound terminal player entry point.

use std::error::Error;

use inkbound_player::config::PlayerConfig;
use inkbound_player::session::play;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber. Stdout is the story, logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Inkbound player");

    // Read configuration from environment.
    let config = PlayerConfig::from_env()?;
    tracing::info!(
        content_root = %config.content_root.display(),
        start_book = %config.start_book,
        "configuration loaded"
    );

    play(
        &config,
        BufReader::new(tokio::io::stdin()),
        &mut std::io::stdout(),
    )
    .await?;

    tracing::info!("Inkbound player stopped");
    Ok(())
}
