//! Terminal session: wires the interpreter, driver and text I/O together.

use std::io::Write;
use std::sync::Arc;

use inkbound_book_store::fs_book_source::FsBookSource;
use inkbound_core::clock::SystemClock;
use inkbound_narrative::application::driver::{SessionDriver, SessionUpdate};
use inkbound_narrative::application::interpreter::Interpreter;
use inkbound_narrative::application::query_handlers::ScreenView;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::assets::FsAssetPreloader;
use crate::config::PlayerConfig;
use crate::error::AppError;
use crate::terminal::{self, Command};

/// Plays the configured start book, reading commands from `input` and
/// drawing to `output`, until `q` or end of input.
///
/// # Errors
///
/// Returns `AppError::Load` if the start book cannot be loaded,
/// `AppError::Io` if reading or writing the terminal fails, and
/// `AppError::Driver` if the session task panics.
pub async fn play<R, W>(config: &PlayerConfig, input: R, output: &mut W) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut interpreter = Interpreter::new(
        Arc::new(FsBookSource::new(config.content_root.clone())),
        Arc::new(FsAssetPreloader::new(config.content_root.clone())),
        Arc::new(SystemClock),
    );
    interpreter.load_book(&config.start_book).await?;

    let (input_tx, input_rx) = mpsc::channel(16);
    let (update_tx, mut update_rx) = mpsc::unbounded_channel();
    let driver = tokio::spawn(
        SessionDriver::new(interpreter, input_rx, update_tx)
            .with_tick_period(config.tick_period)
            .run(),
    );

    let mut lines = input.lines();
    let mut current = None;
    loop {
        tokio::select! {
            update = update_rx.recv() => {
                let Some(update) = update else {
                    break;
                };
                show(update, &mut current, output)?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match terminal::parse_command(&line, current.as_ref()) {
                    Command::Input(input) => {
                        if input_tx.send(input).await.is_err() {
                            break;
                        }
                    }
                    Command::Quit => break,
                    Command::Unknown => writeln!(output, "{}", terminal::HELP)?,
                }
            }
        }
    }

    drop(input_tx);
    let interpreter = driver.await?;
    while let Ok(update) = update_rx.try_recv() {
        show(update, &mut current, output)?;
    }
    output.flush()?;
    info!(session_id = %interpreter.session_id(), "player finished");

    Ok(())
}

fn show<W: Write>(
    update: SessionUpdate,
    current: &mut Option<ScreenView>,
    output: &mut W,
) -> Result<(), AppError> {
    match update {
        SessionUpdate::View(view) => {
            if current.as_ref() != Some(&view) {
                write!(output, "{}", terminal::render(&view))?;
                output.flush()?;
            }
            *current = Some(view);
        }
        SessionUpdate::LoadFailed(err) => writeln!(output, "! {err}")?,
        SessionUpdate::Events(events) => {
            for event in &events {
                debug!(event_type = %event.metadata.event_type, "narrative event");
            }
        }
    }
    Ok(())
}
