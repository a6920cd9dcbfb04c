//! Clipdeck: record audio clips, list them, play them back.

mod app;
mod app_command;
mod config;
mod console_input;
mod console_permissions;
mod error;
mod notifier;
#[cfg(test)]
mod tests;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    console_input::ConsoleInput,
    console_permissions::ConsolePermissions,
    error::{AppError, Result as AppResult},
    notifier::Notifier,
};

use crate::config::Config;

use clipdeck_core::{
    CpalCaptureDevice, CpalPlaybackDevice, FsStorage, Playback, RecordingSession, RecordingStore,
};
use tokio::sync::mpsc;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "clipdeck=info,clipdeck_core=info";

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.ensure_recordings_dir() {
        error!("Recordings directory unavailable: {:?}", e);
        std::process::exit(1);
    }

    let (command_tx, command_rx) = mpsc::channel(32);

    let storage = FsStorage::new(&config.storage.recordings_dir);
    let notifier = Notifier::new(config.behavior.desktop_notifications);
    let permissions = ConsolePermissions::new(
        config.behavior.microphone_consent,
        command_tx.clone(),
        notifier.clone(),
    );
    let session = RecordingSession::new(permissions, storage.clone(), CpalCaptureDevice::new())
        .with_directory_hint(config.storage.directory_hint.clone());
    let playback = Playback::new(CpalPlaybackDevice::new(), storage);

    // The reader thread blocks on stdin and is not joined; process exit ends it.
    let _input_thread = ConsoleInput::spawn(command_tx);

    // Single-threaded runtime: all recorder state lives on this thread.
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    let app = App {
        session,
        store: RecordingStore::new(),
        playback,
        notifier,
        config,
        command_rx,
        player: None,
        pending_prompt: None,
    };

    if let Err(e) = rt.block_on(app.run()) {
        error!(error = ?e, "App error");
        std::process::exit(1);
    }
}
