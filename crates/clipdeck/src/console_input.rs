//! Reads commands from stdin on a dedicated thread.

use crate::{AppCommand, AppError, AppResult};

use std::{
    io::{BufRead, BufReader, Read},
    panic::Location,
    thread::JoinHandle,
};

use error_location::ErrorLocation;
use tokio::sync::mpsc;
use tracing::{debug, error};

/// Forwards parsed console lines to the app loop.
pub struct ConsoleInput;

impl ConsoleInput {
    /// Start reading stdin on a background thread.
    ///
    /// The thread ends on EOF (after sending `Shutdown`) or once the
    /// receiving side is gone.
    pub fn spawn(command_tx: mpsc::Sender<AppCommand>) -> JoinHandle<()> {
        std::thread::spawn(move || {
            if let Err(e) = Self::forward(std::io::stdin(), &command_tx) {
                error!(error = ?e, "Console input stopped");
            }
        })
    }

    /// Forward every command in `input`, then `Shutdown` at EOF.
    #[track_caller]
    pub(crate) fn forward<R: Read>(input: R, command_tx: &mpsc::Sender<AppCommand>) -> AppResult<()> {
        for line in BufReader::new(input).lines() {
            let line = line?;
            let Some(command) = AppCommand::parse(&line) else {
                continue;
            };
            debug!(command = ?command, "Console command");
            Self::send(command_tx, command)?;
        }

        Self::send(command_tx, AppCommand::Shutdown)
    }

    #[track_caller]
    fn send(command_tx: &mpsc::Sender<AppCommand>, command: AppCommand) -> AppResult<()> {
        command_tx
            .blocking_send(command)
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to forward console command: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
