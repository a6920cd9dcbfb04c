use crate::{
    AppCommand, AppError, AppResult, ConsolePermissions, Notifier, app_command::HELP,
    config::Config,
};

use clipdeck_core::{
    Capability, CpalCaptureDevice, CpalPlaybackDevice, CpalPlayer, FsStorage, PermissionResult,
    Playback, PlaybackHandle, Recording, RecordingSession, RecordingStore, StartOutcome,
    StopOutcome,
};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{error, info, instrument, warn};

pub(crate) type Session = RecordingSession<ConsolePermissions, FsStorage, CpalCaptureDevice>;
pub(crate) type ClipPlayback = Playback<CpalPlaybackDevice, FsStorage>;

/// Main application state.
///
/// Every command is handled to completion on the loop before the next one
/// is read, so the session, store and player never see concurrent access.
pub struct App {
    pub(crate) session: Session,
    pub(crate) store: RecordingStore,
    pub(crate) playback: ClipPlayback,
    pub(crate) notifier: Notifier,
    pub(crate) config: Config,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    /// Playback view currently on screen. Dropping it releases the player.
    pub(crate) player: Option<PlaybackHandle<CpalPlayer>>,
    /// Capabilities awaiting a yes/no from the user.
    pub(crate) pending_prompt: Option<Vec<Capability>>,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Clipdeck starting");
        println!("{HELP}");

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let list_view = Self::spawn_list_view(self.store.subscribe(), shutdown_rx);

        while let Some(cmd) = self.command_rx.recv().await {
            if cmd == AppCommand::Shutdown {
                info!("Shutdown requested");
                break;
            }
            self.dispatch(cmd);
        }

        self.shutdown();

        let _ = shutdown_tx.send(true);
        if let Err(e) = list_view.await {
            error!(error = ?e, "Recordings view task panicked");
        }

        info!("Clipdeck shut down successfully");

        Ok(())
    }

    fn dispatch(&mut self, cmd: AppCommand) {
        let result = match cmd {
            AppCommand::StartRecording => self.start_recording(),
            AppCommand::StopRecording => self.stop_recording(),
            AppCommand::ListRecordings => {
                print_recordings(&self.store.list());
                Ok(())
            }
            AppCommand::Play { index } => self.play(index),
            AppCommand::ClosePlayback => {
                self.close_playback();
                Ok(())
            }
            AppCommand::PermissionPrompt { capabilities } => {
                self.prompt_for(capabilities);
                Ok(())
            }
            AppCommand::ConsentAnswer { granted } => self.answer_prompt(granted),
            AppCommand::Help => {
                println!("{HELP}");
                Ok(())
            }
            AppCommand::Unknown(input) => {
                self.notifier
                    .notify(&format!("Unknown command: {input:?}. Type `help`."));
                Ok(())
            }
            AppCommand::Shutdown => Ok(()),
        };

        if let Err(e) = result {
            self.surface(e);
        }
    }

    fn surface(&self, error: AppError) {
        match error {
            AppError::Recorder { source, .. } => self.notifier.report(&source),
            other => {
                error!(error = ?other, "Command failed");
                self.notifier.notify(&other.to_string());
            }
        }
    }

    #[instrument(skip(self))]
    fn start_recording(&mut self) -> AppResult<()> {
        match self.session.start()? {
            StartOutcome::Started(location) => {
                info!(location = %location, "Recording into location");
                self.notifier.notify("Recording started");
            }
            StartOutcome::AlreadyRecording => self.notifier.notify("Already recording"),
            StartOutcome::PermissionRequested => {}
        }
        Ok(())
    }

    #[instrument(skip(self))]
    fn stop_recording(&mut self) -> AppResult<()> {
        match self.session.stop(&self.store)? {
            StopOutcome::Saved(recording) => self
                .notifier
                .notify(&format!("Recording stopped and saved: {}", recording.title)),
            StopOutcome::NotRecording => self.notifier.notify("Not recording"),
        }
        Ok(())
    }

    #[instrument(skip(self))]
    fn play(&mut self, index: Option<usize>) -> AppResult<()> {
        let Some(index) = index else {
            return match self.player.as_mut() {
                Some(handle) => Ok(handle.play()?),
                None => {
                    self.notifier.notify("No recording open. Use `play <n>`.");
                    Ok(())
                }
            };
        };

        let Some(recording) = index.checked_sub(1).and_then(|i| self.store.get(i)) else {
            self.notifier.notify(&format!("No recording #{index}"));
            return Ok(());
        };

        // Navigating to another clip tears down the current view first.
        self.close_playback();

        let handle = self.playback.play(&recording.file_path)?;
        self.player = Some(handle);
        self.notifier.notify(&format!("Playing {}", recording.title));

        Ok(())
    }

    fn close_playback(&mut self) {
        if let Some(handle) = self.player.take() {
            handle.close();
            info!("Playback view closed");
        }
    }

    fn prompt_for(&mut self, capabilities: Vec<Capability>) {
        let names: Vec<String> = capabilities.iter().map(ToString::to_string).collect();
        println!("Allow access to {}? [yes/no]", names.join(" and "));
        self.pending_prompt = Some(capabilities);
    }

    #[instrument(skip(self))]
    fn answer_prompt(&mut self, granted: bool) -> AppResult<()> {
        let Some(capabilities) = self.pending_prompt.take() else {
            self.notifier.notify("No permission request pending");
            return Ok(());
        };

        let result = PermissionResult::uniform(&capabilities, granted);
        self.session.permission_result(&result)?;

        self.config.behavior.microphone_consent = true;
        if let Err(e) = self.config.save() {
            warn!(error = ?e, "Failed to persist microphone consent");
        }

        self.notifier
            .notify("Permissions granted. Type `start` to record.");

        Ok(())
    }

    fn shutdown(&mut self) {
        self.close_playback();

        // An active capture is saved rather than lost.
        match self.session.stop(&self.store) {
            Ok(StopOutcome::Saved(recording)) => {
                info!(title = %recording.title, "Saved recording on shutdown");
            }
            Ok(StopOutcome::NotRecording) => {}
            Err(e) => self.notifier.report(&e),
        }
    }

    /// Reprint the list whenever the store publishes a new one.
    fn spawn_list_view(
        mut recordings: watch::Receiver<Vec<Recording>>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    changed = recordings.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let current = recordings.borrow_and_update().clone();
                        print_recordings(&current);
                    }
                }
            }
        })
    }
}

pub(crate) fn format_recordings(recordings: &[Recording]) -> String {
    if recordings.is_empty() {
        return "No saved recordings".to_string();
    }

    let mut out = String::from("Saved recordings:");
    for (i, recording) in recordings.iter().enumerate() {
        out.push_str(&format!("\n  {}. {}", i + 1, recording.title));
    }
    out
}

fn print_recordings(recordings: &[Recording]) {
    println!("{}", format_recordings(recordings));
}
