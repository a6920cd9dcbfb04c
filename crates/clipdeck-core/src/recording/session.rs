//! Recording lifecycle: a two-state machine over one capture handle.
//!
//! The session owns the only capture handle in the process, so two
//! concurrent recordings cannot be expressed. All transitions are driven
//! from a single event context; no locking is involved.

use crate::{
    CoreResult, RecorderError,
    platform::{
        Capability, CaptureDevice, CaptureHandle, DEFAULT_DIRECTORY_HINT, MediaLocation,
        OutputRequest, PermissionProvider, PermissionResult, StorageProvider,
    },
    recording::{Recording, RecordingStore},
};

use std::{panic::Location, time::Instant};

use chrono::Utc;
use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Observable state of a [`RecordingSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Nothing is being captured.
    Idle,
    /// A capture is running.
    Recording,
}

/// What a call to [`RecordingSession::start`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// Capture began; audio goes to the given location.
    Started(MediaLocation),
    /// A capture was already running; nothing changed.
    AlreadyRecording,
    /// Permission was missing and has been requested. Start again once granted.
    PermissionRequested,
}

/// What a call to [`RecordingSession::stop`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    /// Capture finished and the recording was added to the store.
    Saved(Recording),
    /// No capture was running; nothing changed.
    NotRecording,
}

enum SessionState<H> {
    Idle,
    Recording {
        location: MediaLocation,
        handle: H,
        started_at: Instant,
        session_id: Uuid,
    },
}

/// Drives capture start/stop and files finished clips into a [`RecordingStore`].
pub struct RecordingSession<P, S, C>
where
    C: CaptureDevice,
{
    permissions: P,
    storage: S,
    capture: C,
    directory_hint: String,
    state: SessionState<C::Handle>,
}

impl<P, S, C> RecordingSession<P, S, C>
where
    P: PermissionProvider,
    S: StorageProvider,
    C: CaptureDevice,
{
    /// Idle session over the given collaborators.
    pub fn new(permissions: P, storage: S, capture: C) -> Self {
        Self {
            permissions,
            storage,
            capture,
            directory_hint: DEFAULT_DIRECTORY_HINT.to_string(),
            state: SessionState::Idle,
        }
    }

    /// File new clips under `hint` instead of the default directory.
    pub fn with_directory_hint(mut self, hint: impl Into<String>) -> Self {
        self.directory_hint = hint.into();
        self
    }

    /// Current state.
    pub fn status(&self) -> SessionStatus {
        match self.state {
            SessionState::Idle => SessionStatus::Idle,
            SessionState::Recording { .. } => SessionStatus::Recording,
        }
    }

    /// Location being written, only while recording.
    pub fn output_location(&self) -> Option<&MediaLocation> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Recording { location, .. } => Some(location),
        }
    }

    /// Log correlation id of the running capture.
    pub fn session_id(&self) -> Option<Uuid> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Recording { session_id, .. } => Some(*session_id),
        }
    }

    /// Begin recording into a fresh location.
    ///
    /// A no-op while already recording. Without microphone permission the
    /// permission is requested and the session stays idle; the caller has
    /// to start again after the grant.
    ///
    /// # Errors
    ///
    /// [`RecorderError::StorageUnavailable`] or
    /// [`RecorderError::CaptureSetupFailed`]; the session stays idle and
    /// any location created for the attempt is discarded.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn start(&mut self) -> CoreResult<StartOutcome> {
        if let SessionState::Recording { session_id, .. } = &self.state {
            debug!(session_id = %session_id, "Start ignored, already recording");
            return Ok(StartOutcome::AlreadyRecording);
        }

        if !self.permissions.check_granted(Capability::RecordAudio) {
            info!("Microphone permission missing, requesting");
            self.permissions.request(&Capability::RECORDING);
            return Ok(StartOutcome::PermissionRequested);
        }

        let request = OutputRequest::timestamped(Utc::now(), &self.directory_hint);
        let location = self.storage.create_output_location(&request)?;

        let handle = match self.capture.open(&location) {
            Ok(handle) => handle,
            Err(e) => {
                if let Err(discard_err) = self.storage.discard(&location) {
                    warn!(location = %location, error = ?discard_err, "Failed to discard unused location");
                }
                return Err(e);
            }
        };

        let session_id = Uuid::new_v4();
        info!(session_id = %session_id, location = %location, "Recording started");

        self.state = SessionState::Recording {
            location: location.clone(),
            handle,
            started_at: Instant::now(),
            session_id,
        };

        Ok(StartOutcome::Started(location))
    }

    /// Finish the running capture and add it to `store`.
    ///
    /// A no-op while idle. The session is idle afterwards whatever the
    /// outcome.
    ///
    /// # Errors
    ///
    /// [`RecorderError::CaptureFinalizeFailed`]; nothing is added to the store.
    #[track_caller]
    #[instrument(skip(self, store))]
    pub fn stop(&mut self, store: &RecordingStore) -> CoreResult<StopOutcome> {
        let SessionState::Recording {
            location,
            handle,
            started_at,
            session_id,
        } = std::mem::replace(&mut self.state, SessionState::Idle)
        else {
            debug!("Stop ignored, not recording");
            return Ok(StopOutcome::NotRecording);
        };

        let duration = started_at.elapsed();

        if let Err(e) = handle.finalize() {
            warn!(session_id = %session_id, error = ?e, "Capture finalize failed");
            return Err(match e {
                e @ RecorderError::CaptureFinalizeFailed { .. } => e,
                other => RecorderError::CaptureFinalizeFailed {
                    reason: other.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                },
            });
        }

        let recording = Recording::completed(location, Utc::now());
        store.add_recording(recording.clone());

        info!(
            session_id = %session_id,
            duration_ms = duration.as_millis(),
            title = %recording.title,
            "Recording stopped and saved"
        );

        Ok(StopOutcome::Saved(recording))
    }

    /// Deliver the answer to an earlier permission request.
    ///
    /// Never starts a capture by itself.
    ///
    /// # Errors
    ///
    /// [`RecorderError::PermissionDenied`] when any capability was refused.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn permission_result(&mut self, result: &PermissionResult) -> CoreResult<()> {
        self.permissions.record_result(result);

        let denied = result.denied();
        if denied.is_empty() {
            info!("Permissions granted");
            return Ok(());
        }

        Err(RecorderError::PermissionDenied {
            denied,
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
