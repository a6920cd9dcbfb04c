use crate::platform::{Capability, MediaLocation};

use error_location::ErrorLocation;
use thiserror::Error;

/// Recorder errors with source location tracking.
///
/// Every variant is recoverable: callers surface it to the user and carry on.
#[derive(Error, Debug)]
pub enum RecorderError {
    /// A required capability was refused by the permission provider.
    #[error("Permission denied: {denied:?} {location}")]
    PermissionDenied {
        /// Capabilities the user refused.
        denied: Vec<Capability>,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The storage provider could not create an output location.
    #[error("Storage unavailable: {reason} {location}")]
    StorageUnavailable {
        /// Description of the storage failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The capture device could not be opened or started.
    #[error("Capture setup failed: {reason} {location}")]
    CaptureSetupFailed {
        /// Description of the capture failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The capture handle could not be flushed or released.
    #[error("Capture finalize failed: {reason} {location}")]
    CaptureFinalizeFailed {
        /// Description of the finalize failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The location to play is empty or does not exist.
    #[error("Recording not found: '{requested}' {location}")]
    PlaybackNotFound {
        /// The location that was requested.
        requested: MediaLocation,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The playback device could not be opened or started.
    #[error("Playback setup failed: {reason} {location}")]
    PlaybackSetupFailed {
        /// Description of the playback failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl RecorderError {
    /// Short text suitable for a transient user notification.
    pub fn user_message(&self) -> &'static str {
        match self {
            RecorderError::PermissionDenied { .. } => "Permissions are required to record audio",
            RecorderError::StorageUnavailable { .. } => "Error accessing media store",
            RecorderError::CaptureSetupFailed { .. } => "Error starting recording",
            RecorderError::CaptureFinalizeFailed { .. } => "Error stopping recording",
            RecorderError::PlaybackNotFound { .. } => "Invalid recording path or file not found",
            RecorderError::PlaybackSetupFailed { .. } => "Error preparing playback",
        }
    }
}

/// Result type alias using [`RecorderError`].
pub type Result<T> = std::result::Result<T, RecorderError>;
