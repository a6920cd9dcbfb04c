use crate::{
    CoreResult,
    platform::{Capability, MediaLocation, OutputRequest, PermissionResult},
};

/// Grants access to protected capabilities.
pub trait PermissionProvider {
    /// Whether `capability` is currently granted.
    fn check_granted(&self, capability: Capability) -> bool;

    /// Ask for `capabilities` without blocking.
    ///
    /// The answer arrives later through
    /// [`crate::RecordingSession::permission_result`].
    fn request(&mut self, capabilities: &[Capability]);

    /// Remember the verdicts of a completed request.
    fn record_result(&mut self, _result: &PermissionResult) {}
}

/// Hands out writable locations for new recordings.
pub trait StorageProvider {
    /// Create a fresh location for a new clip.
    ///
    /// Fails with [`crate::RecorderError::StorageUnavailable`].
    fn create_output_location(&mut self, request: &OutputRequest) -> CoreResult<MediaLocation>;

    /// Whether `location` refers to stored audio.
    fn exists(&self, location: &MediaLocation) -> bool;

    /// Drop a location that never received a complete clip.
    fn discard(&mut self, location: &MediaLocation) -> CoreResult<()>;
}

/// Opens capture handles bound to an output location.
pub trait CaptureDevice {
    /// Active capture returned by [`CaptureDevice::open`].
    type Handle: CaptureHandle;

    /// Open the microphone and begin capturing into `location`.
    ///
    /// Fails with [`crate::RecorderError::CaptureSetupFailed`].
    fn open(&mut self, location: &MediaLocation) -> CoreResult<Self::Handle>;
}

/// A running capture.
pub trait CaptureHandle {
    /// Stop capturing, flush everything to the location, release the device.
    ///
    /// Fails with [`crate::RecorderError::CaptureFinalizeFailed`].
    fn finalize(self) -> CoreResult<()>;
}

/// Opens players bound to stored audio.
pub trait PlaybackDevice {
    /// Player returned by [`PlaybackDevice::open`].
    type Player: PlayerHandle;

    /// Prepare playback of `location` without starting it.
    ///
    /// Fails with [`crate::RecorderError::PlaybackSetupFailed`].
    fn open(&self, location: &MediaLocation) -> CoreResult<Self::Player>;
}

/// A prepared player.
pub trait PlayerHandle {
    /// Whether audio is currently being output.
    fn is_playing(&self) -> bool;

    /// Begin output.
    fn start(&mut self) -> CoreResult<()>;

    /// Free the underlying device. Must tolerate repeated calls.
    fn release(&mut self);
}
