use crate::{
    CoreResult, RecorderError,
    platform::{MediaLocation, PlaybackDevice, PlayerHandle, StorageProvider},
};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};

/// Opens stored recordings for playback.
///
/// Holds no per-clip state; every call hands out its own [`PlaybackHandle`].
pub struct Playback<D, S> {
    device: D,
    storage: S,
}

impl<D, S> Playback<D, S>
where
    D: PlaybackDevice,
    S: StorageProvider,
{
    /// Playback through `device`, resolving locations against `storage`.
    pub fn new(device: D, storage: S) -> Self {
        Self { device, storage }
    }

    /// Prepare `location` for playback without starting output.
    ///
    /// # Errors
    ///
    /// [`RecorderError::PlaybackNotFound`] when the location is empty or
    /// missing, [`RecorderError::PlaybackSetupFailed`] when the device
    /// cannot be opened.
    #[track_caller]
    #[instrument(skip_all, fields(location = %location))]
    pub fn open(&self, location: &MediaLocation) -> CoreResult<PlaybackHandle<D::Player>> {
        if location.is_empty() || !self.storage.exists(location) {
            return Err(RecorderError::PlaybackNotFound {
                requested: location.clone(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let player = self.device.open(location)?;
        debug!("Player prepared");

        Ok(PlaybackHandle {
            player: Some(player),
            location: location.clone(),
        })
    }

    /// Open `location` and start playing it.
    #[track_caller]
    #[instrument(skip_all, fields(location = %location))]
    pub fn play(&self, location: &MediaLocation) -> CoreResult<PlaybackHandle<D::Player>> {
        let mut handle = self.open(location)?;
        handle.play()?;
        Ok(handle)
    }
}

/// Scoped ownership of a player.
///
/// The player is released when the handle is dropped, so tearing down the
/// view that owns it frees the device on every exit path.
pub struct PlaybackHandle<P: PlayerHandle> {
    player: Option<P>,
    location: MediaLocation,
}

impl<P: PlayerHandle> PlaybackHandle<P> {
    /// Start output unless it is already running.
    #[instrument(skip(self), fields(location = %self.location))]
    pub fn play(&mut self) -> CoreResult<()> {
        let Some(player) = self.player.as_mut() else {
            return Ok(());
        };

        if player.is_playing() {
            debug!("Already playing");
            return Ok(());
        }

        player.start()?;
        info!("Playback started");
        Ok(())
    }

    /// Whether output is running.
    pub fn is_playing(&self) -> bool {
        self.player.as_ref().is_some_and(PlayerHandle::is_playing)
    }

    /// The clip this handle plays.
    pub fn location(&self) -> &MediaLocation {
        &self.location
    }

    /// Release the player now instead of at drop.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut player) = self.player.take() {
            player.release();
            debug!(location = %self.location, "Player released");
        }
    }
}

impl<P: PlayerHandle> Drop for PlaybackHandle<P> {
    fn drop(&mut self) {
        self.release();
    }
}
