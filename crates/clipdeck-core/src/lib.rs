//! Clipdeck Core Library
//!
//! Records audio clips from the microphone, keeps an append-only list of
//! finished recordings, and plays them back. Platform services sit behind
//! the traits in [`platform`]; cpal and filesystem implementations ship
//! with the crate.
//!
//! # Example
//!
//! ```no_run
//! use clipdeck_core::{
//!     CoreResult, CpalCaptureDevice, CpalPlaybackDevice, FsStorage, GrantedPermissions,
//!     Playback, RecordingSession, RecordingStore,
//! };
//!
//! use std::{thread::sleep, time::Duration};
//!
//! fn main() -> CoreResult<()> {
//!     let storage = FsStorage::new("/tmp/clipdeck");
//!     let store = RecordingStore::new();
//!     let mut session =
//!         RecordingSession::new(GrantedPermissions, storage.clone(), CpalCaptureDevice::new());
//!
//!     session.start()?;
//!     sleep(Duration::from_secs(3));
//!     session.stop(&store)?;
//!
//!     let playback = Playback::new(CpalPlaybackDevice::new(), storage);
//!     if let Some(recording) = store.list().last() {
//!         let _handle = playback.play(&recording.file_path)?;
//!         sleep(Duration::from_secs(3));
//!     }
//!     Ok(())
//! }
//! ```

mod audio;
mod error;
pub mod platform;
mod playback;
mod recording;
mod storage;

pub use {
    audio::{CpalCapture, CpalCaptureDevice, CpalPlaybackDevice, CpalPlayer},
    error::{RecorderError, Result as CoreResult},
    platform::{
        Capability, CaptureDevice, CaptureHandle, GrantedPermissions, MediaLocation,
        OutputRequest, PermissionProvider, PermissionResult, PlaybackDevice, PlayerHandle,
        StorageProvider,
    },
    playback::{Playback, PlaybackHandle},
    recording::{
        Recording, RecordingSession, RecordingStore, SessionStatus, StartOutcome, StopOutcome,
    },
    storage::FsStorage,
};

#[cfg(test)]
mod tests;
