//! Seams to the platform services the recorder drives.
//!
//! The core never talks to a microphone, speaker, or content store directly;
//! it goes through these traits so the desktop implementations in
//! [`crate::audio`] and [`crate::storage`] can be swapped for fakes.

mod location;
mod permission;
mod traits;

pub use {
    location::{DEFAULT_DIRECTORY_HINT, MediaLocation, OutputRequest, RECORDING_MIME_TYPE},
    permission::{Capability, GrantedPermissions, PermissionResult},
    traits::{
        CaptureDevice, CaptureHandle, PermissionProvider, PlaybackDevice, PlayerHandle,
        StorageProvider,
    },
};
