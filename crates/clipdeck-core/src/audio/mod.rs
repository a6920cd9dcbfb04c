mod capture;
mod playback;
pub(crate) mod wav;

#[cfg(test)]
pub(crate) use playback::ClipBuffer;

pub use {
    capture::{CpalCapture, CpalCaptureDevice},
    playback::{CpalPlaybackDevice, CpalPlayer},
};
