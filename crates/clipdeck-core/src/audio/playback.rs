use crate::{
    CoreResult, RecorderError,
    audio::wav,
    platform::{MediaLocation, PlaybackDevice, PlayerHandle},
};

use std::{
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use cpal::{
    BufferSize, Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument};

/// Decoded clip plus the read position shared with the output callback.
pub(crate) struct ClipBuffer {
    samples: Vec<f32>,
    cursor: AtomicUsize,
    playing: AtomicBool,
}

impl ClipBuffer {
    pub(crate) fn new(samples: Vec<f32>) -> Self {
        Self {
            samples,
            cursor: AtomicUsize::new(0),
            playing: AtomicBool::new(false),
        }
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    /// Resume output, rewinding first if the previous run reached the end.
    pub(crate) fn begin(&self) {
        if self.cursor.load(Ordering::Acquire) >= self.samples.len() {
            self.cursor.store(0, Ordering::Release);
        }
        self.playing.store(true, Ordering::Release);
    }

    pub(crate) fn halt(&self) {
        self.playing.store(false, Ordering::Release);
    }

    /// Fill `out` with the next interleaved samples, silence past the end.
    pub(crate) fn fill(&self, out: &mut [f32]) {
        if !self.is_playing() {
            out.fill(0.0);
            return;
        }

        let start = self.cursor.load(Ordering::Acquire).min(self.samples.len());
        let count = (self.samples.len() - start).min(out.len());

        out[..count].copy_from_slice(&self.samples[start..start + count]);
        out[count..].fill(0.0);

        let end = start + count;
        self.cursor.store(end, Ordering::Release);

        if end >= self.samples.len() {
            self.playing.store(false, Ordering::Release);
        }
    }
}

/// Plays WAV files through the default output device.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpalPlaybackDevice;

impl CpalPlaybackDevice {
    /// Playback device using the default cpal host.
    pub fn new() -> Self {
        Self
    }
}

impl PlaybackDevice for CpalPlaybackDevice {
    type Player = CpalPlayer;

    #[track_caller]
    #[instrument(skip_all, fields(location = %location))]
    fn open(&self, location: &MediaLocation) -> CoreResult<CpalPlayer> {
        let clip = wav::decode(location.as_path())?;

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(RecorderError::PlaybackSetupFailed {
                reason: "No output device found".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        // Stream at the clip's own layout so no conversion is needed.
        let config = StreamConfig {
            channels: clip.channels,
            sample_rate: clip.sample_rate,
            buffer_size: BufferSize::Default,
        };

        let buffer = Arc::new(ClipBuffer::new(clip.samples));
        let callback_buffer = Arc::clone(&buffer);

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    callback_buffer.fill(data);
                },
                |err| {
                    error!("Audio output stream error: {}", err);
                },
                None,
            )
            .map_err(|e| RecorderError::PlaybackSetupFailed {
                reason: format!("Failed to build output stream: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(
            device_id = ?device.id(),
            sample_rate = clip.sample_rate,
            channels = clip.channels,
            "Player prepared"
        );

        Ok(CpalPlayer {
            stream: Some(stream),
            buffer,
        })
    }
}

/// Output stream bound to one decoded clip.
pub struct CpalPlayer {
    stream: Option<Stream>,
    buffer: Arc<ClipBuffer>,
}

impl PlayerHandle for CpalPlayer {
    fn is_playing(&self) -> bool {
        self.stream.is_some() && self.buffer.is_playing()
    }

    #[track_caller]
    fn start(&mut self) -> CoreResult<()> {
        let stream = self
            .stream
            .as_ref()
            .ok_or(RecorderError::PlaybackSetupFailed {
                reason: "Player already released".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.buffer.begin();

        stream.play().map_err(|e| {
            self.buffer.halt();
            RecorderError::PlaybackSetupFailed {
                reason: format!("Failed to start output stream: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    fn release(&mut self) {
        self.buffer.halt();
        if let Some(stream) = self.stream.take() {
            drop(stream);
            debug!("Output stream released");
        }
    }
}

impl Drop for CpalPlayer {
    fn drop(&mut self) {
        self.release();
    }
}
