use crate::{
    CoreResult, RecorderError,
    audio::wav::{self, WavSink},
    platform::{CaptureDevice, CaptureHandle, MediaLocation},
};

use std::{
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use cpal::{
    Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{error, info, instrument};

/// Grace period for an in-flight callback to observe the shutdown flag.
const CALLBACK_DRAIN: Duration = Duration::from_millis(5);

/// Captures from the default input device into WAV files.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpalCaptureDevice;

impl CpalCaptureDevice {
    /// Capture device using the default cpal host.
    pub fn new() -> Self {
        Self
    }
}

impl CaptureDevice for CpalCaptureDevice {
    type Handle = CpalCapture;

    #[track_caller]
    #[instrument(skip_all, fields(location = %location))]
    fn open(&mut self, location: &MediaLocation) -> CoreResult<CpalCapture> {
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or(RecorderError::CaptureSetupFailed {
                reason: "No microphone found".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let config = device
            .default_input_config()
            .map_err(|e| RecorderError::CaptureSetupFailed {
                reason: format!("Failed to get config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let sink = WavSink::create(
            location.as_path(),
            wav::float_spec(config.channels(), config.sample_rate()),
        )?;

        info!(
            device_id = ?device.id(),
            sample_rate = config.sample_rate(),
            channels = config.channels(),
            "Capture device opened"
        );

        let config: StreamConfig = config.into();
        let shutdown = Arc::new(AtomicBool::new(false));

        let callback_sink = sink.clone();
        let callback_shutdown = Arc::clone(&shutdown);

        let stream = device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    // Once finalize() raises the flag nothing more reaches the file,
                    // even if the backend fires one last callback.
                    if callback_shutdown.load(Ordering::Acquire) {
                        return;
                    }
                    callback_sink.write(data);
                },
                |err| {
                    error!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| RecorderError::CaptureSetupFailed {
                reason: format!("Failed to build stream: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        stream.play().map_err(|e| RecorderError::CaptureSetupFailed {
            reason: format!("Failed to start stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!("Audio capture started");

        Ok(CpalCapture {
            stream: Some(stream),
            sink,
            shutdown,
        })
    }
}

/// A running microphone capture writing to one WAV file.
pub struct CpalCapture {
    stream: Option<Stream>,
    sink: WavSink,
    shutdown: Arc<AtomicBool>,
}

impl CpalCapture {
    fn stop_stream(&mut self) {
        self.shutdown.store(true, Ordering::Release);

        if let Some(stream) = self.stream.take() {
            drop(stream);
            std::thread::sleep(CALLBACK_DRAIN);
            info!("Audio capture stopped");
        }
    }
}

impl CaptureHandle for CpalCapture {
    #[track_caller]
    #[instrument(skip(self))]
    fn finalize(mut self) -> CoreResult<()> {
        self.stop_stream();
        self.sink.finalize()
    }
}

impl Drop for CpalCapture {
    fn drop(&mut self) {
        self.stop_stream();
    }
}
