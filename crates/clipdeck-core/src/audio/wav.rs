//! WAV encoding and decoding through hound.

use crate::{CoreResult, RecorderError};

use std::{
    fs::File,
    io::BufWriter,
    panic::Location,
    path::Path,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use error_location::ErrorLocation;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::{debug, error};

type FileWriter = WavWriter<BufWriter<File>>;

/// 32-bit float PCM at the device's native layout.
pub(crate) fn float_spec(channels: u16, sample_rate: u32) -> WavSpec {
    WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    }
}

/// Shared WAV writer fed from the audio callback.
///
/// Cloning shares the same writer. A failed sample write is remembered and
/// reported by [`WavSink::finalize`], since the callback has nowhere to
/// return it.
#[derive(Clone)]
pub(crate) struct WavSink {
    writer: Arc<Mutex<Option<FileWriter>>>,
    write_failed: Arc<AtomicBool>,
}

impl WavSink {
    #[track_caller]
    pub(crate) fn create(path: &Path, spec: WavSpec) -> CoreResult<Self> {
        let writer = WavWriter::create(path, spec).map_err(|e| RecorderError::CaptureSetupFailed {
            reason: format!("Failed to create WAV writer: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self {
            writer: Arc::new(Mutex::new(Some(writer))),
            write_failed: Arc::new(AtomicBool::new(false)),
        })
    }

    pub(crate) fn write(&self, samples: &[f32]) {
        if self.write_failed.load(Ordering::Acquire) {
            return;
        }

        // A poisoned lock still holds a usable writer.
        let mut guard = self.writer.lock().unwrap_or_else(|e| {
            error!("WAV writer lock poisoned, recovering: {}", e);
            e.into_inner()
        });

        let Some(writer) = guard.as_mut() else {
            return;
        };

        for &sample in samples {
            if let Err(e) = writer.write_sample(sample) {
                error!("Failed to write sample: {}", e);
                self.write_failed.store(true, Ordering::Release);
                return;
            }
        }
    }

    /// Flush and write the final header. Only the first call does any work.
    #[track_caller]
    pub(crate) fn finalize(&self) -> CoreResult<()> {
        let writer = self
            .writer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .ok_or_else(|| RecorderError::CaptureFinalizeFailed {
                reason: "WAV writer already finalized".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let frames = writer.duration();

        writer
            .finalize()
            .map_err(|e| RecorderError::CaptureFinalizeFailed {
                reason: format!("Failed to finalize WAV file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if self.write_failed.load(Ordering::Acquire) {
            return Err(RecorderError::CaptureFinalizeFailed {
                reason: "Samples were lost while recording".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        debug!(frames, "WAV file finalized");

        Ok(())
    }
}

/// Interleaved samples of a whole clip, normalized to `[-1.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DecodedClip {
    pub(crate) samples: Vec<f32>,
    pub(crate) channels: u16,
    pub(crate) sample_rate: u32,
}

#[track_caller]
pub(crate) fn decode(path: &Path) -> CoreResult<DecodedClip> {
    let setup_failed = |reason: String| RecorderError::PlaybackSetupFailed {
        reason,
        location: ErrorLocation::from(Location::caller()),
    };

    let mut reader = WavReader::open(path)
        .map_err(|e| setup_failed(format!("Failed to open {}: {}", path.display(), e)))?;
    let spec = reader.spec();

    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| setup_failed(format!("Failed to decode samples: {}", e)))?,
        SampleFormat::Int => {
            let scale = 1.0 / (1_i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| setup_failed(format!("Failed to decode samples: {}", e)))?
        }
    };

    debug!(
        sample_count = samples.len(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        "WAV file decoded"
    );

    Ok(DecodedClip {
        samples,
        channels: spec.channels,
        sample_rate: spec.sample_rate,
    })
}
