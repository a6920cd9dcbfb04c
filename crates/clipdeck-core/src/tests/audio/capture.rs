use crate::{
    CaptureDevice, CaptureHandle, CpalCaptureDevice, FsStorage, OutputRequest, StorageProvider,
    audio::wav,
};

use std::{thread::sleep, time::Duration};

use chrono::Utc;
use uuid::Uuid;

/// WHAT: Real microphone capture produces a decodable WAV
/// WHY: End-to-end check of the cpal capture path
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn given_microphone_when_capturing_briefly_then_wav_written() {
    // Given: A fresh location on disk
    let root = std::env::temp_dir().join(format!("clipdeck-capture-{}", Uuid::new_v4()));
    let mut storage = FsStorage::new(&root);
    let location = storage
        .create_output_location(&OutputRequest::timestamped(Utc::now(), "Music/Recordings"))
        .unwrap();

    // When: Capturing for half a second
    let mut device = CpalCaptureDevice::new();
    let handle = device.open(&location).unwrap();
    sleep(Duration::from_millis(500));
    handle.finalize().unwrap();

    // Then: The file decodes with the device layout
    let clip = wav::decode(location.as_path()).unwrap();
    assert!(clip.channels > 0);
    assert!(clip.sample_rate > 0);
    assert!(clip.samples.iter().all(|s| s.is_finite()));

    let _ = std::fs::remove_dir_all(root);
}
