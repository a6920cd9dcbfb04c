use crate::{
    CpalPlaybackDevice, FsStorage, MediaLocation, Playback, PlaybackDevice, RecorderError,
    audio::ClipBuffer,
};

/// WHAT: Buffer outputs silence until started
/// WHY: The stream may run before the user presses play
#[test]
fn given_unstarted_buffer_when_filling_then_silence() {
    let buffer = ClipBuffer::new(vec![0.5; 8]);
    let mut out = [1.0_f32; 4];

    buffer.fill(&mut out);

    assert_eq!(out, [0.0; 4]);
    assert!(!buffer.is_playing());
}

/// WHAT: Buffer stops itself at end of clip and pads with silence
/// WHY: Playback completes without an explicit stop
#[test]
fn given_started_buffer_when_filled_past_end_then_padded_and_stopped() {
    // Given: A started six-sample clip
    let buffer = ClipBuffer::new(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
    buffer.begin();

    // When: Pulling two four-sample blocks
    let mut first = [0.0_f32; 4];
    let mut second = [9.0_f32; 4];
    buffer.fill(&mut first);
    assert!(buffer.is_playing());
    buffer.fill(&mut second);

    // Then: Clip continues across blocks, tail padded, playback finished
    assert_eq!(first, [0.1, 0.2, 0.3, 0.4]);
    assert_eq!(second, [0.5, 0.6, 0.0, 0.0]);
    assert!(!buffer.is_playing());
}

/// WHAT: Starting after the end replays from the beginning
/// WHY: Pressing play on a finished clip plays it again
#[test]
fn given_finished_buffer_when_begun_again_then_rewinds() {
    let buffer = ClipBuffer::new(vec![0.1, 0.2]);
    buffer.begin();
    buffer.fill(&mut [0.0; 2]);
    assert!(!buffer.is_playing());

    buffer.begin();
    let mut out = [0.0_f32; 2];
    buffer.fill(&mut out);

    assert_eq!(out, [0.1, 0.2]);
}

/// WHAT: Halt pauses without losing position
/// WHY: Release stops output immediately
#[test]
fn given_playing_buffer_when_halted_then_silence_and_position_kept() {
    let buffer = ClipBuffer::new(vec![0.1, 0.2, 0.3, 0.4]);
    buffer.begin();
    buffer.fill(&mut [0.0; 2]);

    buffer.halt();
    let mut paused = [1.0_f32; 2];
    buffer.fill(&mut paused);
    buffer.begin();
    let mut resumed = [0.0_f32; 2];
    buffer.fill(&mut resumed);

    assert_eq!(paused, [0.0; 2]);
    assert_eq!(resumed, [0.3, 0.4]);
}

/// WHAT: cpal device reports a missing file as setup failure
/// WHY: Decoding happens before any device is touched
#[test]
fn given_missing_file_when_opening_cpal_player_then_setup_failed() {
    let device = CpalPlaybackDevice::new();

    let result = device.open(&MediaLocation::new("/nonexistent/clip.wav"));

    assert!(matches!(
        result,
        Err(RecorderError::PlaybackSetupFailed { .. })
    ));
}

/// WHAT: Playback through cpal of a missing recording is NotFound
/// WHY: Existence is validated against storage first
#[test]
fn given_missing_recording_when_playing_through_cpal_then_not_found() {
    let playback = Playback::new(CpalPlaybackDevice::new(), FsStorage::new("/nonexistent"));

    let result = playback.play(&MediaLocation::new("/nonexistent/clip.wav"));

    assert!(matches!(result, Err(RecorderError::PlaybackNotFound { .. })));
}
