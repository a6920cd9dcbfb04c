use crate::{
    Capability, PermissionResult, RecorderError, RecordingSession, RecordingStore, SessionStatus,
    StartOutcome, StopOutcome,
    tests::fakes::{FakeCaptureDevice, FakePermissions, FakeStorage},
};

type TestSession = RecordingSession<FakePermissions, FakeStorage, FakeCaptureDevice>;

fn session() -> (TestSession, FakePermissions, FakeStorage, FakeCaptureDevice) {
    let permissions = FakePermissions::granted();
    let storage = FakeStorage::default();
    let capture = FakeCaptureDevice::default();
    let session = RecordingSession::new(permissions.clone(), storage.clone(), capture.clone());
    (session, permissions, storage, capture)
}

/// WHAT: Start then stop yields exactly one recording at the output location
/// WHY: Core recording lifecycle
#[test]
fn given_idle_session_when_started_and_stopped_then_one_recording_saved() {
    // Given: An idle session with permissions granted
    let (mut session, _, _, capture) = session();
    let store = RecordingStore::new();
    assert_eq!(session.status(), SessionStatus::Idle);
    assert_eq!(session.output_location(), None);

    // When: Starting and stopping
    let StartOutcome::Started(location) = session.start().unwrap() else {
        panic!("expected capture to start");
    };
    assert_eq!(session.status(), SessionStatus::Recording);
    assert_eq!(session.output_location(), Some(&location));
    assert!(session.session_id().is_some());

    let outcome = session.stop(&store).unwrap();

    // Then: One entry whose path is the session's output location
    let list = store.list();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].file_path, location);
    assert!(list[0].title.starts_with("Recording "));
    assert_eq!(outcome, StopOutcome::Saved(list[0].clone()));
    assert_eq!(session.status(), SessionStatus::Idle);
    assert_eq!(session.output_location(), None);
    assert_eq!(session.session_id(), None);
    assert_eq!(capture.finalized.get(), 1);
}

/// WHAT: Output request follows the naming scheme
/// WHY: Storage files clips as recording_<millis>.wav under the hint
#[test]
fn given_custom_hint_when_started_then_request_uses_hint_and_wav_name() {
    // Given: A session filing under a custom directory
    let (session, _, storage, _) = session();
    let mut session = session.with_directory_hint("Audio/Clips");

    // When: Starting
    session.start().unwrap();

    // Then: The storage request carries the hint, MIME type and name
    let created = storage.created.borrow();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].directory_hint, "Audio/Clips");
    assert_eq!(created[0].mime_type, "audio/wav");
    assert!(created[0].suggested_name.starts_with("recording_"));
    assert!(created[0].suggested_name.ends_with(".wav"));
}

/// WHAT: Start while recording is a no-op
/// WHY: At most one capture handle may exist
#[test]
fn given_recording_session_when_started_again_then_no_second_capture() {
    // Given: A recording session
    let (mut session, _, storage, capture) = session();
    let StartOutcome::Started(location) = session.start().unwrap() else {
        panic!("expected capture to start");
    };

    // When: Starting again
    let outcome = session.start().unwrap();

    // Then: Still recording to the same location with a single handle
    assert_eq!(outcome, StartOutcome::AlreadyRecording);
    assert_eq!(session.status(), SessionStatus::Recording);
    assert_eq!(session.output_location(), Some(&location));
    assert_eq!(capture.opened.borrow().len(), 1);
    assert_eq!(storage.created.borrow().len(), 1);
}

/// WHAT: Stop while idle is a no-op
/// WHY: Repeated stop presses must not add entries or fail
#[test]
fn given_idle_session_when_stopped_then_nothing_happens() {
    // Given: An idle session
    let (mut session, _, _, capture) = session();
    let store = RecordingStore::new();

    // When: Stopping twice
    let first = session.stop(&store).unwrap();
    let second = session.stop(&store).unwrap();

    // Then: Both are no-ops
    assert_eq!(first, StopOutcome::NotRecording);
    assert_eq!(second, StopOutcome::NotRecording);
    assert!(store.is_empty());
    assert_eq!(capture.finalized.get(), 0);
}

/// WHAT: Failed finalize leaves the session idle without a record
/// WHY: The session must never stay stuck in Recording
#[test]
fn given_failing_finalize_when_stopped_then_idle_and_no_entry() {
    // Given: A recording session whose capture will fail to finalize
    let (mut session, _, _, capture) = session();
    capture.fail_finalize.set(true);
    let store = RecordingStore::new();
    session.start().unwrap();

    // When: Stopping
    let result = session.stop(&store);

    // Then: Error surfaced, state Idle, nothing stored
    assert!(matches!(
        result,
        Err(RecorderError::CaptureFinalizeFailed { .. })
    ));
    assert_eq!(session.status(), SessionStatus::Idle);
    assert!(store.is_empty());

    // And: A subsequent stop is a no-op
    assert_eq!(session.stop(&store).unwrap(), StopOutcome::NotRecording);
}

/// WHAT: Missing microphone permission defers start
/// WHY: Permission is requested asynchronously, start is not retried
#[test]
fn given_no_permission_when_started_then_permission_requested_and_idle() {
    // Given: A session without permissions
    let permissions = FakePermissions::default();
    let storage = FakeStorage::default();
    let capture = FakeCaptureDevice::default();
    let mut session = RecordingSession::new(permissions.clone(), storage.clone(), capture.clone());

    // When: Starting
    let outcome = session.start().unwrap();

    // Then: Both capabilities requested, nothing allocated
    assert_eq!(outcome, StartOutcome::PermissionRequested);
    assert_eq!(session.status(), SessionStatus::Idle);
    assert_eq!(
        *permissions.requests.borrow(),
        vec![Capability::RECORDING.to_vec()]
    );
    assert!(storage.created.borrow().is_empty());
    assert!(capture.opened.borrow().is_empty());
}

/// WHAT: Granted permission is remembered but does not auto-start
/// WHY: The user re-invokes start after granting
#[test]
fn given_pending_request_when_granted_then_idle_until_started_again() {
    // Given: A session that requested permission
    let permissions = FakePermissions::default();
    let mut session = RecordingSession::new(
        permissions.clone(),
        FakeStorage::default(),
        FakeCaptureDevice::default(),
    );
    session.start().unwrap();

    // When: The grant arrives
    session
        .permission_result(&PermissionResult::uniform(&Capability::RECORDING, true))
        .unwrap();

    // Then: Still idle; the next start records
    assert_eq!(session.status(), SessionStatus::Idle);
    assert!(matches!(session.start().unwrap(), StartOutcome::Started(_)));
}

/// WHAT: A denied capability surfaces PermissionDenied
/// WHY: Denial is a notification, not a crash
#[test]
fn given_pending_request_when_denied_then_permission_denied_error() {
    // Given: A session that requested permission
    let permissions = FakePermissions::default();
    let mut session = RecordingSession::new(
        permissions.clone(),
        FakeStorage::default(),
        FakeCaptureDevice::default(),
    );
    session.start().unwrap();

    // When: Storage is refused
    let result = session.permission_result(&PermissionResult::new([
        (Capability::RecordAudio, true),
        (Capability::WriteStorage, false),
    ]));

    // Then: Denied capability reported, session idle
    match result {
        Err(RecorderError::PermissionDenied { denied, .. }) => {
            assert_eq!(denied, vec![Capability::WriteStorage]);
        }
        other => panic!("expected PermissionDenied, got {other:?}"),
    }
    assert_eq!(session.status(), SessionStatus::Idle);
}

/// WHAT: Storage failure keeps the session idle
/// WHY: No partial state on failed start
#[test]
fn given_unavailable_storage_when_started_then_storage_unavailable_and_idle() {
    // Given: Storage that cannot create locations
    let (mut session, _, storage, capture) = session();
    storage.unavailable.set(true);

    // When: Starting
    let result = session.start();

    // Then: Error surfaced, no capture opened
    assert!(matches!(
        result,
        Err(RecorderError::StorageUnavailable { .. })
    ));
    assert_eq!(session.status(), SessionStatus::Idle);
    assert!(capture.opened.borrow().is_empty());
}

/// WHAT: Capture setup failure discards the fresh location
/// WHY: No partial state on failed start
#[test]
fn given_failing_capture_when_started_then_location_discarded_and_idle() {
    // Given: A capture device that cannot open
    let (mut session, _, storage, capture) = session();
    capture.fail_open.set(true);

    // When: Starting
    let result = session.start();

    // Then: Error surfaced, the created location was discarded
    assert!(matches!(
        result,
        Err(RecorderError::CaptureSetupFailed { .. })
    ));
    assert_eq!(session.status(), SessionStatus::Idle);
    assert_eq!(storage.discarded.borrow().len(), 1);
    assert!(storage.existing.borrow().is_empty());

    // And: Recovery works once the device is available again
    capture.fail_open.set(false);
    assert!(matches!(session.start().unwrap(), StartOutcome::Started(_)));
}

/// WHAT: Consecutive sessions produce entries in completion order
/// WHY: Store order equals recording completion order
#[test]
fn given_two_sessions_when_completed_then_entries_in_order() {
    // Given: A session and store
    let (mut session, _, _, _) = session();
    let store = RecordingStore::new();

    // When: Recording twice
    let StartOutcome::Started(first) = session.start().unwrap() else {
        panic!("expected capture to start");
    };
    session.stop(&store).unwrap();
    let StartOutcome::Started(second) = session.start().unwrap() else {
        panic!("expected capture to start");
    };
    session.stop(&store).unwrap();

    // Then: Two distinct entries in order
    let paths: Vec<_> = store.list().into_iter().map(|r| r.file_path).collect();
    assert_eq!(paths, vec![first, second]);
}
