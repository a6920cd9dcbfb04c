use crate::{MediaLocation, Recording, RecordingStore};

fn recording(n: usize) -> Recording {
    Recording {
        file_path: MediaLocation::new(format!("content://media/audio/{n}")),
        title: format!("Recording {n}"),
    }
}

/// WHAT: New store is empty
/// WHY: The list view starts with no entries
#[test]
fn given_new_store_when_listing_then_empty() {
    // Given: A fresh store
    let store = RecordingStore::new();

    // When/Then: Nothing is listed
    assert!(store.is_empty());
    assert!(store.list().is_empty());
    assert_eq!(store.get(0), None);
}

/// WHAT: Appends preserve call order and count
/// WHY: The list is append-only in completion order
#[test]
fn given_sequence_of_adds_when_listing_then_order_and_length_preserved() {
    // Given: A store
    let store = RecordingStore::new();

    // When: Adding several recordings, including a duplicate
    for n in [3, 1, 2, 1] {
        store.add_recording(recording(n));
    }

    // Then: Every call is reflected, in call order, without deduplication
    let titles: Vec<String> = store.list().into_iter().map(|r| r.title).collect();
    assert_eq!(
        titles,
        ["Recording 3", "Recording 1", "Recording 2", "Recording 1"]
    );
    assert_eq!(store.len(), 4);
    assert_eq!(store.get(2), Some(recording(2)));
}

/// WHAT: Subscribers receive the whole list on every change
/// WHY: Observers re-render from the authoritative state, never a diff
#[tokio::test]
async fn given_subscriber_when_adding_then_full_list_published() {
    // Given: A store with one entry and a subscriber
    let store = RecordingStore::new();
    store.add_recording(recording(1));
    let mut rx = store.subscribe();
    assert_eq!(rx.borrow_and_update().len(), 1);

    // When: Another recording is added
    store.add_recording(recording(2));

    // Then: The subscriber is notified with both entries
    rx.changed().await.unwrap();
    let published = rx.borrow_and_update().clone();
    assert_eq!(published, vec![recording(1), recording(2)]);
}

/// WHAT: Adding without any subscriber still updates the list
/// WHY: add_recording never fails
#[test]
fn given_no_subscribers_when_adding_then_list_updated() {
    // Given: A store nobody observes
    let store = RecordingStore::default();

    // When: Adding a recording
    store.add_recording(recording(7));

    // Then: It is listed
    assert_eq!(store.list(), vec![recording(7)]);
}
