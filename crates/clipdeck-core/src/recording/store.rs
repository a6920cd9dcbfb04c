use crate::recording::Recording;

use tokio::sync::watch;
use tracing::{debug, instrument};

/// Append-only list of completed recordings.
///
/// Backed by a `watch` channel: every append republishes the entire list,
/// so subscribers always see the authoritative current state and never
/// have to apply diffs.
#[derive(Debug)]
pub struct RecordingStore {
    entries: watch::Sender<Vec<Recording>>,
}

impl RecordingStore {
    /// Empty store.
    pub fn new() -> Self {
        let (entries, _) = watch::channel(Vec::new());
        Self { entries }
    }

    /// Append `recording` and publish the updated list.
    #[instrument(skip(self, recording), fields(title = %recording.title))]
    pub fn add_recording(&self, recording: Recording) {
        self.entries.send_modify(|entries| entries.push(recording));
        debug!(entries = self.len(), "Recording added");
    }

    /// Snapshot of every recording, oldest first.
    pub fn list(&self) -> Vec<Recording> {
        self.entries.borrow().clone()
    }

    /// Recording at `index` in completion order.
    pub fn get(&self, index: usize) -> Option<Recording> {
        self.entries.borrow().get(index).cloned()
    }

    /// Number of recordings.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// True when nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Observe the list. The receiver starts at the current contents.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Recording>> {
        self.entries.subscribe()
    }
}

impl Default for RecordingStore {
    fn default() -> Self {
        Self::new()
    }
}
