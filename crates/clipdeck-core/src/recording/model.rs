use crate::platform::MediaLocation;

use chrono::{DateTime, Utc};

/// A completed clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recording {
    /// Where the audio lives.
    pub file_path: MediaLocation,
    /// Display title, derived from the completion time.
    pub title: String,
}

impl Recording {
    /// Recording that finished at `completed_at`.
    pub fn completed(file_path: MediaLocation, completed_at: DateTime<Utc>) -> Self {
        Self {
            file_path,
            title: format!("Recording {}", completed_at.timestamp_millis()),
        }
    }
}
