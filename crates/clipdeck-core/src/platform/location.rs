use std::{fmt, path::Path};

use chrono::{DateTime, Utc};

/// MIME type of every clip the recorder writes.
pub const RECORDING_MIME_TYPE: &str = "audio/wav";

/// Where the storage provider files new recordings by default.
pub const DEFAULT_DIRECTORY_HINT: &str = "Music/Recordings";

/// Opaque identifier of stored audio.
///
/// Produced by a [`crate::StorageProvider`] and never interpreted by the
/// core beyond emptiness checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaLocation(String);

impl MediaLocation {
    /// Wrap a provider-specific identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the identifier as a filesystem path.
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// True when the identifier carries nothing.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for MediaLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Path> for MediaLocation {
    fn from(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }
}

/// What the session asks the storage provider for when a capture begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRequest {
    /// File name the provider should use if it can.
    pub suggested_name: String,
    /// MIME type of the audio that will be written.
    pub mime_type: String,
    /// Relative directory the provider should file the clip under.
    pub directory_hint: String,
}

impl OutputRequest {
    /// Request named after `now`, e.g. `recording_1700000000000.wav`.
    pub fn timestamped(now: DateTime<Utc>, directory_hint: &str) -> Self {
        Self {
            suggested_name: format!("recording_{}.wav", now.timestamp_millis()),
            mime_type: RECORDING_MIME_TYPE.to_string(),
            directory_hint: directory_hint.to_string(),
        }
    }
}
