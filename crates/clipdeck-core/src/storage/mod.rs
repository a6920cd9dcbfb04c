//! Filesystem-backed media store.

use crate::{
    CoreResult, RecorderError,
    platform::{MediaLocation, OutputRequest, StorageProvider},
};

use std::{
    fs::{self, File, OpenOptions},
    io::ErrorKind,
    panic::Location,
    path::{Component, Path, PathBuf},
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Numbered variants tried after the suggested name is taken.
const MAX_NAME_SUFFIX: u32 = 99;

/// Stores clips as files under a root directory.
///
/// A request with hint `Music/Recordings` and name `recording_1.wav` lands
/// at `<root>/Music/Recordings/recording_1.wav`, or `recording_1_2.wav` if
/// that file already exists.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Store rooted at `root`. The directory is created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn is_plain_relative(path: &Path) -> bool {
        path.components().all(|c| matches!(c, Component::Normal(_)))
    }

    /// `name` itself, then `<stem>_2.<ext>`, `<stem>_3.<ext>`, ...
    fn candidate_names(name: &Path) -> impl Iterator<Item = PathBuf> + '_ {
        let stem = name.file_stem().map(|s| s.to_string_lossy().into_owned());
        let ext = name.extension().map(|e| e.to_string_lossy().into_owned());

        std::iter::once(name.to_path_buf()).chain((2..=MAX_NAME_SUFFIX).map(move |n| {
            let numbered = format!("{}_{}", stem.as_deref().unwrap_or_default(), n);
            match &ext {
                Some(ext) => PathBuf::from(format!("{}.{}", numbered, ext)),
                None => PathBuf::from(numbered),
            }
        }))
    }

    fn create_exclusive(path: &Path) -> std::io::Result<File> {
        OpenOptions::new().write(true).create_new(true).open(path)
    }
}

impl StorageProvider for FsStorage {
    #[track_caller]
    #[instrument(skip(self, request), fields(name = %request.suggested_name))]
    fn create_output_location(&mut self, request: &OutputRequest) -> CoreResult<MediaLocation> {
        let hint = Path::new(&request.directory_hint);
        let name = Path::new(&request.suggested_name);

        if request.suggested_name.is_empty()
            || !Self::is_plain_relative(hint)
            || !Self::is_plain_relative(name)
        {
            return Err(RecorderError::StorageUnavailable {
                reason: format!(
                    "Rejected output request: {:?} in {:?}",
                    request.suggested_name, request.directory_hint
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !request.mime_type.starts_with("audio/") {
            warn!(mime_type = %request.mime_type, "Non-audio MIME type requested");
        }

        let dir = self.root.join(hint);
        fs::create_dir_all(&dir).map_err(|e| RecorderError::StorageUnavailable {
            reason: format!("Failed to create {}: {}", dir.display(), e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        for candidate in Self::candidate_names(name) {
            let path = dir.join(candidate);
            match Self::create_exclusive(&path) {
                Ok(_) => {
                    info!(path = ?path, "Output location created");
                    return Ok(MediaLocation::from(path.as_path()));
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(path = ?path, "Name taken, trying next");
                }
                Err(e) => {
                    return Err(RecorderError::StorageUnavailable {
                        reason: format!("Failed to create {}: {}", path.display(), e),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
            }
        }

        Err(RecorderError::StorageUnavailable {
            reason: format!(
                "No free name for {:?} in {}",
                request.suggested_name,
                dir.display()
            ),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    fn exists(&self, location: &MediaLocation) -> bool {
        !location.is_empty() && location.as_path().is_file()
    }

    #[track_caller]
    #[instrument(skip_all, fields(location = %location))]
    fn discard(&mut self, location: &MediaLocation) -> CoreResult<()> {
        match fs::remove_file(location.as_path()) {
            Ok(()) => {
                debug!("Output location discarded");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RecorderError::StorageUnavailable {
                reason: format!("Failed to remove {}: {}", location, e),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
