use crate::config::default_directory_hint;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where recordings are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root of the media store.
    pub recordings_dir: PathBuf,

    /// Relative directory new clips are filed under.
    #[serde(default = "default_directory_hint")]
    pub directory_hint: String,
}
