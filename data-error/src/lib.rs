use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AvatarError>;

/// Failures of the profile avatar toolchain.
///
/// Everything here is fatal to the operation that raised it, with
/// one deliberate exception: backup failures are logged as warnings
/// at the call site and never surface as an `AvatarError`.
#[derive(Error, Debug)]
pub enum AvatarError {
    #[error("Local State file not found at {}", .0.display())]
    StateFileMissing(PathBuf),

    #[error("failed to decode Local State JSON: {0}")]
    StateFileCorrupt(#[source] serde_json::Error),

    #[error("profile `{0}` not found")]
    ProfileNotFound(String),

    #[error("profile `{0}` entry missing in Local State")]
    ProfileEntryMissing(String),

    #[error("failed to decode image: {0}")]
    ImageDecode(#[source] image::ImageError),

    #[error("image processing failed: {0}")]
    ImageProcess(String),

    #[error("failed to write {}: {source}", .path.display())]
    CopyFailed { path: PathBuf, source: io::Error },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for AvatarError {
    fn from(e: serde_json::Error) -> Self {
        Self::Other(anyhow::anyhow!(e.to_string()))
    }
}
