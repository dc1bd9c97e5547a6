use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use data_error::{AvatarError, Result};
use log::{debug, warn};

/// Suffix of the backup sibling created before a destination is
/// overwritten.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Temporary file with a unique random name, removed when dropped.
/// Concurrent invocations never collide on temp paths even though
/// they can still collide on final destinations.
struct TmpFile {
    file: File,
    path: PathBuf,
}

impl TmpFile {
    fn create() -> std::io::Result<Self> {
        let filename: String = std::iter::repeat_with(fastrand::alphanumeric)
            .take(10)
            .collect();
        let path = env::temp_dir().join(filename);
        let file = File::create(&path)?;
        Ok(Self { file, path })
    }
}

impl Drop for TmpFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// Path of the backup sibling for `path`.
pub fn backup_path(path: impl AsRef<Path>) -> PathBuf {
    let mut name = path.as_ref().as_os_str().to_owned();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Replace `dest` with `data`.
///
/// An existing destination is first copied to its `.bak` sibling;
/// that copy is best-effort and a failure only logs a warning. The
/// data then goes through a temporary file in the platform temp dir
/// and is copied over the destination, so the temp dir and the
/// destination may live on different filesystems. The temp file is
/// removed on every exit path.
///
/// Returns `CopyFailed` when the temp write or the final copy
/// fails; overwriting without a backup is acceptable, losing the
/// new content is not.
pub fn write_atomic(dest: impl AsRef<Path>, data: &[u8]) -> Result<()> {
    let dest = dest.as_ref();

    if dest.exists() {
        let bak = backup_path(dest);
        match fs::copy(dest, &bak) {
            Ok(_) => debug!("backed up {} to {}", dest.display(), bak.display()),
            Err(e) => warn!(
                "could not back up {} to {}: {}",
                dest.display(),
                bak.display(),
                e
            ),
        }
    }

    let copy_failed = |source| AvatarError::CopyFailed {
        path: dest.to_path_buf(),
        source,
    };

    let mut tmp = TmpFile::create().map_err(copy_failed)?;
    tmp.file
        .write_all(data)
        .and_then(|_| tmp.file.flush())
        .map_err(copy_failed)?;
    fs::copy(&tmp.path, dest).map_err(copy_failed)?;

    debug!("wrote {} bytes to {}", data.len(), dest.display());
    Ok(())
}
