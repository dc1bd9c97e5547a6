use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Fixed Brave installation layout under the home directory. Only
/// this layout is supported; tests and unusual setups go through
/// `--base-dir`.
const BRAVE_DATA_DIR: &str =
    "Library/Application Support/BraveSoftware/Brave-Browser";

pub fn provide_base_dir(
    base_dir: Option<&Path>,
) -> Result<PathBuf, AppError> {
    match base_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => home::home_dir()
            .map(|home| home.join(BRAVE_DATA_DIR))
            .ok_or(AppError::HomeDirNotFound),
    }
}
