use std::io;

use data_error::AvatarError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Couldn't retrieve home directory!")]
    HomeDirNotFound,

    #[error(transparent)]
    IoError(#[from] io::Error),

    #[error(transparent)]
    AvatarError(#[from] AvatarError),
}
