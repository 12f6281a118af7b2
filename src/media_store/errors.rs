use std::path::PathBuf;
use thiserror::Error;

use super::validation::ValidationError;

#[derive(Debug, Error)]
pub enum MediaStoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Media item with id {0} not found")]
    NotFound(String),

    #[error("Media store I/O failure on {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Media store {} is corrupt: {reason}", path.display())]
    CorruptStore { path: PathBuf, reason: String },
}

pub type MediaStoreResult<T> = Result<T, MediaStoreError>;
