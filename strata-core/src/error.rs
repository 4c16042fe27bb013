use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("invalid file reference: {0}")]
    InvalidFileReference(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read '{}': {source}", path.display())]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("decode error: {0}")]
    Decode(String),

    #[error("no files to process")]
    EmptyFileSet,

    #[error("reset requires a mapping: {0}")]
    ResetType(String),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
