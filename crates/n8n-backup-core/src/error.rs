use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BackupError>;

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("missing configuration: {0}")]
    ConfigMissing(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("backup not found: '{0}'")]
    SnapshotNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error at '{}': {source}", path.display())]
    IoAt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("archive error for '{}': {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("metadata error: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("backup '{0}' has no metadata descriptor")]
    MissingMetadata(String),
}

impl BackupError {
    /// Build a closure that tags an `io::Error` with the path it occurred on.
    pub fn at(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> BackupError {
        let path = path.into();
        move |source| BackupError::IoAt { path, source }
    }

    pub fn archive(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> BackupError {
        let path = path.into();
        move |source| BackupError::Archive { path, source }
    }
}
