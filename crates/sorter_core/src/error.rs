use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::label::Label;

/// Failures raised by a [`DirectoryAccess`](crate::storage::DirectoryAccess) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("invalid entry name {0:?}")]
    InvalidName(String),

    #[error("{op} failed for {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

/// Errors surfaced by [`ClassifierSession`](crate::session::ClassifierSession) operations.
#[derive(Debug, Error)]
pub enum SorterError {
    #[error("directory selection was cancelled")]
    SelectionCancelled,

    #[error("no directory selected")]
    NoDirectory,

    #[error("label {0} is not offered for the selected die type")]
    UnknownLabel(Label),

    #[error("a die needs at least one side, got {0}")]
    InvalidDieType(u32),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
