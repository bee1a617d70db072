use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("refstore: invalid class name {0:?}")]
    InvalidName(String),

    #[error("refstore: invalid embedding: {0}")]
    InvalidEmbedding(String),

    #[error("refstore: invalid format: {0}")]
    InvalidFormat(String),

    #[error("refstore: {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("refstore: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
