use crate::Field;
use std::io;
use std::path::PathBuf;

/// Errors raised while loading a snapshot or answering a lookup.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("JSON error in {}: {source}", path.display())]
    Json { path: PathBuf, source: serde_json::Error },

    /// BM25 and average lengths are normalised by the catalog size.
    #[error("document catalog is empty")]
    EmptyCatalog,

    #[error("{0} index is not loaded")]
    FieldUnavailable(Field),

    #[error("unknown match policy {0:?} (expected \"and\" or \"or\")")]
    InvalidPolicy(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Errors that abort engine construction.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Io { .. } | Error::Json { .. } | Error::EmptyCatalog | Error::InvalidConfig(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
