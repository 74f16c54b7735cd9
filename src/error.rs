//! Crate-level error type

use std::path::PathBuf;

use crate::types::EntryReason;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error on {path:?}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("Malformed dream store at {path:?}: {source}")]
    Json { path: PathBuf, source: serde_json::Error },
    #[error("Failed to serialize dream store: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Entry rejected: {0}")]
    Rejected(EntryReason),
    #[error("Dream {0} not found.")]
    NotFound(String),
    #[error("Dream {0} already exists.")]
    DuplicateId(String),
    #[error("Failed to read config file at {path:?}.")]
    ReadConfig { path: PathBuf, source: std::io::Error },
    #[error("Failed to parse config file at {path:?}.")]
    ParseConfig { path: PathBuf, source: toml::de::Error },
    #[error("{message}")]
    Validation { message: String },
}

impl From<EntryReason> for Error {
    fn from(reason: EntryReason) -> Self {
        Error::Rejected(reason)
    }
}
