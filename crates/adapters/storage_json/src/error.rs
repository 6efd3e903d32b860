//! Storage-specific error type wrapping IO and JSON errors.

use std::path::PathBuf;

use insteon_local_domain::error::InsteonError;

/// Errors originating from the JSON file store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The file exists but could not be read or written.
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not a JSON object of strings, or the mapping
    /// could not be serialised.
    #[error("malformed configuration in {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<StorageError> for InsteonError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
