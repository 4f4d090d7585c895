use std::path::PathBuf;
use thiserror::Error;

/// Failures of the persistent store document.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading, writing or renaming the store document failed.
    #[error("Store I/O failed for {path}: {source}")]
    Io {
        /// File the operation targeted
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The store document could not be parsed or serialized.
    #[error("Store document {path} is not valid: {source}")]
    Json {
        /// File the document was read from or written to
        path: PathBuf,
        /// The underlying serde error
        #[source]
        source: serde_json::Error,
    },
}
