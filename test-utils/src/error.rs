use thiserror::Error;

/// Errors that can occur while preparing a test context.
#[derive(Error, Debug)]
pub enum TestError {
    /// Failed to create the temporary directory or write the seeded document.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failed to serialize or parse a store document.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
