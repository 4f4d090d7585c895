use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::error::TestError;

/// Test context owning a temporary directory that holds the store document.
///
/// The directory and everything in it is removed when the context is dropped, so keep
/// the context alive for as long as the store under test is in use.
pub struct TestContext {
    /// Temporary directory backing this test.
    pub dir: TempDir,

    /// Path of the store document inside `dir`.
    ///
    /// The file may not exist yet if the builder was told to skip writing a document.
    pub db_path: PathBuf,
}

impl TestContext {
    /// Creates a new context with an empty temporary directory.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with `db_path` set to `<tmp>/database.json`
    /// - `Err(TestError::Io)` - Failed to create the temporary directory
    pub fn new() -> Result<Self, TestError> {
        let dir = tempfile::tempdir()?;
        let db_path = dir.path().join("database.json");

        Ok(Self { dir, db_path })
    }

    /// Reads the store document from disk as raw text.
    ///
    /// # Returns
    /// - `Ok(String)` - Current file contents
    /// - `Err(TestError::Io)` - File missing or unreadable
    pub async fn read_raw(&self) -> Result<String, TestError> {
        Ok(tokio::fs::read_to_string(&self.db_path).await?)
    }

    /// Reads and parses the store document from disk.
    ///
    /// Tests use this to assert on what was actually flushed rather than on the in-memory
    /// state of the store.
    ///
    /// # Returns
    /// - `Ok(Value)` - Parsed document
    /// - `Err(TestError)` - File missing, unreadable, or not valid JSON
    pub async fn read_document(&self) -> Result<Value, TestError> {
        let raw = self.read_raw().await?;
        Ok(serde_json::from_str(&raw)?)
    }
}
