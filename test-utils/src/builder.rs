use serde_json::{Map, Value};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with a seeded store document.
///
/// Provides a fluent interface for configuring the JSON document a test store starts from.
/// Add guild records with `with_guild()`, or replace the whole document with `with_raw()`
/// to exercise legacy layouts, then call `build()` to write it into a fresh temporary
/// directory.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use test_utils::factory::{guild::GuildDocFactory, user::UserDocFactory};
///
/// let test = TestBuilder::new()
///     .with_guild(
///         1000,
///         GuildDocFactory::new()
///             .user(42, UserDocFactory::new().gold(500).build())
///             .build(),
///     )
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// Guild records keyed by the string form of the guild id.
    guilds: Map<String, Value>,

    /// Raw document text written verbatim instead of `guilds`.
    raw: Option<String>,

    /// Whether a document file should be written at all.
    write_document: bool,
}

impl TestBuilder {
    /// Creates a new test builder with an empty document.
    ///
    /// # Returns
    /// - New `TestBuilder` instance with no guild records
    pub fn new() -> Self {
        Self {
            guilds: Map::new(),
            raw: None,
            write_document: true,
        }
    }

    /// Adds a guild record to the seeded document.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID used as the document key
    /// - `guild` - Guild record, typically from `GuildDocFactory::build()`
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_guild(mut self, guild_id: u64, guild: Value) -> Self {
        self.guilds.insert(guild_id.to_string(), guild);
        self
    }

    /// Replaces the seeded document with raw text.
    ///
    /// Used to seed malformed or legacy layouts that the typed factories cannot express.
    ///
    /// # Arguments
    /// - `raw` - Exact file contents to write
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }

    /// Skips writing a document so the store starts from a missing file.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn without_document(mut self) -> Self {
        self.write_document = false;
        self
    }

    /// Builds the test context and writes the seeded document.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context whose `db_path` points at the seeded document
    /// - `Err(TestError::Io)` - Failed to create the temporary directory or write the file
    /// - `Err(TestError::Json)` - Failed to serialize the seeded guild records
    pub async fn build(self) -> Result<TestContext, TestError> {
        let context = TestContext::new()?;

        if self.write_document {
            let contents = match self.raw {
                Some(raw) => raw,
                None => serde_json::to_string_pretty(&Value::Object(self.guilds))?,
            };
            tokio::fs::write(&context.db_path, contents).await?;
        }

        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
