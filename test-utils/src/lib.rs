//! Cavern Test Utils
//!
//! Provides shared testing utilities for the cavern bot. This crate offers a builder for
//! creating test contexts backed by a temporary store document, factories for seeding guild
//! and user records (including legacy shapes that migration must repair), and factories for
//! Serenity model objects.
//!
//! # Overview
//!
//! The test utilities consist of three main components:
//! - **TestBuilder**: Fluent builder for seeding the store document
//! - **TestContext**: Temporary directory holding the store document for one test
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory::guild::GuildDocFactory};
//!
//! #[tokio::test]
//! async fn test_store_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_guild(1000, GuildDocFactory::new().general_channel(42).build())
//!         .build()
//!         .await?;
//!
//!     let db = Database::open(&test.db_path).await?;
//!     // Perform store operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
