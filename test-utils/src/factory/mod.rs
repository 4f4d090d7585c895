//! Factory methods for creating store documents.
//!
//! This module provides factories for guild and user records in the JSON shape the store
//! persists, reducing boilerplate when seeding a `TestBuilder`. Every factory starts from the
//! full default schema; use `without()` or `raw_field()` to produce the partial or legacy
//! records that migration is expected to repair.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let guild = factory::guild::GuildDocFactory::new()
//!     .log_channel(555)
//!     .user(42, factory::user::UserDocFactory::new().gold(100).build())
//!     .build();
//! ```
//!
//! # Available Factories
//!
//! - `guild` - Guild records with channels, roles, colour roles and users
//! - `user` - User records with economy, effect and warning fields
//! - `helpers` - Unique id generation shared by all factories

pub mod guild;
pub mod helpers;
pub mod user;

pub use guild::create_guild_doc;
pub use user::create_user_doc;
