//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity structs by deserializing JSON, simulating what
//! Discord's API would return, so code that inspects roles or users can be tested without
//! a gateway connection.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{role::create_test_role, user::create_test_user};
//!
//! let crimson = create_test_role(111111111, "Crimson", 0xDC143C, 3);
//! let buyer = create_test_user(222222222, "buyer", false);
//! let bot = create_test_user(333333333, "Disboard", true);
//! ```
//!
//! # Available Factories
//!
//! - `role::create_test_role` - Create Serenity Role objects
//! - `user::create_test_user` - Create Serenity User objects

pub mod role;
pub mod user;

pub use role::create_test_role;
pub use user::create_test_user;
