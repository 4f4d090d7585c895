//! Domain models persisted in the store and passed between services.
//!
//! Records mirror the persisted JSON layout field for field; every struct uses
//! `#[serde(default)]` so documents written by older versions load with missing fields
//! backfilled from the default schema.

pub mod effect;
pub mod field;
pub mod game;
pub mod guild;
pub mod user;
