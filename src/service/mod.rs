//! Business logic between the Discord surface and the store.
//!
//! Services borrow the store for the duration of one operation (`XService::new(&db)`),
//! except the long-lived shared state (game sessions, cooldowns, bump timers) which is
//! owned by `AppState`.

pub mod bump;
pub mod economy;
pub mod effect;
pub mod game;
pub mod log_channel;
pub mod moderation;
pub mod shop;
pub mod tier;
