//! Discord surface of the bot: slash command definitions and gateway event handlers.
//!
//! The bot's HTTP client is shared with the scheduler so cron jobs can revert effects and
//! post log messages over the same connection.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild, channel and role availability
//! - `GUILD_MESSAGES` - Message events for tiers, barrels, intros and bump detection
//! - `GUILD_MEMBERS` - Join and leave events (privileged intent)
//! - `MESSAGE_CONTENT` - Embed content of Disboard's bump confirmation (privileged intent)
//!
//! Both privileged intents must be enabled in the Discord Developer Portal.

pub mod command;
pub mod handler;
pub mod start;
