//! Audit messages posted to a guild's log channel.

use serenity::{
    all::{ChannelId, Colour, CreateEmbed, CreateMessage, Timestamp},
    http::Http,
};

use crate::{
    data::{guild::GuildConfigRepository, store::Database},
    error::AppError,
    model::guild::ChannelKind,
};

/// Posts embeds to the configured log channel of a guild.
pub struct LogChannel<'a> {
    db: &'a Database,
    http: &'a Http,
}

impl<'a> LogChannel<'a> {
    /// Creates a new LogChannel instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the store holding the guild configuration
    /// - `http` - Discord HTTP client for sending the embed
    pub fn new(db: &'a Database, http: &'a Http) -> Self {
        Self { db, http }
    }

    /// Posts a log embed.
    ///
    /// A guild without a log channel is not an error; the entry is dropped.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `title` - Embed title
    /// - `description` - Embed body
    /// - `colour` - Embed colour
    ///
    /// # Returns
    /// - `Ok(true)` - Embed posted
    /// - `Ok(false)` - No log channel configured
    /// - `Err(AppError::DiscordErr)` - Discord rejected the message
    pub async fn post(
        &self,
        guild_id: u64,
        title: &str,
        description: &str,
        colour: Colour,
    ) -> Result<bool, AppError> {
        let Some(channel_id) = GuildConfigRepository::new(self.db)
            .get_channel(guild_id, ChannelKind::Log)
            .await?
        else {
            tracing::debug!("No log channel in guild {}, dropping '{}'", guild_id, title);
            return Ok(false);
        };

        let embed = CreateEmbed::new()
            .title(title)
            .description(description)
            .colour(colour)
            .timestamp(Timestamp::now());
        ChannelId::new(channel_id)
            .send_message(self.http, CreateMessage::new().embed(embed))
            .await?;

        Ok(true)
    }
}
