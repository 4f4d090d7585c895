//! Discord side of timed effect reversion.

use serenity::{
    all::{Colour, EditMember, GuildId, RoleId, UserId},
    async_trait,
    http::Http,
};
use std::sync::Arc;

use crate::{
    data::{guild::GuildConfigRepository, store::Database},
    error::AppError,
    model::{effect::EffectKind, guild::RoleKind},
    service::{effect::EffectActions, log_channel::LogChannel},
};

/// Reverts effects through the Discord API and announces them in the log channel.
pub struct DiscordEffectActions {
    /// Store for the guild's mute role and log channel
    pub db: Arc<Database>,
    /// Discord HTTP client for member edits and log messages
    pub http: Arc<Http>,
}

impl DiscordEffectActions {
    /// Creates a new DiscordEffectActions instance.
    pub fn new(db: Arc<Database>, http: Arc<Http>) -> Self {
        Self { db, http }
    }
}

#[async_trait]
impl EffectActions for DiscordEffectActions {
    async fn revert(&self, guild_id: u64, user_id: u64, kind: EffectKind) -> Result<(), AppError> {
        let guild = GuildId::new(guild_id);
        let user = UserId::new(user_id);

        match kind {
            EffectKind::Mimic => {
                guild
                    .edit_member(&self.http, user, EditMember::new().nickname(""))
                    .await?;
            }
            EffectKind::Barrel => {
                if let Some(role_id) = GuildConfigRepository::new(&self.db)
                    .get_role(guild_id, RoleKind::Mute)
                    .await?
                {
                    self.http
                        .remove_member_role(
                            guild,
                            user,
                            RoleId::new(role_id),
                            Some("Barrel time ended"),
                        )
                        .await?;
                }

                // Server mute can only be changed while the member is in voice.
                if let Err(e) = guild
                    .edit_member(&self.http, user, EditMember::new().mute(false))
                    .await
                {
                    tracing::debug!(
                        "Could not unmute user {} in guild {}: {}",
                        user_id,
                        guild_id,
                        e
                    );
                }
            }
        }

        Ok(())
    }

    async fn notify(&self, guild_id: u64, user_id: u64, kind: EffectKind) -> Result<(), AppError> {
        let description = match kind {
            EffectKind::Mimic => format!("<@{}>'s nickname was restored.", user_id),
            EffectKind::Barrel => format!("<@{}> climbed out of the barrel.", user_id),
        };

        LogChannel::new(&self.db, &self.http)
            .post(guild_id, kind.revert_title(), &description, Colour::DARK_TEAL)
            .await?;

        Ok(())
    }
}
