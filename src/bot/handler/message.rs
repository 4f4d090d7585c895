//! Message handler.
//!
//! Every guild message passes through here in order: Disboard bump detection, barrel
//! enforcement, the intros sticky, then message counting for tiers. Bot authors stop after
//! bump detection and never get a user record.

use chrono::Utc;
use serenity::all::{
    ChannelId, Colour, Context, CreateEmbed, CreateMessage, GuildId, Mention, Message, MessageId,
    RoleId,
};

use crate::{
    data::{guild::GuildConfigRepository, store::Database},
    error::AppError,
    model::{effect::EffectKind, guild::ChannelKind},
    service::{
        bump::{is_bump_confirmation, send_reminder, thank_you_message, BUMP_COOLDOWN},
        effect::TimedEffectService,
        tier::TierService,
    },
    state::AppState,
};

const INTRO_TEMPLATE: &str = "**Introduce Yourself!**\n\
Please use this template:\n\
Name/Nickname - \n\
Age - \n\
Pronouns - \n\
Hobbies - \n\
Likes - \n\
Dislikes - \n\
Extra Facts - \n";

/// Handles a message sent in any channel the bot can see.
pub async fn handle_message(state: &AppState, ctx: Context, message: Message) {
    let Some(guild_id) = message.guild_id else {
        return;
    };

    let descriptions = message.embeds.iter().map(|embed| embed.description.as_deref());
    if is_bump_confirmation(message.author.id.get(), descriptions) {
        handle_bump(state, &ctx, guild_id, &message).await;
        return;
    }

    if message.author.bot {
        return;
    }

    match enforce_barrel(state, &ctx, guild_id, &message).await {
        Ok(true) => return,
        Ok(false) => {}
        Err(e) => tracing::warn!("Failed to enforce barrel in guild {}: {}", guild_id, e),
    }

    if let Err(e) = repost_intro_template(state, &ctx, guild_id, &message).await {
        tracing::warn!("Failed to repost intro template in guild {}: {}", guild_id, e);
    }

    if let Err(e) = count_message(state, &ctx, guild_id, &message).await {
        tracing::error!(
            "Failed to count message from {} in guild {}: {:?}",
            message.author.id,
            guild_id,
            e
        );
    }
}

/// Deletes the message if its author is stuck in a barrel.
///
/// # Returns
/// - `Ok(true)` - Message deleted; nothing else should see it
/// - `Ok(false)` - Author is not in a barrel
async fn enforce_barrel(
    state: &AppState,
    ctx: &Context,
    guild_id: GuildId,
    message: &Message,
) -> Result<bool, AppError> {
    let barrelled = is_barrelled(
        &state.db,
        guild_id.get(),
        message.author.id.get(),
        message.author.bot,
    )
    .await?;
    if !barrelled {
        return Ok(false);
    }

    message.delete(&ctx.http).await?;
    tracing::debug!("Deleted message from barrelled user {}", message.author.id);

    Ok(true)
}

/// Whether a message author is currently barrelled.
///
/// Bots are never barrelled and are answered without reading the store, so no record is
/// created for them.
async fn is_barrelled(
    db: &Database,
    guild_id: u64,
    user_id: u64,
    author_is_bot: bool,
) -> Result<bool, AppError> {
    if author_is_bot {
        return Ok(false);
    }

    TimedEffectService::new(db)
        .is_active(guild_id, user_id, EffectKind::Barrel, Utc::now())
        .await
}

async fn handle_bump(state: &AppState, ctx: &Context, guild_id: GuildId, message: &Message) {
    if let Err(e) = message
        .channel_id
        .send_message(&ctx.http, thank_you_message())
        .await
    {
        tracing::warn!("Failed to thank bumper in guild {}: {}", guild_id, e);
    }

    let db = state.db.clone();
    let http = ctx.http.clone();
    let guild = guild_id.get();
    let replaced = state
        .bump_reminders
        .schedule(guild, BUMP_COOLDOWN, async move {
            if let Err(e) = send_reminder(&db, &http, guild).await {
                tracing::error!("Failed to send bump reminder for guild {}: {:?}", guild, e);
            }
        })
        .await;

    tracing::info!(
        "Bump recorded in guild {}{}",
        guild,
        if replaced { ", previous reminder replaced" } else { "" }
    );
}

/// Keeps the intro template as the last message in the intros channel.
async fn repost_intro_template(
    state: &AppState,
    ctx: &Context,
    guild_id: GuildId,
    message: &Message,
) -> Result<(), AppError> {
    let repo = GuildConfigRepository::new(&state.db);
    let guild = guild_id.get();

    if repo.get_channel(guild, ChannelKind::Intros).await? != Some(message.channel_id.get()) {
        return Ok(());
    }

    if let Some(previous) = repo.get_last_intro_id(guild).await? {
        if let Err(e) = message
            .channel_id
            .delete_message(&ctx.http, MessageId::new(previous))
            .await
        {
            tracing::debug!("Previous intro template {} already gone: {}", previous, e);
        }
    }

    let sticky = message
        .channel_id
        .send_message(&ctx.http, CreateMessage::new().content(INTRO_TEMPLATE))
        .await?;
    repo.set_last_intro_id(guild, Some(sticky.id.get())).await?;

    Ok(())
}

fn promotion_title(tier: u8, name: &str) -> String {
    match tier {
        3 => format!("You're a patron {}!", name),
        _ => format!("Thanks for drinking with us {}!", name),
    }
}

/// Counts the message toward the author's tier and handles a promotion.
async fn count_message(
    state: &AppState,
    ctx: &Context,
    guild_id: GuildId,
    message: &Message,
) -> Result<(), AppError> {
    let guild = guild_id.get();
    let user_id = message.author.id;

    let Some(tier) = TierService::new(&state.db)
        .record_message(guild, user_id.get())
        .await?
    else {
        return Ok(());
    };

    let repo = GuildConfigRepository::new(&state.db);
    let role_id = repo.get_tier_role(guild, tier).await?;

    if let Some(role_id) = role_id {
        if let Err(e) = ctx
            .http
            .add_member_role(
                guild_id,
                user_id,
                RoleId::new(role_id),
                Some("Reached a new tier"),
            )
            .await
        {
            tracing::warn!("Failed to grant tier {} role in guild {}: {}", tier, guild, e);
        }
    } else {
        tracing::info!("No tier {} role set for guild {}", tier, guild);
    }

    let Some(channel_id) = repo.get_channel(guild, ChannelKind::General).await? else {
        return Ok(());
    };

    let reached = role_id
        .map(|id| Mention::Role(RoleId::new(id)).to_string())
        .unwrap_or_else(|| format!("Tier {}", tier));
    let embed = CreateEmbed::new()
        .title(promotion_title(tier, &message.author.name))
        .field("You reached a new tier", reached, false)
        .thumbnail(message.author.face())
        .colour(Colour::DARK_TEAL);

    ChannelId::new(channel_id)
        .send_message(
            &ctx.http,
            CreateMessage::new()
                .content(Mention::User(user_id).to_string())
                .embed(embed),
        )
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use test_utils::{
        builder::TestBuilder,
        factory::{guild::GuildDocFactory, user::UserDocFactory},
    };

    /// Tests the promotion headline for each tier.
    ///
    /// Expected: tier 3 is the patron title, tier 2 the drinking title
    #[test]
    fn titles_promotions() {
        assert_eq!(promotion_title(2, "Ash"), "Thanks for drinking with us Ash!");
        assert_eq!(promotion_title(3, "Ash"), "You're a patron Ash!");
    }

    /// Tests that the intro template lists every prompt on its own line.
    ///
    /// Expected: seven prompts, each ending in a dash
    #[test]
    fn intro_template_has_prompts() {
        let prompts = INTRO_TEMPLATE.lines().filter(|l| l.ends_with(" - ")).count();
        assert_eq!(prompts, 7);
    }

    /// Tests that a bot author is never looked up in the store.
    ///
    /// Expected: not barrelled and no user record created
    #[tokio::test]
    async fn bot_author_creates_no_record() -> Result<(), AppError> {
        let test = TestBuilder::new().build().await.unwrap();
        let db = Database::open(&test.db_path).await?;

        let barrelled = is_barrelled(&db, 1000, 302050872383242240, true).await?;

        assert!(!barrelled);
        assert!(db.users().await.is_empty());

        Ok(())
    }

    /// Tests that a member with a running barrel is caught.
    ///
    /// Expected: barrelled
    #[tokio::test]
    async fn member_in_barrel_is_barrelled() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_guild(
                1000,
                GuildDocFactory::new()
                    .user(
                        42,
                        UserDocFactory::new()
                            .barrel_expiry(Utc::now() + Duration::minutes(10))
                            .build(),
                    )
                    .build(),
            )
            .build()
            .await
            .unwrap();
        let db = Database::open(&test.db_path).await?;

        assert!(is_barrelled(&db, 1000, 42, false).await?);

        Ok(())
    }
}
