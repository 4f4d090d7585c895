//! Member join and leave handlers.

use std::time::Duration;

use serenity::all::{
    ChannelId, Colour, Context, CreateEmbed, CreateMessage, GuildId, Member, Mention, Timestamp,
    User,
};

use crate::{
    bot::command::social::channel_mention,
    data::{guild::GuildConfigRepository, store::Database},
    error::AppError,
    model::guild::ChannelKind,
    state::AppState,
};

/// Delay before the guidance embed follows a welcome.
const GUIDANCE_DELAY: Duration = Duration::from_secs(30);

/// Posts an embed mentioning `user` to one of the guild's configured channels.
///
/// # Returns
/// - `Ok(true)` - Embed posted
/// - `Ok(false)` - Channel kind not configured for the guild
async fn post_to(
    ctx: &Context,
    db: &Database,
    guild_id: u64,
    kind: ChannelKind,
    user: &User,
    embed: CreateEmbed,
) -> Result<bool, AppError> {
    let Some(channel_id) = GuildConfigRepository::new(db)
        .get_channel(guild_id, kind)
        .await?
    else {
        tracing::debug!("No {} channel in guild {}", kind.label(), guild_id);
        return Ok(false);
    };

    ChannelId::new(channel_id)
        .send_message(
            &ctx.http,
            CreateMessage::new()
                .content(Mention::User(user.id).to_string())
                .embed(embed),
        )
        .await?;

    Ok(true)
}

fn welcome_embed(user: &User) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("Welcome in to the Cavern, {}!", user.name))
        .description("Grab a drink or get out!")
        .thumbnail(user.face())
        .colour(Colour::DARK_TEAL)
        .timestamp(Timestamp::now())
}

async fn guidance_embed(
    db: &Database,
    guild_id: u64,
    user: &User,
) -> Result<CreateEmbed, AppError> {
    let repo = GuildConfigRepository::new(db);
    let intros = channel_mention(repo.get_channel(guild_id, ChannelKind::Intros).await?, "intros");
    let colours = channel_mention(repo.get_channel(guild_id, ChannelKind::Colour).await?, "colors");

    Ok(CreateEmbed::new()
        .title(format!("Welcome to The Cavern {}!", user.name))
        .field(
            "Introduce yourself",
            format!("Head to {} and tell us a bit about yourself", intros),
            false,
        )
        .field(
            "Decorate your profile",
            format!("Go and grab a `/color` for your name in {}", colours),
            false,
        )
        .field(
            "Grow your wealth",
            "The Cavern operates a gold based economy. Get your `/daily` reward streak going and \
             check out what we have in the `/shop` (or gamble it away with `/games`)",
            false,
        )
        .colour(Colour::DARK_TEAL))
}

/// Handles a member joining a guild.
///
/// Welcomes the member, creates their record and schedules the guidance embed. Bots get
/// the welcome only.
pub async fn handle_guild_member_addition(state: &AppState, ctx: Context, new_member: Member) {
    let guild_id = new_member.guild_id.get();
    let user = new_member.user;

    let welcome = welcome_embed(&user);
    if let Err(e) = post_to(&ctx, &state.db, guild_id, ChannelKind::Welcome, &user, welcome).await {
        tracing::warn!("Failed to welcome {} in guild {}: {}", user.id, guild_id, e);
    }

    if user.bot {
        return;
    }

    if let Err(e) = state.db.get_user(guild_id, user.id.get()).await {
        tracing::error!(
            "Failed to create record for user {} in guild {}: {:?}",
            user.id,
            guild_id,
            e
        );
    }

    let db = state.db.clone();
    tokio::spawn(async move {
        tokio::time::sleep(GUIDANCE_DELAY).await;

        let result = match guidance_embed(&db, guild_id, &user).await {
            Ok(embed) => {
                post_to(&ctx, &db, guild_id, ChannelKind::General, &user, embed).await
            }
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            tracing::warn!("Failed to guide {} in guild {}: {}", user.id, guild_id, e);
        }
    });
}

/// Handles a member leaving a guild.
pub async fn handle_guild_member_removal(
    state: &AppState,
    ctx: Context,
    guild_id: GuildId,
    user: User,
) {
    let embed = CreateEmbed::new()
        .title(format!("{}, See you later traveller!", user.name))
        .thumbnail(user.face())
        .colour(Colour::DARK_TEAL)
        .timestamp(Timestamp::now());

    match post_to(&ctx, &state.db, guild_id.get(), ChannelKind::Goodbye, &user, embed).await {
        Ok(true) => tracing::info!("User {} left guild {}", user.id, guild_id),
        Ok(false) => {}
        Err(e) => tracing::warn!("Failed to say goodbye in guild {}: {}", guild_id, e),
    }
}
