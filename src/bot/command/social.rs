use serenity::all::{
    ChannelId, Colour, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption, CreateEmbed, CreateEmbedFooter, CreateMessage,
};

use super::{embed_message, ephemeral, guild_id, reply, Options};
use crate::{
    data::guild::GuildConfigRepository, error::AppError, model::guild::ChannelKind,
    state::AppState,
};

pub fn register() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("help").description("A little guide to the server and the dweller"),
        CreateCommand::new("whisper")
            .description("Send an anonymous message.")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "message",
                    "What is your whisper?",
                )
                .required(true)
                .max_length(1000),
            ),
    ]
}

/// `<#id>` for a configured channel, or a plain `#name` fallback.
pub fn channel_mention(channel: Option<u64>, fallback: &str) -> String {
    match channel {
        Some(id) => format!("<#{}>", id),
        None => format!("#{}", fallback),
    }
}

pub async fn help(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = guild_id(command)?;
    let repo = GuildConfigRepository::new(&state.db);
    let intros = channel_mention(repo.get_channel(guild_id, ChannelKind::Intros).await?, "intros");
    let colours = channel_mention(repo.get_channel(guild_id, ChannelKind::Colour).await?, "colors");

    let embed = CreateEmbed::new()
        .title("Welcome to The Cavern!")
        .description(
            "Here's a quick guide to help you get started and make the most of the server and bot features.",
        )
        .colour(Colour::PURPLE)
        .field(
            "Getting Started",
            format!("Introduce yourself in {} and meet the community!", intros),
            false,
        )
        .field(
            "Decorate Your Profile",
            format!("Personalize your name color using the `/color` command in {}.", colours),
            false,
        )
        .field(
            "Grow Your Wealth",
            "Earn gold by chatting and claiming your daily reward with `/daily`. Spend it in the `/shop` or try your luck with `/games`!",
            false,
        )
        .field(
            "Useful Commands",
            [
                "`/balance` - Check your gold",
                "`/daily` - Claim your daily gold",
                "`/leaderboard` - See the richest members",
                "`/color` - Set or clear your name color",
                "`/shop` - View the shop",
                "`/buy` - Purchase shop items",
                "`/games` - See available games",
                "`/whisper` - Send an anonymous message",
                "`/help` - Show this menu",
            ]
            .join("\n"),
            false,
        )
        .footer(CreateEmbedFooter::new(
            "If you have any questions, ask a bartender for help!",
        ));

    reply(ctx, command, embed_message(embed)).await
}

pub async fn whisper(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = guild_id(command)?;
    let message = Options::new(command.data.options()).string("message")?;

    let channel = GuildConfigRepository::new(&state.db)
        .get_channel(guild_id, ChannelKind::Whisper)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("It seems there is no whisper channel here.".to_string())
        })?;

    let embed = CreateEmbed::new()
        .title("A whisper was heard through the Cavern!")
        .description(message)
        .colour(Colour::BLITZ_BLUE)
        .footer(CreateEmbedFooter::new(
            "Whispers are completely anonymous, even to the dev!",
        ));
    ChannelId::new(channel)
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await?;

    reply(
        ctx,
        command,
        ephemeral("We sent your message in the whisper channel."),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests channel mention fallback.
    ///
    /// Expected: configured channel mentioned, otherwise the plain name
    #[test]
    fn mentions_channel_or_fallback() {
        assert_eq!(channel_mention(Some(42), "intros"), "<#42>");
        assert_eq!(channel_mention(None, "intros"), "#intros");
    }
}
