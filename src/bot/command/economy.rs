use chrono::Utc;
use serenity::all::{
    Colour, CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateEmbedFooter, Mention, UserId,
};

use super::{embed_message, ephemeral, guild_id, reply, Options};
use crate::{
    error::AppError,
    model::game::{GameKind, LeaderboardCategory, LeaderboardEntry},
    service::economy::{DailyClaim, EconomyService},
    state::AppState,
};

pub fn register() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("balance")
            .description("Check your balance")
            .add_option(CreateCommandOption::new(
                CommandOptionType::User,
                "user",
                "Whose balance to check",
            )),
        CreateCommand::new("daily").description("Claim your daily gold!"),
        CreateCommand::new("leaderboard")
            .description("Check the leaderboards for a given category")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "category",
                    "What to rank members by",
                )
                .required(true)
                .add_string_choice("Gold", "gold")
                .add_string_choice("Blackjack", "blackjack")
                .add_string_choice("Roulette", "roulette")
                .add_string_choice("Slots", "slots"),
            ),
    ]
}

pub async fn balance(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = guild_id(command)?;
    let options = Options::new(command.data.options());
    let target = options.optional_user("user").unwrap_or(&command.user);

    let record = EconomyService::new(&state.db)
        .balance(guild_id, target.id.get())
        .await?;

    let description = if target.id == command.user.id {
        format!("You have **{}** gold.", record.gold)
    } else {
        format!("{} has **{}** gold.", Mention::User(target.id), record.gold)
    };
    let mut embed = CreateEmbed::new()
        .title("Balance")
        .description(description)
        .colour(Colour::GOLD)
        .thumbnail(target.face());
    for game in [GameKind::Blackjack, GameKind::Roulette, GameKind::Slots] {
        let (wins, losses) = record.record(game);
        embed = embed.field(
            game.name(),
            format!("W/L: {}/{}  ({}%)", wins, losses, record.win_rate(game)),
            true,
        );
    }
    embed = embed.footer(CreateEmbedFooter::new(format!(
        "Daily streak: {}",
        record.streak
    )));

    reply(ctx, command, embed_message(embed)).await
}

pub async fn daily(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = guild_id(command)?;

    let claim = EconomyService::new(&state.db)
        .claim_daily(guild_id, command.user.id.get(), Utc::now())
        .await?;

    match claim {
        DailyClaim::Claimed {
            reward,
            streak,
            balance,
        } => {
            let embed = CreateEmbed::new()
                .title("Daily Gold Claimed!")
                .description(format!("You claimed **{}** gold!", reward))
                .field("Balance", format!("You now have **{}** gold!", balance), false)
                .field(
                    "Streak",
                    format!(
                        "You have claimed your daily gold **{}** days in a row",
                        streak
                    ),
                    false,
                )
                .colour(Colour::GOLD);
            reply(ctx, command, embed_message(embed)).await
        }
        DailyClaim::AlreadyClaimed { next_claim } => {
            reply(
                ctx,
                command,
                ephemeral(format!(
                    "You've already claimed your daily gold today! Come back <t:{}:R>.",
                    next_claim.timestamp()
                )),
            )
            .await
        }
    }
}

fn leaderboard_line(entry: &LeaderboardEntry, unit: &str) -> String {
    format!(
        "**{}.** {} - {} {}",
        entry.place,
        Mention::User(UserId::new(entry.user_id)),
        entry.score,
        unit
    )
}

pub async fn leaderboard(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = guild_id(command)?;
    let options = Options::new(command.data.options());
    let choice = options.string("category")?;
    let category = LeaderboardCategory::from_choice(choice)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown leaderboard `{}`.", choice)))?;

    let board = EconomyService::new(&state.db)
        .leaderboard(guild_id, command.user.id.get(), category)
        .await?;

    let unit = match category {
        LeaderboardCategory::Gold => "gold",
        LeaderboardCategory::Game(_) => "wins",
    };
    let lines: Vec<String> = board
        .top
        .iter()
        .map(|entry| leaderboard_line(entry, unit))
        .collect();
    let description = if lines.is_empty() {
        "No users yet.".to_string()
    } else {
        lines.join("\n")
    };

    let mut embed = CreateEmbed::new()
        .title(format!("{} Leaderboard", board.category.title()))
        .description(description)
        .colour(Colour::GOLD);
    if let Some(caller) = &board.caller {
        embed = embed.footer(CreateEmbedFooter::new(format!(
            "Your position: #{} with {} {}",
            caller.place, caller.score, unit
        )));
    }

    reply(ctx, command, embed_message(embed)).await
}
