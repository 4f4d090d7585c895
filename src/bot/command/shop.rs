//! Shop menu and purchases.

use chrono::Utc;
use serenity::all::{
    ActionRowComponent, ChannelId, Colour, CommandInteraction, CommandOptionType, Context,
    CreateActionRow, CreateCommand, CreateCommandOption, CreateEmbed, CreateEmbedFooter,
    CreateInputText, CreateInteractionResponse, CreateMessage, CreateModal, EditMember, GuildId,
    InputTextStyle, Mention, ModalInteraction, RoleId, User, UserId,
};

use super::{embed_message, ephemeral, guild_id, reply, Options};
use crate::{
    data::{guild::GuildConfigRepository, store::Database},
    error::AppError,
    model::{
        effect::{MimicDuration, BARREL_MINUTES, BARREL_PRICE},
        guild::{ChannelKind, RoleKind},
    },
    service::{
        game::session::{custom_id, parse_custom_id},
        log_channel::LogChannel,
        shop::{validate_nickname, validate_target, ShopService, MAX_NICKNAME_LEN},
    },
    state::AppState,
};

const NICKNAME_INPUT: &str = "nickname";

pub fn register() -> Vec<CreateCommand> {
    let target = |description: &str| {
        CreateCommandOption::new(CommandOptionType::User, "target", description).required(true)
    };

    vec![
        CreateCommand::new("shop").description("View the shop menu"),
        CreateCommand::new("buy")
            .description("Buy items from the shop")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "mimic",
                    "Temporarily change a user's nickname",
                )
                .add_sub_option(target("The user to cast a mimic's curse upon"))
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "duration",
                        "How long to curse them for",
                    )
                    .required(true)
                    .add_string_choice("1 Hour (1500 gold)", "1h")
                    .add_string_choice("6 Hours (6000 gold)", "6h")
                    .add_string_choice("12 Hours (10000 gold)", "12h"),
                ),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "barrel",
                    format!(
                        "Send a user to the barrel for {} minutes ({} gold)",
                        BARREL_MINUTES, BARREL_PRICE
                    ),
                )
                .add_sub_option(target("The user to send to the barrel")),
            )
            .add_option(CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "trigger",
                "(Coming soon)",
            )),
    ]
}

pub async fn shop(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let mimic_prices = [
        MimicDuration::OneHour,
        MimicDuration::SixHours,
        MimicDuration::TwelveHours,
    ]
    .iter()
    .map(|duration| format!("{}h - **{}** gold", duration.hours(), duration.price()))
    .collect::<Vec<_>>()
    .join("\n");

    let embed = CreateEmbed::new()
        .title("🛒 The Cavern Shop")
        .description("Spend your hard earned gold with `/buy`!")
        .colour(Colour::PURPLE)
        .field(
            "🎭 Mimic's Curse",
            format!(
                "Change another member's nickname for a while.\n{}",
                mimic_prices
            ),
            false,
        )
        .field(
            "🛢️ Barrel Time",
            format!(
                "Mute another member for {} minutes.\n**{}** gold",
                BARREL_MINUTES, BARREL_PRICE
            ),
            false,
        )
        .field("🔫 Trigger", "Coming soon!", false);

    reply(ctx, command, embed_message(embed)).await
}

pub async fn buy(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = guild_id(command)?;
    let (subcommand, options) = Options::new(command.data.options()).subcommand()?;

    match subcommand {
        "mimic" => buy_mimic(ctx, state, command, guild_id, &options).await,
        "barrel" => buy_barrel(ctx, state, command, guild_id, &options).await,
        "trigger" => reply(ctx, command, ephemeral("Trigger is coming soon!")).await,
        other => Err(AppError::BadRequest(format!("Unknown item `{}`.", other))),
    }
}

/// Posts an announcement in the general channel, if one is configured.
async fn announce(ctx: &Context, db: &Database, guild_id: u64, embed: CreateEmbed) {
    let channel = match GuildConfigRepository::new(db)
        .get_channel(guild_id, ChannelKind::General)
        .await
    {
        Ok(Some(channel)) => channel,
        Ok(None) => return,
        Err(e) => {
            tracing::error!("Failed to read general channel for guild {}: {}", guild_id, e);
            return;
        }
    };

    if let Err(e) = ChannelId::new(channel)
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await
    {
        tracing::warn!("Failed to announce purchase in guild {}: {}", guild_id, e);
    }
}

async fn log_purchase(ctx: &Context, db: &Database, guild_id: u64, title: &str, details: &str) {
    if let Err(e) = LogChannel::new(db, &ctx.http)
        .post(guild_id, title, details, Colour::ORANGE)
        .await
    {
        tracing::warn!("Failed to log purchase in guild {}: {}", guild_id, e);
    }
}

async fn buy_mimic(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
    guild_id: u64,
    options: &Options<'_>,
) -> Result<(), AppError> {
    let target = options.user("target")?;
    let choice = options.string("duration")?;
    let duration = MimicDuration::from_choice(choice)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown duration `{}`.", choice)))?;

    validate_target(&command.user, target)?;
    ShopService::new(&state.db)
        .check_mimic(guild_id, command.user.id.get(), target.id.get(), duration, Utc::now())
        .await?;

    let modal = CreateModal::new(
        custom_id("mimic", duration.choice(), target.id.get()),
        "Mimic Nickname",
    )
    .components(vec![CreateActionRow::InputText(
        CreateInputText::new(
            InputTextStyle::Short,
            "Enter the new nickname for the target",
            NICKNAME_INPUT,
        )
        .max_length(MAX_NICKNAME_LEN as u16)
        .required(true),
    )]);

    command
        .create_response(&ctx.http, CreateInteractionResponse::Modal(modal))
        .await?;
    Ok(())
}

fn submitted_nickname(modal: &ModalInteraction) -> Option<String> {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            ActionRowComponent::InputText(input) if input.custom_id == NICKNAME_INPUT => {
                input.value.clone()
            }
            _ => None,
        })
}

/// Completes a mimic purchase from the nickname form.
pub async fn mimic_submit(
    ctx: &Context,
    state: &AppState,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    let guild_id = modal
        .guild_id
        .map(|id| id.get())
        .ok_or_else(|| AppError::BadRequest("This can only be used in a server.".to_string()))?;
    let (_, choice, target_id) = parse_custom_id(&modal.data.custom_id)
        .ok_or_else(|| AppError::BadRequest("This form has expired.".to_string()))?;
    let duration = MimicDuration::from_choice(choice)
        .ok_or_else(|| AppError::BadRequest("This form has expired.".to_string()))?;
    let nickname = validate_nickname(&submitted_nickname(modal).unwrap_or_default())?;
    let buyer = &modal.user;
    let now = Utc::now();

    let shop = ShopService::new(&state.db);
    shop.check_mimic(guild_id, buyer.id.get(), target_id, duration, now)
        .await?;

    let reason = format!("Mimic purchased by {}", buyer.name);
    let edit = EditMember::new()
        .nickname(nickname.clone())
        .audit_log_reason(&reason);
    if let Err(e) = GuildId::new(guild_id)
        .edit_member(&ctx.http, UserId::new(target_id), edit)
        .await
    {
        tracing::warn!(
            "Failed to change nickname of user {} in guild {}: {}",
            target_id,
            guild_id,
            e
        );
        return Err(AppError::BadRequest(
            "I don't have permission to change that user's nickname.".to_string(),
        ));
    }

    let expiry = shop
        .complete_mimic(guild_id, buyer.id.get(), target_id, duration, now)
        .await?;
    let target = Mention::User(UserId::new(target_id));

    modal
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                ephemeral(format!(
                    "{}'s nickname has been changed to '{}' until <t:{}:t>.",
                    target,
                    nickname,
                    expiry.timestamp()
                )),
            ),
        )
        .await?;

    announce(
        ctx,
        &state.db,
        guild_id,
        CreateEmbed::new()
            .title("Somebody has placed a mimic's curse!")
            .description(format!("Enjoy your new name {}", target))
            .colour(Colour::PURPLE)
            .footer(CreateEmbedFooter::new(format!(
                "This curse will last for {}h",
                duration.hours()
            ))),
    )
    .await;
    log_purchase(
        ctx,
        &state.db,
        guild_id,
        "Mimic Purchased",
        &format!(
            "{} placed a mimic curse on {} for {} hour(s). Nickname: '{}'",
            Mention::User(buyer.id),
            target,
            duration.hours(),
            nickname
        ),
    )
    .await;

    Ok(())
}

/// Puts the target in the barrel role and server-mutes them when in voice.
///
/// Missing configuration and permission failures are logged; the barrel still counts.
async fn apply_barrel(ctx: &Context, db: &Database, guild_id: u64, target: &User) {
    let guild = GuildId::new(guild_id);

    match GuildConfigRepository::new(db)
        .get_role(guild_id, RoleKind::Mute)
        .await
    {
        Ok(Some(role_id)) => {
            if let Err(e) = ctx
                .http
                .add_member_role(guild, target.id, RoleId::new(role_id), Some("Barrel time"))
                .await
            {
                tracing::warn!(
                    "Failed to add barrel role to user {} in guild {}: {}",
                    target.id,
                    guild_id,
                    e
                );
            }
        }
        Ok(None) => tracing::warn!("No barrel role configured for guild {}", guild_id),
        Err(e) => tracing::error!("Failed to read barrel role for guild {}: {}", guild_id, e),
    }

    if let Err(e) = guild
        .edit_member(&ctx.http, target.id, EditMember::new().mute(true))
        .await
    {
        tracing::debug!("Could not server mute user {} in guild {}: {}", target.id, guild_id, e);
    }
}

async fn buy_barrel(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
    guild_id: u64,
    options: &Options<'_>,
) -> Result<(), AppError> {
    let target = options.user("target")?;
    let buyer_id = command.user.id.get();
    let now = Utc::now();

    validate_target(&command.user, target)?;
    let shop = ShopService::new(&state.db);
    shop.check_barrel(guild_id, buyer_id, target.id.get(), now)
        .await?;

    apply_barrel(ctx, &state.db, guild_id, target).await;
    shop.complete_barrel(guild_id, buyer_id, target.id.get(), now)
        .await?;

    reply(
        ctx,
        command,
        ephemeral(format!("You have put {} in the barrel!", Mention::User(target.id))),
    )
    .await?;

    log_purchase(
        ctx,
        &state.db,
        guild_id,
        "Barrel Time Purchased",
        &format!(
            "{} put {} in the barrel for {} minutes.",
            Mention::User(command.user.id),
            Mention::User(target.id),
            BARREL_MINUTES
        ),
    )
    .await;

    Ok(())
}
