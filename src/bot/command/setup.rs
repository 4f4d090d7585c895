use serenity::all::{
    ChannelType, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption, Mention, Permissions,
};

use super::{ephemeral, guild_id, reply, Options};
use crate::{
    data::guild::GuildConfigRepository,
    error::AppError,
    model::guild::{ChannelKind, RoleKind},
    state::AppState,
};

pub fn register() -> Vec<CreateCommand> {
    let kinds = ChannelKind::ALL.into_iter().fold(
        CreateCommandOption::new(CommandOptionType::String, "kind", "Which channel to set")
            .required(true),
        |option, kind| option.add_string_choice(kind.label(), kind.choice()),
    );

    vec![CreateCommand::new("setup")
        .description("Configure the bot for this server (Staff only)")
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "channel",
                "Set a channel in the config",
            )
            .add_sub_option(kinds)
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::Channel, "channel", "The channel")
                    .required(true)
                    .channel_types(vec![ChannelType::Text]),
            ),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "role",
                "Set up the roles for the guild",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::String, "kind", "Which role to set")
                    .required(true)
                    .add_string_choice("Bump Role", "bump")
                    .add_string_choice("Barrel Role", "mute"),
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::Role, "role", "The role")
                    .required(true),
            ),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "tier",
                "Set the role for a specific tier",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::Integer, "tier", "The tier")
                    .required(true)
                    .add_int_choice("Tier 1", 1)
                    .add_int_choice("Tier 2", 2)
                    .add_int_choice("Tier 3", 3),
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::Role, "role", "The role")
                    .required(true),
            ),
        )]
}

pub async fn setup(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = guild_id(command)?;
    let (subcommand, options) = Options::new(command.data.options()).subcommand()?;
    let repo = GuildConfigRepository::new(&state.db);

    let message = match subcommand {
        "channel" => {
            let choice = options.string("kind")?;
            let kind = ChannelKind::from_choice(choice)
                .ok_or_else(|| {
                    AppError::BadRequest(format!("Unknown channel kind `{}`.", choice))
                })?;
            let channel = options.channel("channel")?;

            repo.set_channel(guild_id, kind, channel.id.get()).await?;
            format!(
                "Successfully set the {} channel to {}",
                kind.label(),
                Mention::Channel(channel.id)
            )
        }
        "role" => {
            let choice = options.string("kind")?;
            let kind = RoleKind::from_choice(choice)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown role kind `{}`.", choice)))?;
            let role = options.role("role")?;

            repo.set_role(guild_id, kind, role.id.get()).await?;
            format!(
                "Successfully set {} as the {} role!",
                Mention::Role(role.id),
                kind.label()
            )
        }
        "tier" => {
            let tier = options.integer("tier")?;
            let tier = u8::try_from(tier)
                .map_err(|_| {
                    AppError::BadRequest("Invalid tier. Please choose 1, 2, or 3.".to_string())
                })?;
            let role = options.role("role")?;

            repo.set_tier_role(guild_id, tier, role.id.get()).await?;
            format!("Set role {} for Tier {}.", Mention::Role(role.id), tier)
        }
        other => return Err(AppError::BadRequest(format!("Unknown subcommand `{}`.", other))),
    };
    tracing::info!("Guild {} setup: {}", guild_id, message);

    reply(ctx, command, ephemeral(message)).await
}
