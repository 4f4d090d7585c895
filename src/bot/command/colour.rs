//! Colour role registry and self-service colour selection.

use serenity::all::{
    Colour, CommandInteraction, CommandOptionType, Context, CreateAutocompleteResponse,
    CreateCommand, CreateCommandOption, CreateEmbed, CreateInteractionResponse, GuildId, Mention,
    Permissions, Role, RoleId,
};

use super::{embed_message, ephemeral, guild_id, reply, Options};
use crate::{data::guild::GuildConfigRepository, error::AppError, state::AppState};

/// Discord shows at most 25 autocomplete suggestions.
const MAX_SUGGESTIONS: usize = 25;

pub fn register() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("colorrole")
            .description("Manage color roles (Admin only)")
            .default_member_permissions(Permissions::ADMINISTRATOR)
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "add",
                    "Add a color role to the guild's color list",
                )
                .add_sub_option(
                    CreateCommandOption::new(CommandOptionType::Role, "role", "The color role")
                        .required(true),
                )
                .add_sub_option(CreateCommandOption::new(
                    CommandOptionType::String,
                    "name",
                    "Display name, defaults to the role name",
                )),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "remove",
                    "Remove a color role from the guild's color list",
                )
                .add_sub_option(
                    CreateCommandOption::new(CommandOptionType::Role, "role", "The color role")
                        .required(true),
                ),
            ),
        CreateCommand::new("color")
            .description("Manage your color role")
            .add_option(CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "list",
                "List all available color roles",
            ))
            .add_option(
                CreateCommandOption::new(CommandOptionType::SubCommand, "set", "Get a color role")
                    .add_sub_option(
                        CreateCommandOption::new(
                            CommandOptionType::String,
                            "name",
                            "The color you want",
                        )
                        .required(true)
                        .set_autocomplete(true),
                    ),
            )
            .add_option(CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "clear",
                "Remove your current color role",
            )),
    ]
}

/// Colour roles whose name contains `current`, ignoring case.
pub fn matching_colours(roles: &[(u64, String)], current: &str) -> Vec<(u64, String)> {
    let current = current.to_lowercase();
    roles
        .iter()
        .filter(|(_, name)| name.to_lowercase().contains(&current))
        .take(MAX_SUGGESTIONS)
        .cloned()
        .collect()
}

/// Name a colour role is listed under: the given name, or the role's own name when blank.
fn display_name<'a>(role: &'a Role, name: Option<&'a str>) -> &'a str {
    name.map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(role.name.as_str())
}

pub async fn colour_role(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = guild_id(command)?;
    let (subcommand, options) = Options::new(command.data.options()).subcommand()?;
    let repo = GuildConfigRepository::new(&state.db);
    let role = options.role("role")?;
    let mention = Mention::Role(role.id);

    let message = match subcommand {
        "add" => {
            let name = display_name(role, options.optional_string("name"));
            repo.add_colour_role(guild_id, role.id.get(), name).await?;
            format!("Successfully added {} as a colour role!", mention)
        }
        "remove" => {
            if !repo.remove_colour_role(guild_id, role.id.get()).await? {
                return Err(AppError::BadRequest(format!("{} is not a color role!", mention)));
            }
            format!("Successfully removed {} from color roles!", mention)
        }
        other => return Err(AppError::BadRequest(format!("Unknown subcommand `{}`.", other))),
    };

    reply(ctx, command, ephemeral(message)).await
}

pub async fn colour(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = guild_id(command)?;
    let (subcommand, options) = Options::new(command.data.options()).subcommand()?;
    let repo = GuildConfigRepository::new(&state.db);
    let roles = repo.get_colour_roles(guild_id).await?;

    match subcommand {
        "list" => {
            if roles.is_empty() {
                return reply(ctx, command, ephemeral("No color roles have been set up yet!")).await;
            }
            let description = roles
                .iter()
                .map(|(id, name)| format!("{} - {}", name, Mention::Role(RoleId::new(*id))))
                .collect::<Vec<_>>()
                .join("\n");
            let embed = CreateEmbed::new()
                .title("Available Color Roles:")
                .description(description)
                .colour(Colour::BLURPLE);
            reply(ctx, command, embed_message(embed)).await
        }
        "set" => {
            let wanted = options.string("name")?;
            let role_id = match wanted.trim().parse::<u64>() {
                Ok(id) if roles.iter().any(|(role, _)| *role == id) => Some(id),
                _ => repo.find_colour_role(guild_id, wanted).await?,
            }
            .ok_or_else(|| AppError::BadRequest("That color role doesn't exist!".to_string()))?;

            let removed = remove_colours(ctx, command, guild_id, &roles, Some(role_id)).await?;
            ctx.http
                .add_member_role(
                    GuildId::new(guild_id),
                    command.user.id,
                    RoleId::new(role_id),
                    Some("Color role selected"),
                )
                .await?;
            tracing::debug!(
                "User {} switched color in guild {} ({} removed)",
                command.user.id,
                guild_id,
                removed.len()
            );

            reply(
                ctx,
                command,
                ephemeral(format!(
                    "You now have the {} color!",
                    Mention::Role(RoleId::new(role_id))
                )),
            )
            .await
        }
        "clear" => {
            let removed = remove_colours(ctx, command, guild_id, &roles, None).await?;
            let message = if removed.is_empty() {
                "You don't have any color roles to remove!".to_string()
            } else {
                format!("Removed color roles: {}", removed.join(", "))
            };
            reply(ctx, command, ephemeral(message)).await
        }
        other => Err(AppError::BadRequest(format!("Unknown subcommand `{}`.", other))),
    }
}

/// Removes every colour role the invoker holds, except `keep`.
///
/// # Returns
/// - `Ok(Vec<String>)` - Names of the removed roles
async fn remove_colours(
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: u64,
    roles: &[(u64, String)],
    keep: Option<u64>,
) -> Result<Vec<String>, AppError> {
    let held: Vec<RoleId> = command
        .member
        .as_ref()
        .map(|member| member.roles.clone())
        .unwrap_or_default();
    let mut removed = Vec::new();

    for (role_id, name) in roles {
        if Some(*role_id) == keep || !held.contains(&RoleId::new(*role_id)) {
            continue;
        }
        ctx.http
            .remove_member_role(
                GuildId::new(guild_id),
                command.user.id,
                RoleId::new(*role_id),
                Some("Color role changed"),
            )
            .await?;
        removed.push(name.clone());
    }

    Ok(removed)
}

/// Suggests colour roles while the member types.
pub async fn autocomplete(
    ctx: &Context,
    state: &AppState,
    interaction: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = guild_id(interaction)?;
    let current = interaction
        .data
        .autocomplete()
        .map(|option| option.value.to_string())
        .unwrap_or_default();

    let roles = GuildConfigRepository::new(&state.db)
        .get_colour_roles(guild_id)
        .await?;
    let response = matching_colours(&roles, &current).into_iter().fold(
        CreateAutocompleteResponse::new(),
        |response, (id, name)| response.add_string_choice(name, id.to_string()),
    );

    interaction
        .create_response(&ctx.http, CreateInteractionResponse::Autocomplete(response))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests autocomplete filtering.
    ///
    /// Expected: case-insensitive substring matches, capped at 25
    #[test]
    fn filters_suggestions() {
        let roles = vec![
            (1, "Crimson".to_string()),
            (2, "Sky Blue".to_string()),
            (3, "Navy Blue".to_string()),
        ];

        let found = matching_colours(&roles, "BLUE");
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|(id, _)| *id != 1));
        assert_eq!(matching_colours(&roles, "").len(), 3);

        let many: Vec<(u64, String)> = (0..40).map(|i| (i, format!("Colour {}", i))).collect();
        assert_eq!(matching_colours(&many, "colour").len(), 25);
    }

    /// Tests the listed name of a colour role.
    ///
    /// Expected: a given name wins, blank or missing falls back to the role name
    #[test]
    fn names_colour_roles() {
        let role = test_utils::serenity::create_test_role(10, "Crimson", 0xDC143C, 3);

        assert_eq!(display_name(&role, Some(" Blood Red ")), "Blood Red");
        assert_eq!(display_name(&role, Some("  ")), "Crimson");
        assert_eq!(display_name(&role, None), "Crimson");
    }
}
