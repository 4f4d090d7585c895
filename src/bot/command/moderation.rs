//! Administrative warning and user data commands.

use chrono::Utc;
use serenity::all::{
    Colour, CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, Mention, Permissions,
};

use super::{embed_message, ephemeral, guild_id, reply, Options};
use crate::{
    error::AppError,
    model::field::UserField,
    service::moderation::{ensure_not_bot, ModerationService},
    state::AppState,
    util::time::{parse_timestamp, DISPLAY_FORMAT},
};

fn admin(name: &str, description: &str) -> CreateCommand {
    CreateCommand::new(name)
        .description(description)
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .add_option(
            CreateCommandOption::new(CommandOptionType::User, "user", "The member").required(true),
        )
}

pub fn register() -> Vec<CreateCommand> {
    let field = UserField::NAMES.iter().fold(
        CreateCommandOption::new(CommandOptionType::String, "field", "The field to set")
            .required(true),
        |option, name| option.add_string_choice(*name, *name),
    );

    vec![
        admin("warn", "Warn a member").add_option(
            CreateCommandOption::new(CommandOptionType::String, "reason", "Why they are warned")
                .required(true),
        ),
        admin("warnings", "List a member's warnings"),
        admin("get_user_data", "Show a member's stored data"),
        admin("set_user_data", "Override one of a member's stored fields")
            .add_option(field)
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "value",
                    "New value; `none` clears a timestamp",
                )
                .required(true),
            ),
    ]
}

/// Formats a stored warning timestamp for display, falling back to the raw text.
pub fn display_timestamp(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|at| at.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub async fn warn(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = guild_id(command)?;
    let options = Options::new(command.data.options());
    let user = options.user("user")?;
    let reason = options.string("reason")?;
    ensure_not_bot(user)?;

    let count = ModerationService::new(&state.db)
        .warn(guild_id, user.id.get(), reason, Utc::now())
        .await?;

    let embed = CreateEmbed::new()
        .title("Member Warned")
        .description(format!(
            "{} has been warned by {}.",
            Mention::User(user.id),
            Mention::User(command.user.id)
        ))
        .field("Reason", reason, false)
        .field("Active warnings", count.to_string(), true)
        .colour(Colour::RED);

    reply(ctx, command, embed_message(embed)).await
}

pub async fn warnings(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = guild_id(command)?;
    let user = Options::new(command.data.options()).user("user")?;
    ensure_not_bot(user)?;

    let warnings = ModerationService::new(&state.db)
        .warnings(guild_id, user.id.get())
        .await?;
    if warnings.is_empty() {
        return reply(
            ctx,
            command,
            ephemeral(format!("{} has no warnings.", Mention::User(user.id))),
        )
        .await;
    }

    let embed = warnings.iter().enumerate().fold(
        CreateEmbed::new()
            .title(format!("Warnings for {}", user.name))
            .colour(Colour::ORANGE),
        |embed, (i, warning)| {
            embed.field(
                format!("#{} - {}", i + 1, display_timestamp(&warning.timestamp)),
                warning.reason.clone(),
                false,
            )
        },
    );

    reply(ctx, command, embed_message(embed).ephemeral(true)).await
}

pub async fn get_user_data(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = guild_id(command)?;
    let user = Options::new(command.data.options()).user("user")?;
    ensure_not_bot(user)?;

    let record = ModerationService::new(&state.db)
        .user_data(guild_id, user.id.get())
        .await?;
    let json = serde_json::to_string_pretty(&record).map_err(|e| {
        tracing::error!("Failed to render user data: {}", e);
        AppError::BadRequest("Could not render that user's data.".to_string())
    })?;

    let embed = CreateEmbed::new()
        .title(format!("Data for {}", user.name))
        .description(format!("```json\n{}\n```", json))
        .colour(Colour::DARK_TEAL);

    reply(ctx, command, embed_message(embed).ephemeral(true)).await
}

pub async fn set_user_data(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = guild_id(command)?;
    let options = Options::new(command.data.options());
    let user = options.user("user")?;
    let field = options.string("field")?;
    let value = options.string("value")?;
    ensure_not_bot(user)?;

    let applied = ModerationService::new(&state.db)
        .set_user_data(guild_id, user.id.get(), field, value)
        .await?;

    reply(
        ctx,
        command,
        ephemeral(format!(
            "Set `{}` for {} to `{}`.",
            applied.name(),
            Mention::User(user.id),
            value.trim()
        )),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests warning timestamp display.
    ///
    /// Expected: stored RFC 3339 shown in the display format, unreadable text kept
    #[test]
    fn formats_warning_timestamps() {
        assert_eq!(
            display_timestamp("2024-03-01T12:30:05+00:00"),
            "2024-03-01 12:30:05"
        );
        assert_eq!(display_timestamp("yesterday"), "yesterday");
    }
}
