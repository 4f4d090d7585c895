//! Ready event handler for bot initialization.
//!
//! The ready event fires once per gateway connection. It registers the slash commands and
//! wakes the scheduler, which waits for a live connection before posting anything.

use serenity::all::{ActivityData, Command, Context, GuildId, Ready};

use crate::{bot::command, state::AppState};

/// Handles the ready event when the bot connects to Discord.
///
/// Commands are registered on the development guild when one is configured, since guild
/// commands update immediately while global ones can take up to an hour.
///
/// # Arguments
/// - `state` - Shared application state
/// - `ctx` - Discord context for registering commands and setting activity status
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(state: &AppState, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    ctx.set_activity(Some(ActivityData::custom("Pouring drinks in the Cavern")));

    let commands = command::all();
    let registered = match state.dev_guild_id {
        Some(guild_id) => GuildId::new(guild_id).set_commands(&ctx.http, commands).await,
        None => Command::set_global_commands(&ctx.http, commands).await,
    };

    match registered {
        Ok(commands) => tracing::info!(
            "Registered {} commands ({})",
            commands.len(),
            state
                .dev_guild_id
                .map_or_else(|| "global".to_string(), |id| format!("guild {}", id))
        ),
        Err(e) => tracing::error!("Failed to register commands: {:?}", e),
    }

    state.ready.notify_one();
}
