use serenity::all::{Context, UnavailableGuild};

use crate::state::AppState;

/// Handles the bot leaving a guild or the guild going offline.
///
/// An outage keeps the guild's timers; removal cancels its pending bump reminder.
pub async fn handle_guild_delete(state: &AppState, _ctx: Context, incomplete: UnavailableGuild) {
    if incomplete.unavailable {
        tracing::warn!("Guild {} became unavailable", incomplete.id);
        return;
    }

    let guild_id = incomplete.id.get();
    if state.bump_reminders.cancel(guild_id).await {
        tracing::info!("Cancelled bump reminder for removed guild {}", guild_id);
    }
    tracing::info!("Removed from guild {}", guild_id);
}
