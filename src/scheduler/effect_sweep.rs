use chrono::Utc;
use serenity::http::Http;
use std::sync::Arc;

use crate::{
    service::effect::{discord::DiscordEffectActions, TimedEffectService},
    state::AppState,
};

/// Reverts expired effects and drops idle game sessions and cooldown entries.
pub async fn run(state: &AppState, http: Arc<Http>) {
    let actions = DiscordEffectActions::new(state.db.clone(), http);
    let report = TimedEffectService::new(&state.db)
        .sweep(&actions, Utc::now())
        .await;

    if report.reverted > 0 || report.failed > 0 || report.malformed > 0 {
        tracing::info!(
            "Effect sweep: {} reverted, {} failed, {} malformed",
            report.reverted,
            report.failed,
            report.malformed
        );
    }

    let expired = state.blackjack.purge_expired().await + state.slots.purge_expired().await;
    if expired > 0 {
        tracing::debug!("Dropped {} idle game sessions", expired);
    }
    state.cooldown.prune();
}
