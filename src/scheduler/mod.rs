//! Cron jobs started once the gateway is ready.
//!
//! - `effect_sweep` - every minute, reverts expired mimics and barrels and prunes idle
//!   game state
//! - `warning_expiry` - daily at midnight UTC, removes warnings older than 30 days

pub mod effect_sweep;
pub mod warning_expiry;

use serenity::http::Http;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::AppError, state::AppState};

/// Waits for the ready signal, then starts both jobs.
///
/// # Arguments
/// - `state`: Shared application state; its `ready` notifier gates the start
/// - `http`: Discord HTTP client for reverting effects and posting log messages
pub async fn start_scheduler(state: AppState, http: Arc<Http>) -> Result<(), AppError> {
    state.ready.notified().await;

    let scheduler = JobScheduler::new().await?;

    let sweep_state = state.clone();
    let sweep_http = http.clone();
    let sweep = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let state = sweep_state.clone();
        let http = sweep_http.clone();

        Box::pin(async move {
            effect_sweep::run(&state, http).await;
        })
    })?;

    let expiry_state = state.clone();
    let expiry = Job::new_async("0 0 0 * * *", move |_uuid, _lock| {
        let state = expiry_state.clone();

        Box::pin(async move {
            if let Err(e) = warning_expiry::run(&state.db).await {
                tracing::error!("Error expiring warnings: {}", e);
            }
        })
    })?;

    scheduler.add(sweep).await?;
    scheduler.add(expiry).await?;
    scheduler.start().await?;

    tracing::info!("Scheduler started");

    Ok(())
}
