mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use std::sync::Arc;

use crate::{config::Config, error::AppError, state::AppState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    startup::init_tracing(&config.log_level);

    let db = Arc::new(startup::open_database(&config).await?);
    let state = AppState::new(db.clone(), config.dev_guild_id);

    let (client, http) = bot::start::init_bot(&config, state.clone()).await?;

    // Waits for the ready event before scheduling anything
    tokio::spawn(async move {
        if let Err(e) = scheduler::start_scheduler(state, http).await {
            tracing::error!("Scheduler error: {}", e);
        }
    });

    let result = bot::start::start_bot(client).await;

    if let Err(e) = db.flush().await {
        tracing::error!("Failed to flush store on shutdown: {}", e);
    }

    result
}
