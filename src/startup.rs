use tracing_subscriber::EnvFilter;

use crate::{config::Config, data::store::Database, error::AppError};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence when set; otherwise `level` applies to this crate and
/// dependencies are limited to warnings.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,cavern={}", level)));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Opens the JSON store and migrates every record to the current schema.
///
/// Missing fields are backfilled and the result is written back before the bot connects,
/// so every handler sees complete records.
///
/// # Arguments
/// - `config` - Application configuration containing the database path
///
/// # Returns
/// - `Ok(Database)` - Loaded and migrated store
/// - `Err(AppError::StoreErr)` - File unreadable, malformed, or not writable
pub async fn open_database(config: &Config) -> Result<Database, AppError> {
    let db = Database::open(&config.database_path).await?;

    let users = db.migrate().await?;
    tracing::info!(
        "Loaded {} with {} user records",
        config.database_path.display(),
        users
    );

    Ok(db)
}
