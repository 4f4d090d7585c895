use chrono::Utc;

use crate::{data::store::Database, error::AppError, service::moderation::ModerationService};

/// Removes warnings past their 30 day lifetime.
pub async fn run(db: &Database) -> Result<(), AppError> {
    let report = ModerationService::new(db).expire_warnings(Utc::now()).await?;

    tracing::info!(
        "Warning expiry: removed {} warnings from {} users",
        report.removed,
        report.users
    );

    Ok(())
}
