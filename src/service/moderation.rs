//! Warnings and administrative record overrides.

use chrono::{DateTime, Duration, Utc};
use serenity::all::User;

use crate::{
    data::{store::Database, user::UserRepository},
    error::AppError,
    model::{
        field::UserField,
        user::{UserRecord, Warning},
    },
    util::time::{format_timestamp, parse_timestamp},
};

/// Age after which a warning is removed by the expiry job.
pub const WARNING_TTL_DAYS: i64 = 30;

/// Outcome of one warning expiry pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningExpiryReport {
    /// Warnings removed across all users.
    pub removed: usize,
    /// Users who lost at least one warning.
    pub users: usize,
}

/// Rejects bot accounts as targets of moderation and shop actions.
pub fn ensure_not_bot(user: &User) -> Result<(), AppError> {
    if user.bot {
        return Err(AppError::BadRequest("Bots don't have records.".to_string()));
    }
    Ok(())
}

/// Whether a warning is still within its lifetime.
///
/// Warnings with an unreadable timestamp are kept.
fn is_current(warning: &Warning, threshold: DateTime<Utc>) -> bool {
    match parse_timestamp(&warning.timestamp) {
        Some(issued) => issued > threshold,
        None => true,
    }
}

pub struct ModerationService<'a> {
    db: &'a Database,
}

impl<'a> ModerationService<'a> {
    /// Creates a new ModerationService instance.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Issues a warning.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of warnings the member now has
    pub async fn warn(
        &self,
        guild_id: u64,
        user_id: u64,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<usize, AppError> {
        let count = UserRepository::new(self.db)
            .add_warning(
                guild_id,
                user_id,
                Warning {
                    timestamp: format_timestamp(now),
                    reason: reason.to_string(),
                },
            )
            .await?;

        tracing::info!(
            "User {} in guild {} warned ({} total): {}",
            user_id,
            guild_id,
            count,
            reason
        );

        Ok(count)
    }

    pub async fn warnings(&self, guild_id: u64, user_id: u64) -> Result<Vec<Warning>, AppError> {
        UserRepository::new(self.db)
            .get_warnings(guild_id, user_id)
            .await
    }

    /// Full record for the administrative data view.
    pub async fn user_data(&self, guild_id: u64, user_id: u64) -> Result<UserRecord, AppError> {
        UserRepository::new(self.db).get(guild_id, user_id).await
    }

    /// Parses and applies an administrative field override.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `user_id` - Discord user ID
    /// - `field` - Field name
    /// - `value` - Raw value text
    ///
    /// # Returns
    /// - `Ok(UserField)` - The applied typed value
    /// - `Err(AppError::BadRequest)` - Unknown field or invalid value; nothing written
    pub async fn set_user_data(
        &self,
        guild_id: u64,
        user_id: u64,
        field: &str,
        value: &str,
    ) -> Result<UserField, AppError> {
        let field = UserField::parse(field, value)?;

        UserRepository::new(self.db)
            .set_field(guild_id, user_id, field.clone())
            .await?;
        tracing::info!(
            "Set {} for user {} in guild {} to {:?}",
            field.name(),
            user_id,
            guild_id,
            field
        );

        Ok(field)
    }

    /// Removes warnings older than `WARNING_TTL_DAYS` across every guild.
    ///
    /// The store is written once, and only if something was removed.
    ///
    /// # Arguments
    /// - `now` - Current time
    ///
    /// # Returns
    /// - `Ok(WarningExpiryReport)` - Counts of removed warnings and affected users
    /// - `Err(AppError::StoreErr)` - Failed to persist the pruned store
    pub async fn expire_warnings(
        &self,
        now: DateTime<Utc>,
    ) -> Result<WarningExpiryReport, AppError> {
        let threshold = now - Duration::days(WARNING_TTL_DAYS);
        let mut removed = 0;

        let users = self
            .db
            .update_users(|_, _, user| {
                let before = user.warnings.len();
                user.warnings.retain(|w| is_current(w, threshold));
                let dropped = before - user.warnings.len();
                removed += dropped;
                dropped > 0
            })
            .await?;

        Ok(WarningExpiryReport { removed, users })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{
        builder::TestBuilder,
        factory::{guild::GuildDocFactory, user::UserDocFactory},
        serenity::create_test_user,
    };

    /// Tests the 30 day warning lifetime.
    ///
    /// Verifies that a 31 day old warning is removed, a 29 day old one is kept, and a
    /// warning with an unreadable timestamp survives.
    ///
    /// Expected: Ok with one warning removed from one user
    #[tokio::test]
    async fn expires_old_warnings() -> Result<(), AppError> {
        let now = Utc::now();
        let test = TestBuilder::new()
            .with_guild(
                1000,
                GuildDocFactory::new()
                    .user(
                        42,
                        UserDocFactory::new()
                            .warning(&format_timestamp(now - Duration::days(31)), "old")
                            .warning(&format_timestamp(now - Duration::days(29)), "recent")
                            .warning("sometime", "unreadable")
                            .build(),
                    )
                    .user(43, UserDocFactory::new().build())
                    .build(),
            )
            .build()
            .await
            .unwrap();
        let db = Database::open(&test.db_path).await?;
        let service = ModerationService::new(&db);

        let report = service.expire_warnings(now).await?;

        assert_eq!(report, WarningExpiryReport { removed: 1, users: 1 });
        let reasons: Vec<String> = service
            .warnings(1000, 42)
            .await?
            .into_iter()
            .map(|w| w.reason)
            .collect();
        assert_eq!(reasons, vec!["recent", "unreadable"]);

        Ok(())
    }

    /// Tests issuing a warning.
    ///
    /// Expected: Ok with the count and the reason stored with the issue time
    #[tokio::test]
    async fn warn_appends_with_timestamp() -> Result<(), AppError> {
        let test = TestBuilder::new().without_document().build().await.unwrap();
        let db = Database::open(&test.db_path).await?;
        let service = ModerationService::new(&db);
        let now = Utc::now();

        assert_eq!(service.warn(1000, 42, "spam", now).await?, 1);

        let warnings = service.warnings(1000, 42).await?;
        assert_eq!(warnings[0].reason, "spam");
        assert_eq!(parse_timestamp(&warnings[0].timestamp), Some(now));

        Ok(())
    }

    /// Tests that an invalid override leaves the record untouched.
    ///
    /// Expected: BadRequest and gold unchanged
    #[tokio::test]
    async fn invalid_override_writes_nothing() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_guild(
                1000,
                GuildDocFactory::new()
                    .user(42, UserDocFactory::new().gold(40).build())
                    .build(),
            )
            .build()
            .await
            .unwrap();
        let db = Database::open(&test.db_path).await?;
        let service = ModerationService::new(&db);

        let result = service.set_user_data(1000, 42, "gold", "1e9").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(service.user_data(1000, 42).await?.gold, 40);

        Ok(())
    }

    /// Tests rejecting bot accounts.
    ///
    /// Expected: BadRequest for a bot, Ok for a member
    #[test]
    fn rejects_bots() {
        assert!(ensure_not_bot(&create_test_user(1, "Disboard", true)).is_err());
        assert!(ensure_not_bot(&create_test_user(2, "member", false)).is_ok());
    }
}
