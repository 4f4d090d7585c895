//! User record repository.
//!
//! Field-level accessors for the economy ledger, activity tracking, timed effects and
//! warnings of a member. Every mutating method is a single store write.

use chrono::{DateTime, Utc};

use crate::{
    data::store::Database,
    error::AppError,
    model::{
        effect::EffectKind,
        field::UserField,
        game::GameKind,
        user::{UserRecord, Warning},
    },
    util::time::format_timestamp,
};

/// Repository providing access to user records.
pub struct UserRepository<'a> {
    db: &'a Database,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the store
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Gets the full user record, creating it if absent.
    pub async fn get(&self, guild_id: u64, user_id: u64) -> Result<UserRecord, AppError> {
        self.db.get_user(guild_id, user_id).await
    }

    pub async fn get_gold(&self, guild_id: u64, user_id: u64) -> Result<i64, AppError> {
        Ok(self.get(guild_id, user_id).await?.gold)
    }

    pub async fn set_gold(&self, guild_id: u64, user_id: u64, gold: i64) -> Result<(), AppError> {
        self.db
            .update_user(guild_id, user_id, |user| user.gold = gold)
            .await
    }

    /// Credits gold.
    ///
    /// # Returns
    /// - `Ok(i64)` - Balance after the credit
    pub async fn add_gold(
        &self,
        guild_id: u64,
        user_id: u64,
        amount: i64,
    ) -> Result<i64, AppError> {
        self.db
            .update_user(guild_id, user_id, |user| {
                user.gold += amount;
                user.gold
            })
            .await
    }

    /// Debits gold without a balance check; the balance may go negative.
    ///
    /// # Returns
    /// - `Ok(i64)` - Balance after the debit
    pub async fn remove_gold(
        &self,
        guild_id: u64,
        user_id: u64,
        amount: i64,
    ) -> Result<i64, AppError> {
        self.add_gold(guild_id, user_id, -amount).await
    }

    /// Applies the final outcome of a game in one write.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `user_id` - Discord user ID
    /// - `game` - Game whose counters are updated
    /// - `gold_delta` - Signed gold change, zero for a push
    /// - `won` - Whether the win or the loss counter is incremented
    ///
    /// # Returns
    /// - `Ok(UserRecord)` - Record after settlement
    pub async fn settle_game(
        &self,
        guild_id: u64,
        user_id: u64,
        game: GameKind,
        gold_delta: i64,
        won: bool,
    ) -> Result<UserRecord, AppError> {
        self.db
            .update_user(guild_id, user_id, |user| {
                user.gold += gold_delta;
                user.record_outcome(game, won);
                user.clone()
            })
            .await
    }

    /// Increments the message count.
    ///
    /// # Returns
    /// - `Ok(UserRecord)` - Record after the increment
    pub async fn increment_message_count(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<UserRecord, AppError> {
        self.db
            .update_user(guild_id, user_id, |user| {
                user.message_count += 1;
                user.clone()
            })
            .await
    }

    pub async fn get_tier(&self, guild_id: u64, user_id: u64) -> Result<u8, AppError> {
        Ok(self.get(guild_id, user_id).await?.tier)
    }

    pub async fn set_tier(&self, guild_id: u64, user_id: u64, tier: u8) -> Result<(), AppError> {
        self.db
            .update_user(guild_id, user_id, |user| user.tier = tier)
            .await
    }

    pub async fn get_streak(&self, guild_id: u64, user_id: u64) -> Result<u64, AppError> {
        Ok(self.get(guild_id, user_id).await?.streak)
    }

    pub async fn set_streak(
        &self,
        guild_id: u64,
        user_id: u64,
        streak: u64,
    ) -> Result<(), AppError> {
        self.db
            .update_user(guild_id, user_id, |user| user.streak = streak)
            .await
    }

    pub async fn get_last_daily_claim(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<String>, AppError> {
        Ok(self.get(guild_id, user_id).await?.last_daily_claim)
    }

    pub async fn set_last_daily_claim(
        &self,
        guild_id: u64,
        user_id: u64,
        at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.db
            .update_user(guild_id, user_id, |user| {
                user.last_daily_claim = Some(format_timestamp(at));
            })
            .await
    }

    /// Gets the stored expiry of a timed effect, unparsed.
    pub async fn get_effect_expiry(
        &self,
        guild_id: u64,
        user_id: u64,
        kind: EffectKind,
    ) -> Result<Option<String>, AppError> {
        Ok(self
            .get(guild_id, user_id)
            .await?
            .effect_expiry(kind)
            .cloned())
    }

    /// Sets or clears the expiry of a timed effect.
    pub async fn set_effect_expiry(
        &self,
        guild_id: u64,
        user_id: u64,
        kind: EffectKind,
        expiry: Option<DateTime<Utc>>,
    ) -> Result<(), AppError> {
        self.db
            .update_user(guild_id, user_id, |user| {
                *user.effect_expiry_mut(kind) = expiry.map(format_timestamp);
            })
            .await
    }

    pub async fn get_warnings(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Vec<Warning>, AppError> {
        Ok(self.get(guild_id, user_id).await?.warnings)
    }

    /// Appends a warning.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of warnings after appending
    pub async fn add_warning(
        &self,
        guild_id: u64,
        user_id: u64,
        warning: Warning,
    ) -> Result<usize, AppError> {
        self.db
            .update_user(guild_id, user_id, |user| {
                user.warnings.push(warning);
                user.warnings.len()
            })
            .await
    }

    /// Applies a typed administrative override.
    pub async fn set_field(
        &self,
        guild_id: u64,
        user_id: u64,
        field: UserField,
    ) -> Result<(), AppError> {
        self.db
            .update_user(guild_id, user_id, |user| field.apply(user))
            .await
    }
}
