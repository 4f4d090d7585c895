//! Shop purchases of timed effects.
//!
//! A purchase is split around the Discord call that applies it: `check_*` validates the
//! target, the active state and the buyer's balance before anything happens, and
//! `complete_*` records the effect and takes the gold once Discord accepted the change.

use chrono::{DateTime, Duration, Utc};
use serenity::all::User;

use crate::{
    data::{store::Database, user::UserRepository},
    error::AppError,
    model::effect::{EffectKind, MimicDuration, BARREL_MINUTES, BARREL_PRICE},
    service::{effect::TimedEffectService, moderation::ensure_not_bot},
};

/// Longest nickname Discord accepts.
pub const MAX_NICKNAME_LEN: usize = 32;

/// Rounds a remaining duration up to whole units of `unit`, at least one.
fn ceil_units(remaining: Duration, unit: Duration) -> i64 {
    let unit_secs = unit.num_seconds().max(1);
    let secs = remaining.num_seconds().max(0);
    ((secs + unit_secs - 1) / unit_secs).max(1)
}

/// Rejects purchases aimed at the buyer themselves or at a bot.
pub fn validate_target(buyer: &User, target: &User) -> Result<(), AppError> {
    if buyer.id == target.id {
        return Err(AppError::BadRequest(
            "You can't use this on yourself!".to_string(),
        ));
    }
    ensure_not_bot(target)
        .map_err(|_| AppError::BadRequest("You can't use this on a bot!".to_string()))
}

/// Validates a requested nickname.
pub fn validate_nickname(nickname: &str) -> Result<String, AppError> {
    let nickname = nickname.trim();
    if nickname.is_empty() {
        return Err(AppError::BadRequest("The nickname can't be empty.".to_string()));
    }
    if nickname.chars().count() > MAX_NICKNAME_LEN {
        return Err(AppError::BadRequest(format!(
            "Nicknames can be at most {} characters.",
            MAX_NICKNAME_LEN
        )));
    }
    Ok(nickname.to_string())
}

pub struct ShopService<'a> {
    db: &'a Database,
}

impl<'a> ShopService<'a> {
    /// Creates a new ShopService instance.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    async fn ensure_funds(&self, guild_id: u64, buyer_id: u64, price: i64) -> Result<(), AppError> {
        let gold = UserRepository::new(self.db).get_gold(guild_id, buyer_id).await?;
        if gold < price {
            return Err(AppError::BadRequest(format!(
                "You need {} gold for this, but you only have {}.",
                price, gold
            )));
        }
        Ok(())
    }

    /// Checks that a mimic can be bought.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `buyer_id` - Member paying for the effect
    /// - `target_id` - Member receiving the effect
    /// - `duration` - Purchased duration, determines the price
    /// - `now` - Current time
    ///
    /// # Returns
    /// - `Ok(())` - Purchase may proceed
    /// - `Err(AppError::BadRequest)` - Target already cursed (with hours remaining) or the
    ///   buyer cannot afford it
    pub async fn check_mimic(
        &self,
        guild_id: u64,
        buyer_id: u64,
        target_id: u64,
        duration: MimicDuration,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if let Some(remaining) = TimedEffectService::new(self.db)
            .remaining(guild_id, target_id, EffectKind::Mimic, now)
            .await?
        {
            return Err(AppError::BadRequest(format!(
                "That user is already under a mimic's curse for another {} hour(s)!",
                ceil_units(remaining, Duration::hours(1))
            )));
        }

        self.ensure_funds(guild_id, buyer_id, duration.price()).await
    }

    /// Records a mimic once the nickname was changed.
    ///
    /// The buyer's balance is checked again because gold may have been spent while the
    /// nickname form was open.
    ///
    /// # Returns
    /// - `Ok(DateTime<Utc>)` - Expiry of the curse
    /// - `Err(AppError::BadRequest)` - Buyer can no longer afford it; nothing written
    pub async fn complete_mimic(
        &self,
        guild_id: u64,
        buyer_id: u64,
        target_id: u64,
        duration: MimicDuration,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, AppError> {
        self.ensure_funds(guild_id, buyer_id, duration.price()).await?;

        UserRepository::new(self.db)
            .remove_gold(guild_id, buyer_id, duration.price())
            .await?;
        TimedEffectService::new(self.db)
            .activate(guild_id, target_id, EffectKind::Mimic, duration.duration(), now)
            .await
    }

    /// Checks that a barrel can be bought.
    ///
    /// # Returns
    /// - `Ok(())` - Purchase may proceed
    /// - `Err(AppError::BadRequest)` - Target already in a barrel (with minutes remaining)
    ///   or the buyer cannot afford it
    pub async fn check_barrel(
        &self,
        guild_id: u64,
        buyer_id: u64,
        target_id: u64,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if let Some(remaining) = TimedEffectService::new(self.db)
            .remaining(guild_id, target_id, EffectKind::Barrel, now)
            .await?
        {
            return Err(AppError::BadRequest(format!(
                "That user is already in a barrel for another {} minute(s)!",
                ceil_units(remaining, Duration::minutes(1))
            )));
        }

        self.ensure_funds(guild_id, buyer_id, BARREL_PRICE).await
    }

    /// Records a barrel and charges the buyer.
    ///
    /// # Returns
    /// - `Ok(DateTime<Utc>)` - When the barrel ends
    pub async fn complete_barrel(
        &self,
        guild_id: u64,
        buyer_id: u64,
        target_id: u64,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, AppError> {
        let expiry = TimedEffectService::new(self.db)
            .activate(
                guild_id,
                target_id,
                EffectKind::Barrel,
                Duration::minutes(BARREL_MINUTES),
                now,
            )
            .await?;
        UserRepository::new(self.db)
            .remove_gold(guild_id, buyer_id, BARREL_PRICE)
            .await?;

        Ok(expiry)
    }
}
