//! Activity tiers earned by message count.

use crate::{
    data::{store::Database, user::UserRepository},
    error::AppError,
    model::user::UserRecord,
};

/// Messages needed to move from tier 1 to tier 2.
pub const TIER_2_MESSAGES: u64 = 100;

/// Messages needed to move from tier 2 to tier 3.
pub const TIER_3_MESSAGES: u64 = 1000;

/// Tier a member should be promoted to, if any.
///
/// Promotion moves one step at a time: a tier 1 member past the tier 3 threshold is
/// promoted to tier 2 on this message and to tier 3 on the next.
pub fn promotion_for(user: &UserRecord) -> Option<u8> {
    match user.tier {
        1 if user.message_count >= TIER_2_MESSAGES => Some(2),
        2 if user.message_count >= TIER_3_MESSAGES => Some(3),
        _ => None,
    }
}

pub struct TierService<'a> {
    db: &'a Database,
}

impl<'a> TierService<'a> {
    /// Creates a new TierService instance.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Counts one message and promotes the member if a threshold was reached.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `user_id` - Discord user ID of the author
    ///
    /// # Returns
    /// - `Ok(Some(tier))` - Member was promoted to `tier`
    /// - `Ok(None)` - Message counted, no promotion
    /// - `Err(AppError::StoreErr)` - Failed to persist the count
    pub async fn record_message(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<u8>, AppError> {
        let repo = UserRepository::new(self.db);
        let user = repo.increment_message_count(guild_id, user_id).await?;

        let Some(tier) = promotion_for(&user) else {
            return Ok(None);
        };

        repo.set_tier(guild_id, user_id, tier).await?;
        tracing::info!(
            "User {} in guild {} promoted to tier {} at {} messages",
            user_id,
            guild_id,
            tier,
            user.message_count
        );

        Ok(Some(tier))
    }
}
