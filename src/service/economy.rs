//! Economy ledger: balances, daily rewards and leaderboards.

use chrono::{DateTime, Days, Utc};

use crate::{
    data::{store::Database, user::UserRepository},
    error::AppError,
    model::{
        game::{Leaderboard, LeaderboardCategory, LeaderboardEntry},
        user::UserRecord,
    },
    util::time::{format_timestamp, parse_timestamp},
};

/// Daily reward at streak zero.
pub const DAILY_BASE_REWARD: i64 = 100;

/// Extra gold per streak day.
pub const DAILY_STREAK_BONUS: i64 = 10;

/// Streak at which the reward stops growing.
pub const DAILY_STREAK_CAP: u64 = 5;

/// Reward paid once the streak cap is reached.
pub const DAILY_MAX_REWARD: i64 = 150;

/// Entries shown on a leaderboard.
pub const LEADERBOARD_SIZE: usize = 10;

/// Gold paid by a daily claim at the given streak.
pub fn daily_reward(streak: u64) -> i64 {
    if streak >= DAILY_STREAK_CAP {
        DAILY_MAX_REWARD
    } else {
        DAILY_BASE_REWARD + DAILY_STREAK_BONUS * streak as i64
    }
}

/// Result of a daily claim attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum DailyClaim {
    /// Reward paid.
    Claimed {
        reward: i64,
        streak: u64,
        balance: i64,
    },
    /// Already claimed today; nothing changed.
    AlreadyClaimed { next_claim: DateTime<Utc> },
}

pub struct EconomyService<'a> {
    db: &'a Database,
}

impl<'a> EconomyService<'a> {
    /// Creates a new EconomyService instance.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Full record of a member, used for balance and statistics displays.
    pub async fn balance(&self, guild_id: u64, user_id: u64) -> Result<UserRecord, AppError> {
        UserRepository::new(self.db).get(guild_id, user_id).await
    }

    /// Claims the daily reward.
    ///
    /// A member may claim once per UTC calendar day. Claiming on the day after the previous
    /// claim extends the streak; after a longer gap the streak is kept as is. The reward is
    /// computed from the streak after it has been extended. An unreadable stored claim time
    /// counts as never claimed.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `user_id` - Discord user ID
    /// - `now` - Current time
    ///
    /// # Returns
    /// - `Ok(DailyClaim::Claimed)` - Reward credited and claim time recorded
    /// - `Ok(DailyClaim::AlreadyClaimed)` - Already claimed today, no change
    /// - `Err(AppError::StoreErr)` - Failed to persist the claim
    pub async fn claim_daily(
        &self,
        guild_id: u64,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<DailyClaim, AppError> {
        let today = now.date_naive();

        let claim = self
            .db
            .update_user(guild_id, user_id, |user| {
                let last_claim = user
                    .last_daily_claim
                    .as_deref()
                    .and_then(parse_timestamp)
                    .map(|at| at.date_naive());

                if let Some(last) = last_claim {
                    if last >= today {
                        let next_claim = today
                            .checked_add_days(Days::new(1))
                            .unwrap_or(today)
                            .and_hms_opt(0, 0, 0)
                            .map(|at| at.and_utc())
                            .unwrap_or(now);
                        return DailyClaim::AlreadyClaimed { next_claim };
                    }
                    if today.pred_opt() == Some(last) {
                        user.streak += 1;
                    }
                }

                let reward = daily_reward(user.streak);
                user.last_daily_claim = Some(format_timestamp(now));
                user.gold += reward;

                DailyClaim::Claimed {
                    reward,
                    streak: user.streak,
                    balance: user.gold,
                }
            })
            .await?;

        if let DailyClaim::Claimed { reward, streak, .. } = &claim {
            tracing::info!(
                "User {} in guild {} claimed daily reward of {} (streak {})",
                user_id,
                guild_id,
                reward,
                streak
            );
        }

        Ok(claim)
    }

    /// Ranks the members of a guild.
    ///
    /// Ties are broken by user id so the order is stable between calls. Records stored under a
    /// key that is not a snowflake are skipped with a warning.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `caller_id` - Member whose own place is reported alongside the top entries
    /// - `category` - Gold balance or wins in one game
    ///
    /// # Returns
    /// - `Ok(Leaderboard)` - Top entries plus the caller's entry if they have a record
    /// - `Err(AppError::StoreErr)` - Failed to persist a newly created guild record
    pub async fn leaderboard(
        &self,
        guild_id: u64,
        caller_id: u64,
        category: LeaderboardCategory,
    ) -> Result<Leaderboard, AppError> {
        let guild = self.db.get_guild(guild_id).await?;

        let mut scores = Vec::with_capacity(guild.users.len());
        for (key, user) in &guild.users {
            let Ok(user_id) = key.parse::<u64>() else {
                tracing::warn!("Skipping user with invalid id {:?} in guild {}", key, guild_id);
                continue;
            };
            let score = match category {
                LeaderboardCategory::Gold => user.gold,
                LeaderboardCategory::Game(game) => user.record(game).0 as i64,
            };
            scores.push((user_id, score));
        }
        scores.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let entries: Vec<LeaderboardEntry> = scores
            .into_iter()
            .enumerate()
            .map(|(index, (user_id, score))| LeaderboardEntry {
                place: index + 1,
                user_id,
                score,
            })
            .collect();

        let caller = entries.iter().find(|e| e.user_id == caller_id).cloned();
        let top = entries.into_iter().take(LEADERBOARD_SIZE).collect();

        Ok(Leaderboard {
            category,
            top,
            caller,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::game::GameKind;
    use chrono::{Duration, TimeZone};
    use test_utils::{
        builder::TestBuilder,
        factory::{guild::GuildDocFactory, user::UserDocFactory},
    };

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
    }

    /// Tests the reward formula.
    ///
    /// Expected: 100 at streak 0, 130 at 3, capped at 150 from 5
    #[test]
    fn reward_formula() {
        assert_eq!(daily_reward(0), 100);
        assert_eq!(daily_reward(3), 130);
        assert_eq!(daily_reward(4), 140);
        assert_eq!(daily_reward(5), 150);
        assert_eq!(daily_reward(20), 150);
    }

    /// Tests a first claim.
    ///
    /// Expected: Claimed with 100 gold and streak 0
    #[tokio::test]
    async fn first_claim_pays_base_reward() -> Result<(), AppError> {
        let test = TestBuilder::new().without_document().build().await.unwrap();
        let db = Database::open(&test.db_path).await?;
        let service = EconomyService::new(&db);

        let claim = service.claim_daily(1000, 42, at(10, 9)).await?;

        assert_eq!(
            claim,
            DailyClaim::Claimed {
                reward: 100,
                streak: 0,
                balance: 100
            }
        );

        Ok(())
    }

    /// Tests claiming twice on the same date.
    ///
    /// Verifies that the second claim neither pays nor touches the streak.
    ///
    /// Expected: AlreadyClaimed with gold and streak unchanged
    #[tokio::test]
    async fn second_claim_same_day_is_rejected() -> Result<(), AppError> {
        let test = TestBuilder::new().without_document().build().await.unwrap();
        let db = Database::open(&test.db_path).await?;
        let service = EconomyService::new(&db);

        service.claim_daily(1000, 42, at(10, 1)).await?;
        let before = service.balance(1000, 42).await?;

        let claim = service.claim_daily(1000, 42, at(10, 23)).await?;
        let after = service.balance(1000, 42).await?;

        assert_eq!(
            claim,
            DailyClaim::AlreadyClaimed {
                next_claim: at(11, 0)
            }
        );
        assert_eq!(after.gold, before.gold);
        assert_eq!(after.streak, before.streak);

        Ok(())
    }

    /// Tests claiming on consecutive days.
    ///
    /// Expected: streak grows by exactly one per day and the reward follows it
    #[tokio::test]
    async fn consecutive_days_extend_streak() -> Result<(), AppError> {
        let test = TestBuilder::new().without_document().build().await.unwrap();
        let db = Database::open(&test.db_path).await?;
        let service = EconomyService::new(&db);

        service.claim_daily(1000, 42, at(10, 22)).await?;
        let second = service.claim_daily(1000, 42, at(11, 1)).await?;
        let third = service.claim_daily(1000, 42, at(12, 18)).await?;

        assert_eq!(
            second,
            DailyClaim::Claimed {
                reward: 110,
                streak: 1,
                balance: 210
            }
        );
        assert_eq!(
            third,
            DailyClaim::Claimed {
                reward: 120,
                streak: 2,
                balance: 330
            }
        );

        Ok(())
    }

    /// Tests claiming after missing a day.
    ///
    /// Verifies the streak is neither extended nor reset by a gap of two or more days.
    ///
    /// Expected: Claimed with the stored streak unchanged
    #[tokio::test]
    async fn gap_keeps_streak() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_guild(
                1000,
                GuildDocFactory::new()
                    .user(
                        42,
                        UserDocFactory::new()
                            .streak(3)
                            .last_daily_claim(at(10, 12))
                            .build(),
                    )
                    .build(),
            )
            .build()
            .await
            .unwrap();
        let db = Database::open(&test.db_path).await?;
        let service = EconomyService::new(&db);

        let claim = service.claim_daily(1000, 42, at(12, 12)).await?;

        assert_eq!(
            claim,
            DailyClaim::Claimed {
                reward: 130,
                streak: 3,
                balance: 130
            }
        );

        Ok(())
    }

    /// Tests that an unreadable claim time counts as never claimed.
    ///
    /// Expected: Claimed without a streak increment
    #[tokio::test]
    async fn malformed_claim_time_is_claimable() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_guild(
                1000,
                GuildDocFactory::new()
                    .user(
                        42,
                        UserDocFactory::new()
                            .streak(1)
                            .raw_field("last_daily_claim", serde_json::json!("yesterday"))
                            .build(),
                    )
                    .build(),
            )
            .build()
            .await
            .unwrap();
        let db = Database::open(&test.db_path).await?;
        let service = EconomyService::new(&db);

        let claim = service
            .claim_daily(1000, 42, at(12, 12) + Duration::minutes(5))
            .await?;

        assert!(matches!(claim, DailyClaim::Claimed { streak: 1, .. }));

        Ok(())
    }

    /// Tests leaderboard ranking and the caller's own place.
    ///
    /// Expected: Ranked by wins descending with ties broken by user id, caller found
    #[tokio::test]
    async fn ranks_by_category() -> Result<(), AppError> {
        let mut guild = GuildDocFactory::new();
        for user_id in 1..=12u64 {
            guild = guild.user(
                user_id,
                UserDocFactory::new()
                    .gold(user_id as i64 * 10)
                    .raw_field("slots_wins", serde_json::json!(user_id % 3))
                    .build(),
            );
        }
        let test = TestBuilder::new()
            .with_guild(1000, guild.build())
            .build()
            .await
            .unwrap();
        let db = Database::open(&test.db_path).await?;
        let service = EconomyService::new(&db);

        let gold = service
            .leaderboard(1000, 1, LeaderboardCategory::Gold)
            .await?;
        assert_eq!(gold.top.len(), 10);
        assert_eq!(gold.top[0].user_id, 12);
        assert_eq!(gold.top[0].score, 120);
        assert_eq!(gold.caller.as_ref().map(|e| e.place), Some(12));

        let slots = service
            .leaderboard(1000, 5, LeaderboardCategory::Game(GameKind::Slots))
            .await?;
        let top_ids: Vec<u64> = slots.top.iter().take(4).map(|e| e.user_id).collect();
        assert_eq!(top_ids, vec![2, 5, 8, 11]);
        assert_eq!(slots.caller.as_ref().map(|e| e.place), Some(2));

        Ok(())
    }

    /// Tests that a user stored under a non-numeric key is left off the board.
    ///
    /// Expected: Ok with only the valid member ranked
    #[tokio::test]
    async fn skips_invalid_user_key() -> Result<(), AppError> {
        let mut doc = serde_json::json!({
            "1000": GuildDocFactory::new()
                .user(7, UserDocFactory::new().gold(50).build())
                .build()
        });
        doc["1000"]["users"]["not-a-user"] = UserDocFactory::new().gold(900).build();
        let test = TestBuilder::new()
            .with_raw(doc.to_string())
            .build()
            .await
            .unwrap();
        let db = Database::open(&test.db_path).await?;

        let board = EconomyService::new(&db)
            .leaderboard(1000, 7, LeaderboardCategory::Gold)
            .await?;

        assert_eq!(board.top.len(), 1);
        assert_eq!(board.top[0].user_id, 7);
        assert_eq!(board.caller.as_ref().map(|e| e.place), Some(1));

        Ok(())
    }
}
