//! Timed shop effects.
//!
//! An effect is active while its stored expiry lies in the future. Expired effects are
//! reverted by a periodic sweep that drives an `EffectActions` implementation; in
//! production that is `DiscordEffectActions`, in tests a recorder.

pub mod discord;

use chrono::{DateTime, Duration, Utc};
use serenity::async_trait;

use crate::{
    data::{store::Database, user::UserRepository},
    error::AppError,
    model::effect::EffectKind,
    util::time::parse_timestamp,
};

/// Side effects of reverting an expired timed effect.
#[async_trait]
pub trait EffectActions: Send + Sync {
    /// Undoes the external effect (nickname reset, unmute).
    async fn revert(&self, guild_id: u64, user_id: u64, kind: EffectKind) -> Result<(), AppError>;

    /// Announces that the effect ended.
    async fn notify(&self, guild_id: u64, user_id: u64, kind: EffectKind) -> Result<(), AppError>;
}

/// Outcome of one sweep pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Effects cleared from the store.
    pub reverted: usize,
    /// Effects whose stored expiry could not be cleared.
    pub failed: usize,
    /// Effects skipped because their stored expiry is unreadable.
    pub malformed: usize,
}

pub struct TimedEffectService<'a> {
    db: &'a Database,
}

impl<'a> TimedEffectService<'a> {
    /// Creates a new TimedEffectService instance.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Time left on an effect.
    ///
    /// # Returns
    /// - `Ok(Some(duration))` - Effect is active for `duration` more
    /// - `Ok(None)` - Effect inactive, expired, or its expiry is unreadable
    pub async fn remaining(
        &self,
        guild_id: u64,
        user_id: u64,
        kind: EffectKind,
        now: DateTime<Utc>,
    ) -> Result<Option<Duration>, AppError> {
        let expiry = UserRepository::new(self.db)
            .get_effect_expiry(guild_id, user_id, kind)
            .await?;

        Ok(expiry
            .as_deref()
            .and_then(parse_timestamp)
            .filter(|at| *at > now)
            .map(|at| at - now))
    }

    pub async fn is_active(
        &self,
        guild_id: u64,
        user_id: u64,
        kind: EffectKind,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        Ok(self.remaining(guild_id, user_id, kind, now).await?.is_some())
    }

    /// Starts or replaces an effect.
    ///
    /// Re-applying an active effect overwrites its expiry; durations do not stack.
    ///
    /// # Returns
    /// - `Ok(DateTime<Utc>)` - The new expiry
    pub async fn activate(
        &self,
        guild_id: u64,
        user_id: u64,
        kind: EffectKind,
        duration: Duration,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, AppError> {
        let expiry = now + duration;

        UserRepository::new(self.db)
            .set_effect_expiry(guild_id, user_id, kind, Some(expiry))
            .await?;
        tracing::info!(
            "Activated {} on user {} in guild {} until {}",
            kind,
            user_id,
            guild_id,
            expiry
        );

        Ok(expiry)
    }

    /// Reverts every effect whose expiry is at or before `now`.
    ///
    /// Each expired effect is reverted, cleared and announced independently: failures are
    /// logged and counted and never stop the pass. A failed revert still clears the
    /// stored expiry so the effect is not retried every minute forever. The expiry is only
    /// cleared if it still holds the value the sweep read, so a purchase landing mid-sweep
    /// is not lost.
    ///
    /// # Arguments
    /// - `actions` - External side effects of reverting
    /// - `now` - Current time
    ///
    /// # Returns
    /// - `SweepReport` - Counts of reverted, failed and malformed effects
    pub async fn sweep<A>(&self, actions: &A, now: DateTime<Utc>) -> SweepReport
    where
        A: EffectActions + ?Sized,
    {
        let mut report = SweepReport::default();

        for entry in self.db.users().await {
            for kind in EffectKind::ALL {
                let Some(stored) = entry.record.effect_expiry(kind) else {
                    continue;
                };
                let Some(expiry) = parse_timestamp(stored) else {
                    tracing::warn!(
                        "Skipping unreadable {} expiry '{}' for user {} in guild {}",
                        kind,
                        stored,
                        entry.user_id,
                        entry.guild_id
                    );
                    report.malformed += 1;
                    continue;
                };
                if expiry > now {
                    continue;
                }

                if let Err(e) = actions.revert(entry.guild_id, entry.user_id, kind).await {
                    tracing::warn!(
                        "Failed to revert {} for user {} in guild {}: {}",
                        kind,
                        entry.user_id,
                        entry.guild_id,
                        e
                    );
                }

                let cleared = self
                    .db
                    .update_user(entry.guild_id, entry.user_id, |user| {
                        let slot = user.effect_expiry_mut(kind);
                        if slot.as_ref() == Some(stored) {
                            *slot = None;
                        }
                    })
                    .await;
                if let Err(e) = cleared {
                    tracing::error!(
                        "Failed to clear {} expiry for user {} in guild {}: {}",
                        kind,
                        entry.user_id,
                        entry.guild_id,
                        e
                    );
                    report.failed += 1;
                    continue;
                }

                if let Err(e) = actions.notify(entry.guild_id, entry.user_id, kind).await {
                    tracing::warn!(
                        "Failed to announce end of {} for user {} in guild {}: {}",
                        kind,
                        entry.user_id,
                        entry.guild_id,
                        e
                    );
                }

                tracing::info!(
                    "Reverted {} for user {} in guild {}",
                    kind,
                    entry.user_id,
                    entry.guild_id
                );
                report.reverted += 1;
            }
        }

        report
    }
}
