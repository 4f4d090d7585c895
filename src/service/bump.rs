//! Disboard bump detection and reminder timers.
//!
//! Disboard allows one bump every two hours. When its confirmation shows up, the guild's
//! reminder timer is (re)started; the reminder pings the bump role in the bot channel.

use std::{collections::HashMap, future::Future, time::Duration};

use serenity::{
    all::{
        ChannelId, Colour, CreateEmbed, CreateEmbedFooter, CreateMessage, Mention, RoleId,
        Timestamp,
    },
    http::Http,
};
use tokio::{sync::Mutex, task::JoinHandle};

use crate::{
    data::{guild::GuildConfigRepository, store::Database},
    error::AppError,
    model::guild::{ChannelKind, RoleKind},
};

/// Disboard's bot user.
pub const DISBOARD_ID: u64 = 302050872383242240;

/// Text Disboard puts in its embed after a successful bump.
pub const BUMP_CONFIRMATION: &str = "Bump done!";

/// Time between a bump and its reminder.
pub const BUMP_COOLDOWN: Duration = Duration::from_secs(2 * 60 * 60);

/// Whether a message is Disboard confirming a bump.
///
/// Only the first embed is inspected.
pub fn is_bump_confirmation<'a>(
    author_id: u64,
    mut embed_descriptions: impl Iterator<Item = Option<&'a str>>,
) -> bool {
    author_id == DISBOARD_ID
        && embed_descriptions
            .next()
            .flatten()
            .is_some_and(|description| description.contains(BUMP_CONFIRMATION))
}

/// Where a guild's reminder goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderTarget {
    pub channel_id: u64,
    pub role_id: u64,
}

/// Resolves the bump role and bot channel.
///
/// # Returns
/// - `Ok(Some(ReminderTarget))` - Both are configured
/// - `Ok(None)` - Either is missing; the reminder is skipped
pub async fn reminder_target(
    db: &Database,
    guild_id: u64,
) -> Result<Option<ReminderTarget>, AppError> {
    let repo = GuildConfigRepository::new(db);

    let Some(role_id) = repo.get_role(guild_id, RoleKind::Bump).await? else {
        tracing::info!("No bump role set for guild {}", guild_id);
        return Ok(None);
    };
    let Some(channel_id) = repo.get_channel(guild_id, ChannelKind::Bot).await? else {
        tracing::info!("No bot channel set for guild {}", guild_id);
        return Ok(None);
    };

    Ok(Some(ReminderTarget {
        channel_id,
        role_id,
    }))
}

/// Posts the reminder ping.
///
/// # Returns
/// - `Ok(true)` - Reminder sent
/// - `Ok(false)` - Guild has no bump role or bot channel
pub async fn send_reminder(db: &Database, http: &Http, guild_id: u64) -> Result<bool, AppError> {
    let Some(target) = reminder_target(db, guild_id).await? else {
        return Ok(false);
    };

    let embed = CreateEmbed::new()
        .title("Bump Reminder!")
        .description("It's time to bump the server!")
        .field(
            "How to bump:",
            "Use `/bump` to bump the server and help grow the Cavern's reach!",
            false,
        )
        .colour(Colour::DARK_GREEN)
        .timestamp(Timestamp::now());
    let message = CreateMessage::new()
        .content(Mention::Role(RoleId::new(target.role_id)).to_string())
        .embed(embed);

    ChannelId::new(target.channel_id)
        .send_message(http, message)
        .await?;
    tracing::info!("Sent bump reminder to guild {}", guild_id);

    Ok(true)
}

/// Acknowledgement posted under Disboard's confirmation.
pub fn thank_you_message() -> CreateMessage {
    CreateMessage::new().embed(
        CreateEmbed::new()
            .title("Thank you for bumping!")
            .description("We will remind you once you can bump again!")
            .footer(CreateEmbedFooter::new("Next bump available in 2 hours"))
            .colour(Colour::DARK_GREEN),
    )
}

/// One pending reminder task per guild.
#[derive(Default)]
pub struct BumpReminders {
    tasks: Mutex<HashMap<u64, JoinHandle<()>>>,
}

impl BumpReminders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `reminder` after `delay`, replacing any reminder already pending for the guild.
    ///
    /// # Returns
    /// - `bool` - Whether a previous reminder was cancelled
    pub async fn schedule<F>(&self, guild_id: u64, delay: Duration, reminder: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            reminder.await;
        });

        let mut tasks = self.tasks.lock().await;
        tasks.retain(|_, handle| !handle.is_finished());
        match tasks.insert(guild_id, task) {
            Some(previous) => {
                previous.abort();
                tracing::info!("Cancelled previous bump reminder for guild {}", guild_id);
                true
            }
            None => false,
        }
    }

    /// Whether a reminder is still waiting to fire.
    #[cfg(test)]
    pub async fn is_pending(&self, guild_id: u64) -> bool {
        self.tasks
            .lock()
            .await
            .get(&guild_id)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Drops a guild's pending reminder, if any.
    pub async fn cancel(&self, guild_id: u64) -> bool {
        match self.tasks.lock().await.remove(&guild_id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;
    use test_utils::{builder::TestBuilder, factory::guild::GuildDocFactory};

    /// Tests bump confirmation detection.
    ///
    /// Expected: only Disboard's first embed containing the confirmation counts
    #[test]
    fn detects_confirmation() {
        let done = "Bump done! :thumbsup: Check it out on DISBOARD.";

        assert!(is_bump_confirmation(DISBOARD_ID, [Some(done)].into_iter()));
        assert!(!is_bump_confirmation(42, [Some(done)].into_iter()));
        assert!(!is_bump_confirmation(DISBOARD_ID, [Some("Please wait")].into_iter()));
        assert!(!is_bump_confirmation(DISBOARD_ID, [None, Some(done)].into_iter()));
        assert!(!is_bump_confirmation(DISBOARD_ID, std::iter::empty()));
    }

    /// Tests that a new bump replaces the pending reminder.
    ///
    /// Expected: only the second reminder fires, two hours after the second bump
    #[tokio::test(start_paused = true)]
    async fn rescheduling_cancels_previous() {
        let reminders = BumpReminders::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let first = fired.clone();
        let replaced = reminders
            .schedule(1000, BUMP_COOLDOWN, async move {
                first.fetch_add(1, Ordering::SeqCst);
            })
            .await;
        assert!(!replaced);

        tokio::time::sleep(Duration::from_secs(60 * 60)).await;

        let second = fired.clone();
        let replaced = reminders
            .schedule(1000, BUMP_COOLDOWN, async move {
                second.fetch_add(10, Ordering::SeqCst);
            })
            .await;
        assert!(replaced);

        tokio::time::sleep(Duration::from_secs(90 * 60)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(reminders.is_pending(1000).await);

        tokio::time::sleep(Duration::from_secs(31 * 60)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 10);
        assert!(!reminders.is_pending(1000).await);
    }

    /// Tests that guilds keep independent reminders.
    ///
    /// Expected: cancelling one guild leaves the other pending
    #[tokio::test(start_paused = true)]
    async fn guilds_are_independent() {
        let reminders = BumpReminders::new();
        reminders.schedule(1, BUMP_COOLDOWN, async {}).await;
        reminders.schedule(2, BUMP_COOLDOWN, async {}).await;

        assert!(reminders.cancel(1).await);
        assert!(!reminders.cancel(1).await);
        assert!(reminders.is_pending(2).await);
    }

    /// Tests reminder target resolution.
    ///
    /// Expected: None until both the bump role and bot channel are set
    #[tokio::test]
    async fn resolves_target() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_guild(1000, GuildDocFactory::new().bump_role(55).build())
            .build()
            .await
            .unwrap();
        let db = Database::open(&test.db_path).await?;

        assert_eq!(reminder_target(&db, 1000).await?, None);

        GuildConfigRepository::new(&db)
            .set_channel(1000, ChannelKind::Bot, 77)
            .await?;
        assert_eq!(
            reminder_target(&db, 1000).await?,
            Some(ReminderTarget {
                channel_id: 77,
                role_id: 55
            })
        );

        Ok(())
    }
}
