//! State shared by every event handler and the scheduler.
//!
//! Built once in `main` and cloned into the event handler. Every field is reference
//! counted, so clones share the same store, sessions and timers.

use std::sync::Arc;

use tokio::sync::Notify;

use crate::{
    data::store::Database,
    service::{
        bump::BumpReminders,
        game::{blackjack::BlackjackHand, cooldown::GameCooldown, session::SessionStore},
    },
};

#[derive(Clone)]
pub struct AppState {
    /// Guild and user document store.
    pub db: Arc<Database>,

    /// Blackjack hands waiting for a Hit or Stand press.
    pub blackjack: Arc<SessionStore<BlackjackHand>>,

    /// Slot bets waiting for the Spin press.
    pub slots: Arc<SessionStore<i64>>,

    /// Game start limiter shared by every game command.
    pub cooldown: Arc<GameCooldown>,

    /// Pending bump reminder per guild.
    pub bump_reminders: Arc<BumpReminders>,

    /// Signalled once the gateway reports ready; the scheduler waits on it.
    pub ready: Arc<Notify>,

    /// Guild commands are registered in instead of globally.
    pub dev_guild_id: Option<u64>,
}

impl AppState {
    pub fn new(db: Arc<Database>, dev_guild_id: Option<u64>) -> Self {
        Self {
            db,
            blackjack: Arc::new(SessionStore::new()),
            slots: Arc::new(SessionStore::new()),
            cooldown: Arc::new(GameCooldown::new()),
            bump_reminders: Arc::new(BumpReminders::new()),
            ready: Arc::new(Notify::new()),
            dev_guild_id,
        }
    }
}
