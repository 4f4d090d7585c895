//! In-memory interactive game sessions addressed by button custom ids.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use tokio::{sync::Mutex, time::Instant};

use crate::error::AppError;

/// Idle time after which a session's buttons stop working.
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(180);

struct Session<T> {
    owner: u64,
    guild_id: u64,
    last_active: Instant,
    state: T,
}

/// Why a button press did not reach its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRejection {
    /// Session resolved, expired or never existed
    Gone,
    /// Pressed by someone other than the player
    NotOwner,
}

impl From<SessionRejection> for AppError {
    fn from(rejection: SessionRejection) -> Self {
        match rejection {
            SessionRejection::Gone => {
                AppError::NotFound("This game has already ended.".to_string())
            }
            SessionRejection::NotOwner => AppError::BadRequest("This isn't your game!".to_string()),
        }
    }
}

/// Sessions of one game, keyed by a generated id.
pub struct SessionStore<T> {
    next_id: AtomicU64,
    sessions: Mutex<HashMap<u64, Session<T>>>,
}

impl<T> SessionStore<T> {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Stores a new session for `owner`.
    ///
    /// # Returns
    /// - `u64` - Session id to embed in button custom ids
    pub async fn insert(&self, guild_id: u64, owner: u64, state: T) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.sessions.lock().await.insert(
            id,
            Session {
                owner,
                guild_id,
                last_active: Instant::now(),
                state,
            },
        );
        id
    }

    /// Runs `f` on a live session owned by `user_id`.
    ///
    /// The session is removed when `f` returns `true` (the game resolved) or when it has
    /// been idle longer than [`SESSION_TIMEOUT`]. Expired sessions are removed without
    /// running `f`.
    ///
    /// # Returns
    /// - `Ok(R)` - Result of `f`
    /// - `Err(SessionRejection::Gone)` - Session resolved, expired or unknown
    /// - `Err(SessionRejection::NotOwner)` - Pressed by another member; session untouched
    pub async fn with_session<R>(
        &self,
        id: u64,
        user_id: u64,
        f: impl FnOnce(&mut T) -> (R, bool),
    ) -> Result<(u64, R), SessionRejection> {
        let mut sessions = self.sessions.lock().await;

        let session = sessions.get_mut(&id).ok_or(SessionRejection::Gone)?;
        if session.owner != user_id {
            return Err(SessionRejection::NotOwner);
        }
        if session.last_active.elapsed() > SESSION_TIMEOUT {
            sessions.remove(&id);
            return Err(SessionRejection::Gone);
        }

        session.last_active = Instant::now();
        let guild_id = session.guild_id;
        let (result, resolved) = f(&mut session.state);
        if resolved {
            sessions.remove(&id);
        }

        Ok((guild_id, result))
    }

    /// Removes and returns a live session owned by `user_id`.
    pub async fn take(&self, id: u64, user_id: u64) -> Result<(u64, T), SessionRejection> {
        let mut sessions = self.sessions.lock().await;

        let session = sessions.get(&id).ok_or(SessionRejection::Gone)?;
        if session.owner != user_id {
            return Err(SessionRejection::NotOwner);
        }
        let expired = session.last_active.elapsed() > SESSION_TIMEOUT;

        let session = sessions.remove(&id).ok_or(SessionRejection::Gone)?;
        if expired {
            return Err(SessionRejection::Gone);
        }

        Ok((session.guild_id, session.state))
    }

    /// Drops sessions idle past the timeout.
    ///
    /// # Returns
    /// - `usize` - Number of sessions removed
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.last_active.elapsed() <= SESSION_TIMEOUT);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

impl<T> Default for SessionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a button custom id such as `blackjack:hit:12`.
pub fn custom_id(game: &str, action: &str, session: u64) -> String {
    format!("{}:{}:{}", game, action, session)
}

/// Splits a custom id into game, action and session id.
pub fn parse_custom_id(custom_id: &str) -> Option<(&str, &str, u64)> {
    let mut parts = custom_id.splitn(3, ':');
    let game = parts.next()?;
    let action = parts.next()?;
    let session = parts.next()?.parse().ok()?;
    Some((game, action, session))
}
