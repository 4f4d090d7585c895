//! Per-game cooldown on the game commands.

use std::{num::NonZeroU32, time::Duration};

use governor::{
    clock::{Clock, DefaultClock},
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter,
};

use crate::{error::AppError, model::game::GameKind};

/// Games a player may start back to back.
pub const GAME_BURST: u32 = 3;

/// Time for one spent game start to come back.
pub const GAME_REFILL: Duration = Duration::from_secs(180);

/// Guild, member and game.
type CooldownKey = (u64, u64, GameKind);

type KeyedLimiter = RateLimiter<CooldownKey, DefaultKeyedStateStore<CooldownKey>, DefaultClock>;

/// Limits each member to a burst of three starts of each game, refilled one every 180 seconds,
/// so no 180 second stretch holds more than three starts of the same game.
pub struct GameCooldown {
    limiter: KeyedLimiter,
}

impl GameCooldown {
    pub fn new() -> Self {
        let burst = NonZeroU32::new(GAME_BURST).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(GAME_REFILL)
            .unwrap_or_else(|| Quota::per_minute(NonZeroU32::MIN))
            .allow_burst(burst);

        Self {
            limiter: RateLimiter::keyed(quota),
        }
    }

    /// Consumes one start of `game` for the member.
    ///
    /// Each game has its own allowance, so a spent blackjack allowance does not block slots.
    ///
    /// # Returns
    /// - `Ok(())` - Game may start
    /// - `Err(AppError::BadRequest)` - Cooldown active, with the wait in seconds
    pub fn check(&self, guild_id: u64, user_id: u64, game: GameKind) -> Result<(), AppError> {
        self.limiter
            .check_key(&(guild_id, user_id, game))
            .map_err(|not_until| {
                let wait = not_until.wait_time_from(DefaultClock::default().now());
                AppError::BadRequest(format!(
                    "You're playing too many games! Come back to the tables in {} seconds.",
                    wait.as_secs().max(1)
                ))
            })
    }

    /// Drops state for members whose cooldown has fully refilled.
    pub fn prune(&self) {
        self.limiter.retain_recent();
    }
}

impl Default for GameCooldown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests the burst limit.
    ///
    /// Expected: three games allowed, the fourth rejected
    #[test]
    fn allows_three_then_rejects() {
        let cooldown = GameCooldown::new();

        for _ in 0..3 {
            assert!(cooldown.check(1, 2, GameKind::Slots).is_ok());
        }
        assert!(matches!(
            cooldown.check(1, 2, GameKind::Slots),
            Err(AppError::BadRequest(_))
        ));
    }

    /// Tests that members and guilds are tracked separately.
    ///
    /// Expected: another member, or the same member elsewhere, is unaffected
    #[test]
    fn keyed_per_member_per_guild() {
        let cooldown = GameCooldown::new();

        for _ in 0..3 {
            cooldown.check(1, 2, GameKind::Roulette).unwrap();
        }
        assert!(cooldown.check(1, 3, GameKind::Roulette).is_ok());
        assert!(cooldown.check(9, 2, GameKind::Roulette).is_ok());
    }

    /// Tests that each game keeps its own allowance.
    ///
    /// Expected: blackjack still allowed after the slots allowance is spent
    #[test]
    fn keyed_per_game() {
        let cooldown = GameCooldown::new();

        for _ in 0..3 {
            cooldown.check(1, 2, GameKind::Slots).unwrap();
        }
        assert!(cooldown.check(1, 2, GameKind::Slots).is_err());
        assert!(cooldown.check(1, 2, GameKind::Blackjack).is_ok());
        assert!(cooldown.check(1, 2, GameKind::Roulette).is_ok());
    }
}
