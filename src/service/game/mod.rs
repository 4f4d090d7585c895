//! Gambling games: blackjack, roulette and slots.
//!
//! Game rules are pure and take their randomness from the caller, so outcomes can be
//! forced in tests. [`GameService`] owns the store side: bet validation against the
//! player's balance and settling a finished round.

pub mod blackjack;
pub mod cooldown;
pub mod roulette;
pub mod session;
pub mod slots;

use crate::{
    data::{store::Database, user::UserRepository},
    error::AppError,
    model::{game::GameKind, user::UserRecord},
};

/// Highest bet accepted at the blackjack and roulette tables.
pub const MAX_TABLE_BET: i64 = 99;

/// Gold movement and counter update produced by a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub gold_delta: i64,
    pub won: bool,
}

impl Settlement {
    pub fn win(amount: i64) -> Self {
        Self {
            gold_delta: amount,
            won: true,
        }
    }

    pub fn loss(bet: i64) -> Self {
        Self {
            gold_delta: -bet,
            won: false,
        }
    }
}

/// Validates a blackjack or roulette bet.
pub fn validate_table_bet(bet: i64) -> Result<(), AppError> {
    if !(1..=MAX_TABLE_BET).contains(&bet) {
        return Err(AppError::BadRequest(format!(
            "Bets must be between 1 and {} gold.",
            MAX_TABLE_BET
        )));
    }
    Ok(())
}

/// Validates a slots bet, which has no upper limit.
pub fn validate_bet(bet: i64) -> Result<(), AppError> {
    if bet <= 0 {
        return Err(AppError::BadRequest("Bets must be positive.".to_string()));
    }
    Ok(())
}

pub struct GameService<'a> {
    db: &'a Database,
}

impl<'a> GameService<'a> {
    /// Creates a new GameService instance.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Ensures the player can cover `bet`.
    ///
    /// Gold is not held while a round is in progress; the round settles against whatever
    /// the balance is when it finishes.
    ///
    /// # Returns
    /// - `Ok(())` - Balance covers the bet
    /// - `Err(AppError::BadRequest)` - Not enough gold
    pub async fn ensure_funds(
        &self,
        guild_id: u64,
        user_id: u64,
        bet: i64,
    ) -> Result<(), AppError> {
        let gold = UserRepository::new(self.db).get_gold(guild_id, user_id).await?;
        if gold < bet {
            return Err(AppError::BadRequest("You don't have enough gold!".to_string()));
        }
        Ok(())
    }

    /// Applies a finished round to the player's record.
    ///
    /// # Returns
    /// - `Ok(UserRecord)` - Record after the gold change and counter increment
    pub async fn settle(
        &self,
        guild_id: u64,
        user_id: u64,
        game: GameKind,
        settlement: Settlement,
    ) -> Result<UserRecord, AppError> {
        let user = UserRepository::new(self.db)
            .settle_game(guild_id, user_id, game, settlement.gold_delta, settlement.won)
            .await?;
        tracing::debug!(
            "Settled {} for user {} in guild {}: {:+} gold",
            game,
            user_id,
            guild_id,
            settlement.gold_delta
        );

        Ok(user)
    }
}
