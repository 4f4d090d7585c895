use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

use crate::model::{effect::EffectKind, game::GameKind};

/// Economy, activity and moderation state of one member in one guild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRecord {
    /// Warnings in the order they were issued.
    #[serde(deserialize_with = "warnings_or_legacy_count")]
    pub warnings: Vec<Warning>,
    /// Activity tier, 1 to 3.
    pub tier: u8,
    pub message_count: u64,
    /// Gold balance. Not floored at zero.
    pub gold: i64,
    pub roulette_wins: u64,
    pub roulette_losses: u64,
    pub blackjack_wins: u64,
    pub blackjack_losses: u64,
    pub slots_wins: u64,
    pub slots_losses: u64,
    /// ISO-8601 timestamp of the last daily claim.
    pub last_daily_claim: Option<String>,
    pub streak: u64,
    /// ISO-8601 timestamp at which the mimic nickname is reverted.
    pub mimic_expiry: Option<String>,
    /// ISO-8601 timestamp at which the barrel mute is lifted.
    pub barrel_expiry: Option<String>,
}

impl Default for UserRecord {
    fn default() -> Self {
        Self {
            warnings: Vec::new(),
            tier: 1,
            message_count: 0,
            gold: 0,
            roulette_wins: 0,
            roulette_losses: 0,
            blackjack_wins: 0,
            blackjack_losses: 0,
            slots_wins: 0,
            slots_losses: 0,
            last_daily_claim: None,
            streak: 0,
            mimic_expiry: None,
            barrel_expiry: None,
        }
    }
}

/// A moderator warning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Warning {
    /// ISO-8601 timestamp the warning was issued at.
    pub timestamp: String,
    pub reason: String,
}

impl UserRecord {
    /// Win and loss counters for a game.
    pub fn record(&self, game: GameKind) -> (u64, u64) {
        match game {
            GameKind::Blackjack => (self.blackjack_wins, self.blackjack_losses),
            GameKind::Roulette => (self.roulette_wins, self.roulette_losses),
            GameKind::Slots => (self.slots_wins, self.slots_losses),
        }
    }

    /// Increments exactly one counter for a resolved game.
    pub fn record_outcome(&mut self, game: GameKind, won: bool) {
        let counter = match (game, won) {
            (GameKind::Blackjack, true) => &mut self.blackjack_wins,
            (GameKind::Blackjack, false) => &mut self.blackjack_losses,
            (GameKind::Roulette, true) => &mut self.roulette_wins,
            (GameKind::Roulette, false) => &mut self.roulette_losses,
            (GameKind::Slots, true) => &mut self.slots_wins,
            (GameKind::Slots, false) => &mut self.slots_losses,
        };
        *counter += 1;
    }

    /// Percentage of games won, rounded to one decimal. Zero when no games were played.
    pub fn win_rate(&self, game: GameKind) -> f64 {
        let (wins, losses) = self.record(game);
        let games = wins + losses;
        if games == 0 {
            return 0.0;
        }
        (wins as f64 / games as f64 * 1000.0).round() / 10.0
    }

    pub fn effect_expiry(&self, kind: EffectKind) -> Option<&String> {
        match kind {
            EffectKind::Mimic => self.mimic_expiry.as_ref(),
            EffectKind::Barrel => self.barrel_expiry.as_ref(),
        }
    }

    pub fn effect_expiry_mut(&mut self, kind: EffectKind) -> &mut Option<String> {
        match kind {
            EffectKind::Mimic => &mut self.mimic_expiry,
            EffectKind::Barrel => &mut self.barrel_expiry,
        }
    }
}

/// Accepts the current warning list as well as the legacy integer warning count, which is
/// discarded in favour of an empty list.
fn warnings_or_legacy_count<'de, D>(deserializer: D) -> Result<Vec<Warning>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Stored {
        List(Vec<Warning>),
        Legacy(IgnoredAny),
    }

    Ok(match Stored::deserialize(deserializer)? {
        Stored::List(warnings) => warnings,
        Stored::Legacy(_) => Vec::new(),
    })
}
