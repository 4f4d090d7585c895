//! Three-reel slot machine.

use rand::{
    distr::{weighted::WeightedIndex, Distribution},
    Rng,
};

use super::Settlement;
use crate::error::{internal::InternalError, AppError};

/// Reels revealed per spin.
pub const REELS: usize = 3;

/// Reel symbols and their draw weights.
pub const SYMBOLS: [(&str, f64); 6] = [
    ("🍒", 0.265),
    ("🍋", 0.25),
    ("🍊", 0.22),
    ("🍇", 0.18),
    ("🍉", 0.08),
    ("7️⃣", 0.005),
];

pub const SEVEN: &str = "7️⃣";
pub const MELON: &str = "🍉";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotsOutcome {
    /// Three sevens
    MegaJackpot,
    /// Three melons
    BigJackpot,
    /// Any other three of a kind
    Jackpot,
    /// Exactly two reels match
    TwoOfAKind,
    Miss,
}

impl SlotsOutcome {
    pub fn title(self) -> &'static str {
        match self {
            SlotsOutcome::MegaJackpot => "Mega Jackpot!",
            SlotsOutcome::BigJackpot => "Big Jackpot!",
            SlotsOutcome::Jackpot => "Jackpot!",
            SlotsOutcome::TwoOfAKind => "Two of a kind!",
            SlotsOutcome::Miss => "No win this time, Try again!",
        }
    }

    pub fn multiplier(self) -> i64 {
        match self {
            SlotsOutcome::MegaJackpot => 49,
            SlotsOutcome::BigJackpot => 9,
            SlotsOutcome::Jackpot => 7,
            SlotsOutcome::TwoOfAKind => 2,
            SlotsOutcome::Miss => 0,
        }
    }

    pub fn settlement(self, bet: i64) -> Settlement {
        match self {
            SlotsOutcome::Miss => Settlement::loss(bet),
            outcome => Settlement::win(bet * outcome.multiplier()),
        }
    }
}

/// Classifies a finished spin; the first matching rule wins.
pub fn evaluate(reels: &[&'static str; REELS]) -> SlotsOutcome {
    let [a, b, c] = *reels;

    if a == b && b == c {
        match a {
            SEVEN => SlotsOutcome::MegaJackpot,
            MELON => SlotsOutcome::BigJackpot,
            _ => SlotsOutcome::Jackpot,
        }
    } else if a == b || b == c || a == c {
        SlotsOutcome::TwoOfAKind
    } else {
        SlotsOutcome::Miss
    }
}

/// Weighted reel draws.
pub struct SlotMachine {
    distribution: WeightedIndex<f64>,
}

impl SlotMachine {
    pub fn new() -> Result<Self, AppError> {
        let distribution = WeightedIndex::new(SYMBOLS.iter().map(|(_, weight)| *weight))
            .map_err(InternalError::from)?;

        Ok(Self { distribution })
    }

    /// Draws a single reel.
    pub fn reel<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        SYMBOLS[self.distribution.sample(rng)].0
    }

    /// Draws all reels at once.
    pub fn spin<R: Rng + ?Sized>(&self, rng: &mut R) -> [&'static str; REELS] {
        [self.reel(rng), self.reel(rng), self.reel(rng)]
    }
}

/// Formats reels, showing `?` for those not yet revealed.
pub fn format_reels(reels: &[&str]) -> String {
    (0..REELS)
        .map(|i| format!("`{}`", reels.get(i).copied().unwrap_or("?")))
        .collect::<Vec<_>>()
        .join(" ")
}
