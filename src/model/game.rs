use std::fmt;

/// The casino games that keep win/loss counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    Blackjack,
    Roulette,
    Slots,
}

impl GameKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Blackjack => "blackjack",
            Self::Roulette => "roulette",
            Self::Slots => "slots",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a leaderboard ranks members by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardCategory {
    Gold,
    /// Ranked by wins in the game.
    Game(GameKind),
}

impl LeaderboardCategory {
    /// Parses the leaderboard command choice value.
    pub fn from_choice(value: &str) -> Option<Self> {
        match value {
            "gold" => Some(Self::Gold),
            "blackjack" => Some(Self::Game(GameKind::Blackjack)),
            "roulette" => Some(Self::Game(GameKind::Roulette)),
            "slots" => Some(Self::Game(GameKind::Slots)),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Gold => "Gold",
            Self::Game(GameKind::Blackjack) => "Blackjack",
            Self::Game(GameKind::Roulette) => "Roulette",
            Self::Game(GameKind::Slots) => "Slots",
        }
    }
}

/// One ranked row of a leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    /// 1-based rank.
    pub place: usize,
    pub user_id: u64,
    /// Gold balance or win count, depending on the category.
    pub score: i64,
}

/// A leaderboard for one guild.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    pub category: LeaderboardCategory,
    /// At most ten top entries.
    pub top: Vec<LeaderboardEntry>,
    /// The requesting member's own entry, if they have a record.
    pub caller: Option<LeaderboardEntry>,
}
