use chrono::Duration;
use std::fmt;

/// Price of a barrel purchase.
pub const BARREL_PRICE: i64 = 800;

/// How long a barrel keeps its target muted.
pub const BARREL_MINUTES: i64 = 5;

/// Timed shop effects applied to a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Nickname overridden by the buyer.
    Mimic,
    /// Mute role plus server mute.
    Barrel,
}

impl EffectKind {
    pub const ALL: [EffectKind; 2] = [EffectKind::Mimic, EffectKind::Barrel];

    /// Title of the log embed posted when the effect is reverted.
    pub fn revert_title(self) -> &'static str {
        match self {
            Self::Mimic => "Mimic Reverted",
            Self::Barrel => "Barrel Time Ended",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mimic => f.write_str("mimic"),
            Self::Barrel => f.write_str("barrel"),
        }
    }
}

/// Purchasable mimic durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimicDuration {
    OneHour,
    SixHours,
    TwelveHours,
}

impl MimicDuration {
    pub fn from_choice(value: &str) -> Option<Self> {
        match value {
            "1h" => Some(Self::OneHour),
            "6h" => Some(Self::SixHours),
            "12h" => Some(Self::TwelveHours),
            _ => None,
        }
    }

    pub fn choice(self) -> &'static str {
        match self {
            Self::OneHour => "1h",
            Self::SixHours => "6h",
            Self::TwelveHours => "12h",
        }
    }

    pub fn hours(self) -> i64 {
        match self {
            Self::OneHour => 1,
            Self::SixHours => 6,
            Self::TwelveHours => 12,
        }
    }

    pub fn price(self) -> i64 {
        match self {
            Self::OneHour => 1500,
            Self::SixHours => 6000,
            Self::TwelveHours => 10000,
        }
    }

    pub fn duration(self) -> Duration {
        Duration::hours(self.hours())
    }
}
