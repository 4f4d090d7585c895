//! Typed administrative overrides of user record fields.

use crate::{
    error::AppError,
    model::user::UserRecord,
    util::time::{format_timestamp, parse_timestamp},
};

/// A single user record field together with its new value.
///
/// Built from the field name and raw text an administrator supplies; unknown names and
/// values of the wrong type are rejected before anything is written.
#[derive(Debug, Clone, PartialEq)]
pub enum UserField {
    Tier(u8),
    MessageCount(u64),
    Gold(i64),
    RouletteWins(u64),
    RouletteLosses(u64),
    BlackjackWins(u64),
    BlackjackLosses(u64),
    SlotsWins(u64),
    SlotsLosses(u64),
    LastDailyClaim(Option<String>),
    Streak(u64),
    MimicExpiry(Option<String>),
    BarrelExpiry(Option<String>),
}

impl UserField {
    /// Field names accepted by `parse`, in the order offered as command choices.
    pub const NAMES: [&'static str; 13] = [
        "tier",
        "message_count",
        "gold",
        "roulette_wins",
        "roulette_losses",
        "blackjack_wins",
        "blackjack_losses",
        "slots_wins",
        "slots_losses",
        "last_daily_claim",
        "streak",
        "mimic_expiry",
        "barrel_expiry",
    ];

    /// Parses a field name and textual value.
    ///
    /// Timestamp fields accept `none` to clear them, or any ISO-8601 date-time which is
    /// normalised to UTC.
    ///
    /// # Arguments
    /// - `name` - Field name, one of `UserField::NAMES`
    /// - `value` - Raw value as typed by the administrator
    ///
    /// # Returns
    /// - `Ok(UserField)` - Typed field assignment
    /// - `Err(AppError::BadRequest)` - Unknown field or value not valid for the field type
    pub fn parse(name: &str, value: &str) -> Result<Self, AppError> {
        let value = value.trim();
        let field = match name {
            "tier" => {
                let tier: u8 = parse_number(name, value)?;
                if !(1..=3).contains(&tier) {
                    return Err(AppError::BadRequest(
                        "Tier must be 1, 2 or 3.".to_string(),
                    ));
                }
                Self::Tier(tier)
            }
            "message_count" => Self::MessageCount(parse_number(name, value)?),
            "gold" => Self::Gold(parse_number(name, value)?),
            "roulette_wins" => Self::RouletteWins(parse_number(name, value)?),
            "roulette_losses" => Self::RouletteLosses(parse_number(name, value)?),
            "blackjack_wins" => Self::BlackjackWins(parse_number(name, value)?),
            "blackjack_losses" => Self::BlackjackLosses(parse_number(name, value)?),
            "slots_wins" => Self::SlotsWins(parse_number(name, value)?),
            "slots_losses" => Self::SlotsLosses(parse_number(name, value)?),
            "streak" => Self::Streak(parse_number(name, value)?),
            "last_daily_claim" => Self::LastDailyClaim(parse_optional_timestamp(name, value)?),
            "mimic_expiry" => Self::MimicExpiry(parse_optional_timestamp(name, value)?),
            "barrel_expiry" => Self::BarrelExpiry(parse_optional_timestamp(name, value)?),
            _ => {
                return Err(AppError::BadRequest(format!("Unknown field `{}`.", name)));
            }
        };

        Ok(field)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Tier(_) => "tier",
            Self::MessageCount(_) => "message_count",
            Self::Gold(_) => "gold",
            Self::RouletteWins(_) => "roulette_wins",
            Self::RouletteLosses(_) => "roulette_losses",
            Self::BlackjackWins(_) => "blackjack_wins",
            Self::BlackjackLosses(_) => "blackjack_losses",
            Self::SlotsWins(_) => "slots_wins",
            Self::SlotsLosses(_) => "slots_losses",
            Self::LastDailyClaim(_) => "last_daily_claim",
            Self::Streak(_) => "streak",
            Self::MimicExpiry(_) => "mimic_expiry",
            Self::BarrelExpiry(_) => "barrel_expiry",
        }
    }

    /// Writes the value into a user record.
    pub fn apply(self, user: &mut UserRecord) {
        match self {
            Self::Tier(v) => user.tier = v,
            Self::MessageCount(v) => user.message_count = v,
            Self::Gold(v) => user.gold = v,
            Self::RouletteWins(v) => user.roulette_wins = v,
            Self::RouletteLosses(v) => user.roulette_losses = v,
            Self::BlackjackWins(v) => user.blackjack_wins = v,
            Self::BlackjackLosses(v) => user.blackjack_losses = v,
            Self::SlotsWins(v) => user.slots_wins = v,
            Self::SlotsLosses(v) => user.slots_losses = v,
            Self::LastDailyClaim(v) => user.last_daily_claim = v,
            Self::Streak(v) => user.streak = v,
            Self::MimicExpiry(v) => user.mimic_expiry = v,
            Self::BarrelExpiry(v) => user.barrel_expiry = v,
        }
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, AppError> {
    value.parse::<T>().map_err(|_| {
        AppError::BadRequest(format!(
            "`{}` is not a valid value for `{}`.",
            value, name
        ))
    })
}

fn parse_optional_timestamp(name: &str, value: &str) -> Result<Option<String>, AppError> {
    if value.eq_ignore_ascii_case("none") || value.eq_ignore_ascii_case("null") {
        return Ok(None);
    }

    match parse_timestamp(value) {
        Some(at) => Ok(Some(format_timestamp(at))),
        None => Err(AppError::BadRequest(format!(
            "`{}` is not a valid timestamp for `{}`. Use ISO-8601 or `none`.",
            value, name
        ))),
    }
}
