use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::user::UserRecord;

/// Per-guild configuration and the users tracked in that guild.
///
/// Identifiers are stored as strings, the way Discord serializes snowflakes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuildRecord {
    pub general_channel: Option<String>,
    pub welcome_channel: Option<String>,
    pub goodbye_channel: Option<String>,
    pub whisper_channel: Option<String>,
    pub log_channel: Option<String>,
    pub intros_channel: Option<String>,
    /// Message id of the sticky intro template currently posted in the intros channel.
    pub last_intro_id: Option<String>,
    pub tier_1_role: Option<String>,
    pub tier_2_role: Option<String>,
    pub tier_3_role: Option<String>,
    pub bump_role: Option<String>,
    pub mute_role: Option<String>,
    pub bot_channel: Option<String>,
    pub colour_channel: Option<String>,
    /// Self-assignable colour roles, role id to display name.
    pub colour_roles: BTreeMap<String, String>,
    /// User records keyed by user id.
    pub users: BTreeMap<String, UserRecord>,
}

/// Configurable channel slots of a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Welcome,
    Goodbye,
    General,
    Whisper,
    Log,
    Intros,
    Bot,
    Colour,
}

impl ChannelKind {
    /// All channel kinds in the order they are offered by the setup command.
    pub const ALL: [ChannelKind; 8] = [
        ChannelKind::Welcome,
        ChannelKind::Goodbye,
        ChannelKind::General,
        ChannelKind::Whisper,
        ChannelKind::Log,
        ChannelKind::Intros,
        ChannelKind::Bot,
        ChannelKind::Colour,
    ];

    /// Short choice value used by the setup command.
    pub fn choice(self) -> &'static str {
        match self {
            Self::Welcome => "wel",
            Self::Goodbye => "bye",
            Self::General => "gen",
            Self::Whisper => "whi",
            Self::Log => "log",
            Self::Intros => "intro",
            Self::Bot => "bot",
            Self::Colour => "color",
        }
    }

    /// Human readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Goodbye => "goodbye",
            Self::General => "general",
            Self::Whisper => "whisper",
            Self::Log => "log",
            Self::Intros => "intros",
            Self::Bot => "bot",
            Self::Colour => "colour",
        }
    }

    /// Parses a setup command choice value.
    pub fn from_choice(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.choice() == value)
    }

    pub fn get(self, guild: &GuildRecord) -> Option<&String> {
        self.field(guild).as_ref()
    }

    pub fn slot(self, guild: &mut GuildRecord) -> &mut Option<String> {
        match self {
            Self::Welcome => &mut guild.welcome_channel,
            Self::Goodbye => &mut guild.goodbye_channel,
            Self::General => &mut guild.general_channel,
            Self::Whisper => &mut guild.whisper_channel,
            Self::Log => &mut guild.log_channel,
            Self::Intros => &mut guild.intros_channel,
            Self::Bot => &mut guild.bot_channel,
            Self::Colour => &mut guild.colour_channel,
        }
    }

    fn field(self, guild: &GuildRecord) -> &Option<String> {
        match self {
            Self::Welcome => &guild.welcome_channel,
            Self::Goodbye => &guild.goodbye_channel,
            Self::General => &guild.general_channel,
            Self::Whisper => &guild.whisper_channel,
            Self::Log => &guild.log_channel,
            Self::Intros => &guild.intros_channel,
            Self::Bot => &guild.bot_channel,
            Self::Colour => &guild.colour_channel,
        }
    }
}

/// Configurable role slots of a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKind {
    Bump,
    Mute,
    Tier1,
    Tier2,
    Tier3,
}

impl RoleKind {
    /// Role granted when a member reaches `tier`.
    pub fn for_tier(tier: u8) -> Option<Self> {
        match tier {
            1 => Some(Self::Tier1),
            2 => Some(Self::Tier2),
            3 => Some(Self::Tier3),
            _ => None,
        }
    }

    /// Parses a setup command choice value (`bump` or `mute`).
    pub fn from_choice(value: &str) -> Option<Self> {
        match value {
            "bump" => Some(Self::Bump),
            "mute" => Some(Self::Mute),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Bump => "bump",
            Self::Mute => "mute",
            Self::Tier1 => "tier 1",
            Self::Tier2 => "tier 2",
            Self::Tier3 => "tier 3",
        }
    }

    pub fn get(self, guild: &GuildRecord) -> Option<&String> {
        match self {
            Self::Bump => guild.bump_role.as_ref(),
            Self::Mute => guild.mute_role.as_ref(),
            Self::Tier1 => guild.tier_1_role.as_ref(),
            Self::Tier2 => guild.tier_2_role.as_ref(),
            Self::Tier3 => guild.tier_3_role.as_ref(),
        }
    }

    pub fn slot(self, guild: &mut GuildRecord) -> &mut Option<String> {
        match self {
            Self::Bump => &mut guild.bump_role,
            Self::Mute => &mut guild.mute_role,
            Self::Tier1 => &mut guild.tier_1_role,
            Self::Tier2 => &mut guild.tier_2_role,
            Self::Tier3 => &mut guild.tier_3_role,
        }
    }
}
