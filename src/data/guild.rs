//! Guild configuration repository.
//!
//! Provides field-level accessors over the guild record: channel and role slots, the tier
//! roles, the sticky intro message and the colour role catalogue.

use crate::{
    data::store::Database,
    error::AppError,
    model::guild::{ChannelKind, RoleKind},
    util::parse::{parse_optional_id, parse_u64_from_string},
};

/// Repository providing access to per-guild configuration.
pub struct GuildConfigRepository<'a> {
    db: &'a Database,
}

impl<'a> GuildConfigRepository<'a> {
    /// Creates a new GuildConfigRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the store
    ///
    /// # Returns
    /// - `GuildConfigRepository` - New repository instance
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Gets the configured channel of a kind.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `kind` - Which channel slot to read
    ///
    /// # Returns
    /// - `Ok(Some(u64))` - Configured channel id
    /// - `Ok(None)` - Channel not configured
    /// - `Err(AppError::InternalErr)` - Stored id is not a valid snowflake
    pub async fn get_channel(
        &self,
        guild_id: u64,
        kind: ChannelKind,
    ) -> Result<Option<u64>, AppError> {
        let guild = self.db.get_guild(guild_id).await?;
        parse_optional_id(kind.get(&guild))
    }

    /// Sets the channel of a kind.
    pub async fn set_channel(
        &self,
        guild_id: u64,
        kind: ChannelKind,
        channel_id: u64,
    ) -> Result<(), AppError> {
        self.db
            .update_guild(guild_id, |guild| {
                *kind.slot(guild) = Some(channel_id.to_string());
            })
            .await
    }

    /// Gets the configured role of a kind.
    ///
    /// # Returns
    /// - `Ok(Some(u64))` - Configured role id
    /// - `Ok(None)` - Role not configured
    /// - `Err(AppError::InternalErr)` - Stored id is not a valid snowflake
    pub async fn get_role(&self, guild_id: u64, kind: RoleKind) -> Result<Option<u64>, AppError> {
        let guild = self.db.get_guild(guild_id).await?;
        parse_optional_id(kind.get(&guild))
    }

    /// Sets the role of a kind.
    pub async fn set_role(
        &self,
        guild_id: u64,
        kind: RoleKind,
        role_id: u64,
    ) -> Result<(), AppError> {
        self.db
            .update_guild(guild_id, |guild| {
                *kind.slot(guild) = Some(role_id.to_string());
            })
            .await
    }

    /// Gets the role granted at a tier.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `tier` - Tier number, 1 to 3
    ///
    /// # Returns
    /// - `Ok(Option<u64>)` - Configured role id, if any
    /// - `Err(AppError::BadRequest)` - Tier outside 1 to 3
    pub async fn get_tier_role(&self, guild_id: u64, tier: u8) -> Result<Option<u64>, AppError> {
        self.get_role(guild_id, tier_role_kind(tier)?).await
    }

    /// Sets the role granted at a tier.
    pub async fn set_tier_role(
        &self,
        guild_id: u64,
        tier: u8,
        role_id: u64,
    ) -> Result<(), AppError> {
        self.set_role(guild_id, tier_role_kind(tier)?, role_id).await
    }

    /// Gets the id of the sticky intro template message.
    pub async fn get_last_intro_id(&self, guild_id: u64) -> Result<Option<u64>, AppError> {
        let guild = self.db.get_guild(guild_id).await?;
        parse_optional_id(guild.last_intro_id.as_ref())
    }

    /// Sets or clears the id of the sticky intro template message.
    pub async fn set_last_intro_id(
        &self,
        guild_id: u64,
        message_id: Option<u64>,
    ) -> Result<(), AppError> {
        self.db
            .update_guild(guild_id, |guild| {
                guild.last_intro_id = message_id.map(|id| id.to_string());
            })
            .await
    }

    /// Lists the registered colour roles, ordered by display name.
    ///
    /// # Returns
    /// - `Ok(Vec<(u64, String)>)` - Role id and display name pairs
    /// - `Err(AppError::InternalErr)` - A stored role id is not a valid snowflake
    pub async fn get_colour_roles(&self, guild_id: u64) -> Result<Vec<(u64, String)>, AppError> {
        let guild = self.db.get_guild(guild_id).await?;

        let mut roles = guild
            .colour_roles
            .iter()
            .map(|(id, name)| Ok((parse_u64_from_string(id)?, name.clone())))
            .collect::<Result<Vec<_>, AppError>>()?;
        roles.sort_by(|a, b| a.1.to_lowercase().cmp(&b.1.to_lowercase()));

        Ok(roles)
    }

    /// Registers a colour role, replacing the display name if already registered.
    pub async fn add_colour_role(
        &self,
        guild_id: u64,
        role_id: u64,
        name: &str,
    ) -> Result<(), AppError> {
        self.db
            .update_guild(guild_id, |guild| {
                guild
                    .colour_roles
                    .insert(role_id.to_string(), name.to_string());
            })
            .await
    }

    /// Unregisters a colour role.
    ///
    /// # Returns
    /// - `Ok(true)` - Role was registered and has been removed
    /// - `Ok(false)` - Role was not registered
    pub async fn remove_colour_role(&self, guild_id: u64, role_id: u64) -> Result<bool, AppError> {
        self.db
            .update_guild(guild_id, |guild| {
                guild.colour_roles.remove(&role_id.to_string()).is_some()
            })
            .await
    }

    /// Finds a colour role by display name, ignoring case.
    pub async fn find_colour_role(
        &self,
        guild_id: u64,
        name: &str,
    ) -> Result<Option<u64>, AppError> {
        let roles = self.get_colour_roles(guild_id).await?;

        Ok(roles
            .into_iter()
            .find(|(_, role_name)| role_name.eq_ignore_ascii_case(name.trim()))
            .map(|(id, _)| id))
    }
}

fn tier_role_kind(tier: u8) -> Result<RoleKind, AppError> {
    RoleKind::for_tier(tier)
        .ok_or_else(|| AppError::BadRequest(format!("Tier must be 1, 2 or 3, got {}.", tier)))
}
