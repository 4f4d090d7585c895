//! Guild record factory.
//!
//! Builds guild records in the persisted JSON shape, starting from the default schema.

use serde_json::{json, Map, Value};

/// Factory for creating guild records with customizable configuration and users.
///
/// Identifiers are written as strings, matching how the store persists them.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::guild::GuildDocFactory;
///
/// let guild = GuildDocFactory::new()
///     .general_channel(111)
///     .mute_role(222)
///     .colour_role(333, "Crimson")
///     .build();
/// ```
pub struct GuildDocFactory {
    fields: Map<String, Value>,
    users: Map<String, Value>,
    colour_roles: Map<String, Value>,
}

impl GuildDocFactory {
    /// Creates a new factory holding the default guild schema with no users.
    ///
    /// # Returns
    /// - `GuildDocFactory` - Factory with every configuration field set to null
    pub fn new() -> Self {
        let Value::Object(fields) = json!({
            "general_channel": null,
            "welcome_channel": null,
            "goodbye_channel": null,
            "whisper_channel": null,
            "log_channel": null,
            "intros_channel": null,
            "last_intro_id": null,
            "tier_1_role": null,
            "tier_2_role": null,
            "tier_3_role": null,
            "bump_role": null,
            "mute_role": null,
            "bot_channel": null,
            "colour_channel": null,
        }) else {
            unreachable!("json! object literal always produces an object")
        };

        Self {
            fields,
            users: Map::new(),
            colour_roles: Map::new(),
        }
    }

    /// Sets the general channel.
    pub fn general_channel(self, channel_id: u64) -> Self {
        self.id_field("general_channel", channel_id)
    }

    /// Sets the log channel.
    pub fn log_channel(self, channel_id: u64) -> Self {
        self.id_field("log_channel", channel_id)
    }

    /// Sets the bot channel.
    pub fn bot_channel(self, channel_id: u64) -> Self {
        self.id_field("bot_channel", channel_id)
    }

    /// Sets the mute role.
    pub fn mute_role(self, role_id: u64) -> Self {
        self.id_field("mute_role", role_id)
    }

    /// Sets the bump role.
    pub fn bump_role(self, role_id: u64) -> Self {
        self.id_field("bump_role", role_id)
    }

    /// Sets the role granted at the given tier.
    ///
    /// # Arguments
    /// - `tier` - Tier number, 1 to 3
    /// - `role_id` - Discord role ID
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn tier_role(self, tier: u8, role_id: u64) -> Self {
        self.id_field(&format!("tier_{}_role", tier), role_id)
    }

    /// Registers a colour role.
    pub fn colour_role(mut self, role_id: u64, name: &str) -> Self {
        self.colour_roles
            .insert(role_id.to_string(), Value::String(name.to_string()));
        self
    }

    /// Adds a user record under this guild.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID used as the record key
    /// - `user` - User record, typically from `UserDocFactory::build()`
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn user(mut self, user_id: u64, user: Value) -> Self {
        self.users.insert(user_id.to_string(), user);
        self
    }

    /// Removes a configuration field so the record is missing it on disk.
    pub fn without(mut self, name: &str) -> Self {
        self.fields.remove(name);
        self
    }

    /// Builds the guild record.
    pub fn build(mut self) -> Value {
        self.fields
            .insert("colour_roles".to_string(), Value::Object(self.colour_roles));
        self.fields
            .insert("users".to_string(), Value::Object(self.users));
        Value::Object(self.fields)
    }

    fn id_field(mut self, name: &str, id: u64) -> Self {
        self.fields
            .insert(name.to_string(), Value::String(id.to_string()));
        self
    }
}

impl Default for GuildDocFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a guild record with default values and no users.
pub fn create_guild_doc() -> Value {
    GuildDocFactory::new().build()
}
