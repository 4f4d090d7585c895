use std::path::PathBuf;

use crate::error::{config::ConfigError, AppError};

const DEFAULT_DATABASE_PATH: &str = "data/database.json";
const DEFAULT_LOG_LEVEL: &str = "info";

pub struct Config {
    pub discord_token: String,

    /// Home guild; slash commands are registered there instead of globally when set.
    pub dev_guild_id: Option<u64>,

    pub database_path: PathBuf,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let discord_token = var("DISCORD_TOKEN")
            .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_TOKEN".to_string()))?;

        let dev_guild_id = match var("DEV_GUILD_ID") {
            Some(value) => Some(value.trim().parse::<u64>().map_err(|_| {
                ConfigError::InvalidEnvVar {
                    name: "DEV_GUILD_ID".to_string(),
                    value,
                }
            })?),
            None => None,
        };

        Ok(Self {
            discord_token,
            dev_guild_id,
            database_path: var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}
