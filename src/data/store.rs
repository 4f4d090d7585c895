//! JSON document store.
//!
//! The whole state of the bot lives in one document keyed by guild id. It is loaded once at
//! startup and every mutation rewrites the complete snapshot through a temporary file and a
//! rename, so a crash mid-write never leaves a truncated document behind.

use serde::Deserialize;
use serde_json::Value;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use tokio::sync::Mutex;

use crate::{
    error::{store::StoreError, AppError},
    model::{guild::GuildRecord, user::UserRecord},
};

/// Key of the table written by the previous document-database based layout.
const LEGACY_TABLE: &str = "_default";

/// Row of the legacy table layout.
#[derive(Deserialize)]
struct LegacyRow {
    guild_id: String,
    #[serde(default)]
    data: GuildRecord,
}

/// One user record as yielded by `Database::users`.
#[derive(Debug, Clone, PartialEq)]
pub struct UserEntry {
    pub guild_id: u64,
    pub user_id: u64,
    pub record: UserRecord,
}

/// Guild-keyed document store with whole-snapshot persistence.
///
/// All access is serialized through an async mutex held for the full read-modify-flush
/// sequence of each operation.
pub struct Database {
    path: PathBuf,
    guilds: Mutex<BTreeMap<String, GuildRecord>>,
}

impl Database {
    /// Opens the store at `path`.
    ///
    /// A missing or empty file yields an empty store. Records missing fields are filled with
    /// schema defaults as they are read; call `migrate()` to persist the backfilled form.
    ///
    /// # Arguments
    /// - `path` - Location of the JSON document
    ///
    /// # Returns
    /// - `Ok(Database)` - Store loaded into memory
    /// - `Err(AppError::StoreErr)` - File unreadable or not a valid document
    #[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(source) => return Err(StoreError::Io { path, source }.into()),
        };

        let guilds = if raw.trim().is_empty() {
            BTreeMap::new()
        } else {
            let value: Value = serde_json::from_str(&raw).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?;
            Self::decode(&path, value)?
        };

        tracing::info!("Loaded {} guild records from {}", guilds.len(), path.display());

        Ok(Self {
            path,
            guilds: Mutex::new(guilds),
        })
    }

    fn decode(path: &Path, value: Value) -> Result<BTreeMap<String, GuildRecord>, AppError> {
        let json_err = |source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        };

        let Some(table) = value.get(LEGACY_TABLE) else {
            return Ok(serde_json::from_value(value).map_err(json_err)?);
        };

        let rows: BTreeMap<String, LegacyRow> =
            serde_json::from_value(table.clone()).map_err(json_err)?;
        tracing::info!("Importing {} guilds from legacy table layout", rows.len());

        Ok(rows
            .into_values()
            .map(|row| (row.guild_id, row.data))
            .collect())
    }

    /// Backfills every record to the current schema and persists the result.
    ///
    /// Defaults are applied while loading, so this normalises the durable copy: legacy
    /// layouts are rewritten guild-keyed, missing fields are written out, and legacy integer
    /// warning counts become empty lists. Running it again produces identical output.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of user records in the store
    /// - `Err(AppError::StoreErr)` - Failed to write the document
    #[tracing::instrument(skip(self))]
    pub async fn migrate(&self) -> Result<usize, AppError> {
        let guilds = self.guilds.lock().await;

        let users: usize = guilds.values().map(|guild| guild.users.len()).sum();
        self.write_snapshot(&guilds).await?;

        tracing::info!(
            "Migrated {} guilds and {} users to the current schema",
            guilds.len(),
            users
        );

        Ok(users)
    }

    /// Writes the current snapshot to disk.
    pub async fn flush(&self) -> Result<(), AppError> {
        let guilds = self.guilds.lock().await;
        self.write_snapshot(&guilds).await
    }

    #[tracing::instrument(skip(self, guilds), fields(guilds = guilds.len()))]
    async fn write_snapshot(&self, guilds: &BTreeMap<String, GuildRecord>) -> Result<(), AppError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        let bytes = serde_json::to_vec_pretty(guilds).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
            }
        }

        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &bytes).await.map_err(io_err)?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(io_err)?;

        tracing::debug!("Flushed {} bytes to {}", bytes.len(), self.path.display());

        Ok(())
    }

    /// Persists `next` and only then makes it the in-memory state.
    ///
    /// A failed write leaves both the durable copy and the in-memory map as they were.
    async fn commit(
        &self,
        guilds: &mut BTreeMap<String, GuildRecord>,
        next: BTreeMap<String, GuildRecord>,
    ) -> Result<(), AppError> {
        self.write_snapshot(&next).await?;
        *guilds = next;

        Ok(())
    }

    /// Fetches a guild record, creating it with defaults if absent.
    ///
    /// Creation is persisted immediately.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    ///
    /// # Returns
    /// - `Ok(GuildRecord)` - Copy of the guild record
    /// - `Err(AppError::StoreErr)` - Failed to persist a newly created record
    pub async fn get_guild(&self, guild_id: u64) -> Result<GuildRecord, AppError> {
        let mut guilds = self.guilds.lock().await;
        let key = guild_id.to_string();

        if let Some(guild) = guilds.get(&key) {
            return Ok(guild.clone());
        }

        let guild = GuildRecord::default();
        let mut next = guilds.clone();
        next.insert(key, guild.clone());
        self.commit(&mut guilds, next).await?;

        Ok(guild)
    }

    /// Fetches a user record, creating it (and its guild) with defaults if absent.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `user_id` - Discord user ID
    ///
    /// # Returns
    /// - `Ok(UserRecord)` - Copy of the user record
    /// - `Err(AppError::StoreErr)` - Failed to persist a newly created record
    pub async fn get_user(&self, guild_id: u64, user_id: u64) -> Result<UserRecord, AppError> {
        let mut guilds = self.guilds.lock().await;

        if let Some(user) = guilds
            .get(&guild_id.to_string())
            .and_then(|guild| guild.users.get(&user_id.to_string()))
        {
            return Ok(user.clone());
        }

        let mut next = guilds.clone();
        let user = next
            .entry(guild_id.to_string())
            .or_default()
            .users
            .entry(user_id.to_string())
            .or_default()
            .clone();
        self.commit(&mut guilds, next).await?;

        Ok(user)
    }

    /// Applies a change to a guild record and persists the full snapshot.
    ///
    /// The record is created with defaults first if absent. The change is made on a copy and
    /// only kept once the snapshot is on disk.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `change` - Mutation applied to the record; its return value is passed through
    ///
    /// # Returns
    /// - `Ok(R)` - Value returned by `change`
    /// - `Err(AppError::StoreErr)` - Failed to persist the snapshot
    pub async fn update_guild<R>(
        &self,
        guild_id: u64,
        change: impl FnOnce(&mut GuildRecord) -> R,
    ) -> Result<R, AppError> {
        let mut guilds = self.guilds.lock().await;

        let mut next = guilds.clone();
        let result = change(next.entry(guild_id.to_string()).or_default());
        self.commit(&mut guilds, next).await?;

        Ok(result)
    }

    /// Applies a change to a user record and persists the full snapshot.
    ///
    /// The guild and user records are created with defaults first if absent. If the write
    /// fails the change is discarded.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `user_id` - Discord user ID
    /// - `change` - Mutation applied to the record; its return value is passed through
    ///
    /// # Returns
    /// - `Ok(R)` - Value returned by `change`
    /// - `Err(AppError::StoreErr)` - Failed to persist the snapshot
    pub async fn update_user<R>(
        &self,
        guild_id: u64,
        user_id: u64,
        change: impl FnOnce(&mut UserRecord) -> R,
    ) -> Result<R, AppError> {
        let mut guilds = self.guilds.lock().await;

        let mut next = guilds.clone();
        let user = next
            .entry(guild_id.to_string())
            .or_default()
            .users
            .entry(user_id.to_string())
            .or_default();
        let result = change(user);
        self.commit(&mut guilds, next).await?;

        Ok(result)
    }

    /// Snapshot of every stored user record across all guilds.
    ///
    /// Records whose guild or user key is not a valid snowflake are skipped with a warning.
    pub async fn users(&self) -> Vec<UserEntry> {
        let guilds = self.guilds.lock().await;

        let mut entries = Vec::new();
        for (guild_key, guild) in guilds.iter() {
            let Ok(guild_id) = guild_key.parse::<u64>() else {
                tracing::warn!("Skipping guild with invalid id '{}'", guild_key);
                continue;
            };

            for (user_key, record) in guild.users.iter() {
                let Ok(user_id) = user_key.parse::<u64>() else {
                    tracing::warn!(
                        "Skipping user with invalid id '{}' in guild {}",
                        user_key,
                        guild_id
                    );
                    continue;
                };

                entries.push(UserEntry {
                    guild_id,
                    user_id,
                    record: record.clone(),
                });
            }
        }

        entries
    }

    /// Applies a change to every stored user record and persists once.
    ///
    /// Records with non-snowflake keys are left untouched. The snapshot is only written if
    /// `change` reported a modification for at least one record, and a failed write discards
    /// every modification.
    ///
    /// # Arguments
    /// - `change` - Called with guild id, user id and the record; returns whether it changed
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of records `change` reported as modified
    /// - `Err(AppError::StoreErr)` - Failed to persist the snapshot
    pub async fn update_users(
        &self,
        mut change: impl FnMut(u64, u64, &mut UserRecord) -> bool,
    ) -> Result<usize, AppError> {
        let mut guilds = self.guilds.lock().await;

        let mut next = guilds.clone();
        let mut modified = 0;
        for (guild_key, guild) in next.iter_mut() {
            let Ok(guild_id) = guild_key.parse::<u64>() else {
                continue;
            };
            for (user_key, record) in guild.users.iter_mut() {
                let Ok(user_id) = user_key.parse::<u64>() else {
                    continue;
                };
                if change(guild_id, user_id, record) {
                    modified += 1;
                }
            }
        }

        if modified > 0 {
            self.commit(&mut guilds, next).await?;
        }

        Ok(modified)
    }
}
