//! Error types for the bot.
//!
//! `AppError` is the top-level error type that wraps domain-specific errors. Command and
//! event handlers are the boundary: they log every `AppError` with guild and user context
//! and turn `BadRequest`/`NotFound` into user-facing replies, while everything else becomes
//! a generic "try again" notice.

pub mod config;
pub mod internal;
pub mod store;

use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError, store::StoreError};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    ///
    /// Fatal at startup; never produced after the bot is running.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Failure reading or writing the persistent store document.
    #[error(transparent)]
    StoreErr(#[from] StoreError),

    /// Unexpected internal failure such as a corrupt identifier in the store.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size. Permission failures on member edits arrive here and are
    /// logged by the caller rather than propagated to the user.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Required configuration (channel or role) has not been set up for a guild.
    ///
    /// # Fields
    /// - Message describing what is missing, shown to the user
    #[error("{0}")]
    NotFound(String),

    /// Rejected user input: invalid bet, insufficient funds, unknown field and so on.
    ///
    /// Always raised before any state is mutated.
    ///
    /// # Fields
    /// - Message shown to the user
    #[error("{0}")]
    BadRequest(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Message safe to show the invoking user.
    ///
    /// Rejections carry their own message; every other variant is an internal failure
    /// and gets a generic notice so internals never leak into chat.
    pub fn user_message(&self) -> String {
        match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => msg.clone(),
            _ => "Something went wrong, please try again later.".to_string(),
        }
    }

    /// Whether this error is an expected rejection rather than a failure worth logging
    /// at error level.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::BadRequest(_) | Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that rejections surface their own message.
    ///
    /// Expected: BadRequest text is returned verbatim and flagged as a rejection
    #[test]
    fn rejection_keeps_message() {
        let err = AppError::BadRequest("You don't have enough gold!".to_string());

        assert!(err.is_rejection());
        assert_eq!(err.user_message(), "You don't have enough gold!");
    }

    /// Tests that internal failures are hidden behind a generic notice.
    ///
    /// Expected: Configuration errors produce the generic retry message
    #[test]
    fn internal_error_is_generic() {
        let err = AppError::from(ConfigError::MissingEnvVar("DISCORD_TOKEN".to_string()));

        assert!(!err.is_rejection());
        assert_eq!(
            err.user_message(),
            "Something went wrong, please try again later."
        );
    }
}
