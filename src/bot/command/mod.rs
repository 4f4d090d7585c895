//! Slash command definitions and their handlers.
//!
//! Each submodule exposes `register()` returning its command definitions and one `run`
//! function per top-level command. Handlers return `AppError`; the interaction handler
//! turns errors into ephemeral replies.

pub mod colour;
pub mod economy;
pub mod game;
pub mod moderation;
pub mod setup;
pub mod shop;
pub mod social;

use serenity::all::{
    CommandInteraction, Context, CreateCommand, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseMessage, PartialChannel, ResolvedOption, ResolvedValue, Role, User,
};

use crate::error::AppError;

/// Every slash command the bot registers.
pub fn all() -> Vec<CreateCommand> {
    let mut commands = Vec::new();
    commands.extend(economy::register());
    commands.extend(game::register());
    commands.extend(shop::register());
    commands.extend(colour::register());
    commands.extend(moderation::register());
    commands.extend(setup::register());
    commands.extend(social::register());
    commands
}

/// Typed access to a command's resolved options.
pub struct Options<'a> {
    options: Vec<ResolvedOption<'a>>,
}

impl<'a> Options<'a> {
    pub fn new(options: Vec<ResolvedOption<'a>>) -> Self {
        Self { options }
    }

    fn find(&self, name: &str) -> Option<&ResolvedValue<'a>> {
        self.options
            .iter()
            .find(|option| option.name == name)
            .map(|option| &option.value)
    }

    fn missing(name: &str) -> AppError {
        AppError::BadRequest(format!("Missing or invalid option `{}`.", name))
    }

    pub fn integer(&self, name: &str) -> Result<i64, AppError> {
        match self.find(name) {
            Some(ResolvedValue::Integer(value)) => Ok(*value),
            _ => Err(Self::missing(name)),
        }
    }

    pub fn string(&self, name: &str) -> Result<&'a str, AppError> {
        match self.find(name) {
            Some(ResolvedValue::String(value)) => Ok(*value),
            _ => Err(Self::missing(name)),
        }
    }

    pub fn optional_string(&self, name: &str) -> Option<&'a str> {
        match self.find(name) {
            Some(ResolvedValue::String(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn user(&self, name: &str) -> Result<&'a User, AppError> {
        self.optional_user(name).ok_or_else(|| Self::missing(name))
    }

    pub fn optional_user(&self, name: &str) -> Option<&'a User> {
        match self.find(name) {
            Some(ResolvedValue::User(user, _)) => Some(*user),
            _ => None,
        }
    }

    pub fn role(&self, name: &str) -> Result<&'a Role, AppError> {
        match self.find(name) {
            Some(ResolvedValue::Role(role)) => Ok(*role),
            _ => Err(Self::missing(name)),
        }
    }

    pub fn channel(&self, name: &str) -> Result<&'a PartialChannel, AppError> {
        match self.find(name) {
            Some(ResolvedValue::Channel(channel)) => Ok(*channel),
            _ => Err(Self::missing(name)),
        }
    }

    /// Splits off the invoked subcommand.
    pub fn subcommand(self) -> Result<(&'a str, Options<'a>), AppError> {
        let option = self
            .options
            .into_iter()
            .next()
            .ok_or_else(|| AppError::BadRequest("Missing subcommand.".to_string()))?;

        match option.value {
            ResolvedValue::SubCommand(options) => Ok((option.name, Options::new(options))),
            _ => Err(AppError::BadRequest("Missing subcommand.".to_string())),
        }
    }
}

/// Guild the command was used in; every command is guild-only.
pub fn guild_id(command: &CommandInteraction) -> Result<u64, AppError> {
    command
        .guild_id
        .map(|id| id.get())
        .ok_or_else(|| {
            AppError::BadRequest("This command can only be used in a server.".to_string())
        })
}

pub fn ephemeral(content: impl Into<String>) -> CreateInteractionResponseMessage {
    CreateInteractionResponseMessage::new()
        .content(content)
        .ephemeral(true)
}

pub fn embed_message(embed: CreateEmbed) -> CreateInteractionResponseMessage {
    CreateInteractionResponseMessage::new().embed(embed)
}

/// Sends the initial response to a command.
pub async fn reply(
    ctx: &Context,
    command: &CommandInteraction,
    message: CreateInteractionResponseMessage,
) -> Result<(), AppError> {
    command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await?;
    Ok(())
}
