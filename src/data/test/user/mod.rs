use crate::{
    data::{store::Database, user::UserRepository},
    error::AppError,
    model::{effect::EffectKind, field::UserField, game::GameKind, user::Warning},
};
use chrono::{Duration, Utc};
use test_utils::{
    builder::TestBuilder,
    factory::{guild::GuildDocFactory, user::UserDocFactory},
};

mod effect_expiry;
mod gold;
mod progress;
mod set_field;
mod settle_game;
mod warnings;
