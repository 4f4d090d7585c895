use crate::{data::store::Database, error::AppError};
use serde_json::json;
use test_utils::{
    builder::TestBuilder,
    factory::{guild::GuildDocFactory, user::UserDocFactory},
};

mod get_guild;
mod get_user;
mod migrate;
mod open;
mod update_user;
mod update_users;
mod users;
