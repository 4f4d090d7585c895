use crate::{
    data::{guild::GuildConfigRepository, store::Database},
    error::AppError,
    model::guild::{ChannelKind, RoleKind},
};
use test_utils::{builder::TestBuilder, factory::guild::GuildDocFactory};

mod channel;
mod colour_role;
mod role;
