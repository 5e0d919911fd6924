use chrono::Utc;
use std::sync::Arc;
use test_utils::{builder::TestBuilder, factory::user::UserFactory};

use super::store_for;
use crate::server::{
    error::{registry::RegistryError, AppError},
    model::{
        heartbeat::HeartbeatSample,
        user::{RegisterUserParam, Slot, SlotStatus},
    },
};

mod resync;
mod update;

fn param(username: &str, code: &str) -> RegisterUserParam {
    RegisterUserParam {
        username: username.to_string(),
        friend_code: code.to_string(),
        instances: 2,
        prefix: String::new(),
        secondary_friend_code: None,
    }
}
