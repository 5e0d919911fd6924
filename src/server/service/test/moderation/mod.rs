use chrono::{DateTime, Duration, Utc};
use test_utils::{builder::TestBuilder, factory::user::UserFactory};

use super::store_for;
use crate::server::{
    error::{registry::RegistryError, AppError},
    service::moderation::{ModerationService, MAX_BAN_HOURS},
};

mod auto_ban;
mod tempban;
