use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory::user::UserFactory};

use super::store_for;
use crate::server::{
    error::{registry::RegistryError, AppError},
    model::user::{RegisterUserParam, Slot, SlotStatus},
    service::member::MemberService,
};

mod change_code;
mod register;
mod set_status;
mod unregister;
