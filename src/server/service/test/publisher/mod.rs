use test_utils::{builder::TestBuilder, factory::user::UserFactory};

use super::{paths, publisher_for};
use crate::server::{
    config::VerifyConfig,
    data::registry::RegistryRepository,
    error::AppError,
    model::{friend_code::FriendCode, registry::Registry},
    service::publisher::{PresencePublisher, Propagation},
};

mod pull;
mod republish;
mod verify_propagation;

async fn load(test: &test_utils::context::TestContext) -> Registry {
    RegistryRepository::new(&test.registry_path()).load().await
}
