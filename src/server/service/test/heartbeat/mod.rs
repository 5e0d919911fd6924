use test_utils::{builder::TestBuilder, factory::user::UserFactory};

use super::{remote_for, store_for};
use crate::server::{
    config::PolicerConfig,
    error::AppError,
    model::{
        heartbeat::{HeartbeatSample, Violation},
        whitelist::Whitelist,
    },
    service::{
        heartbeat::{HeartbeatOutcome, HeartbeatPolicer, HeartbeatService},
        whitelist::WhitelistService,
    },
};

mod process;

fn policer() -> HeartbeatPolicer {
    HeartbeatPolicer::new(&PolicerConfig {
        stall_threshold_minutes: 25,
        forbidden_techniques: vec!["inject".to_string()],
        signature: "Packs:".to_string(),
    })
}
