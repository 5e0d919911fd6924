use test_utils::builder::TestBuilder;

use super::remote_for;
use crate::server::{error::AppError, service::whitelist::WhitelistService};

mod set_entry;

fn service_for(test: &test_utils::context::TestContext) -> WhitelistService {
    WhitelistService::new(test.whitelist_path(), remote_for(test), "whitelist.txt")
}
