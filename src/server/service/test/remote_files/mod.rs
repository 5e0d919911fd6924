use test_utils::builder::TestBuilder;

use super::remote_for;
use crate::server::{
    error::{registry::RegistryError, remote::RemoteError, AppError},
    service::{build::BuildService, vip::VipService},
};

mod build;
mod vip;
