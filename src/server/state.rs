//! Application state shared across event handlers and scheduled jobs.
//!
//! The state is built once during startup and cloned into the Discord event handler
//! and every cron job. All fields are reference-counted or share their contents
//! across clones, so cloning never duplicates the registry or the whitelist.

use std::sync::Arc;

use crate::server::{
    config::Config,
    service::{heartbeat::HeartbeatPolicer, registry::RegistryStore, whitelist::WhitelistService},
};

#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded from the environment at startup.
    pub config: Arc<Config>,

    /// The single owner of the registry document.
    ///
    /// Every mutation goes through [`RegistryStore::update`], which also mirrors and
    /// republishes the result.
    pub store: Arc<RegistryStore>,

    /// Pack whitelist consulted by the heartbeat policer.
    pub whitelist: WhitelistService,

    /// Heartbeat rules built from the policer configuration.
    pub policer: Arc<HeartbeatPolicer>,
}

impl AppState {
    /// Creates the application state.
    ///
    /// # Arguments
    /// - `config` - Application configuration
    /// - `store` - Registry store
    /// - `whitelist` - Whitelist service, loaded or not
    ///
    /// # Returns
    /// - `AppState` - State with a policer built from `config.policer`
    pub fn new(config: Config, store: RegistryStore, whitelist: WhitelistService) -> Self {
        let policer = HeartbeatPolicer::new(&config.policer);
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            whitelist,
            policer: Arc::new(policer),
        }
    }
}
