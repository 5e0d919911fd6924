//! Reroll queue bot.
//!
//! Members register in-game friend codes and toggle them online through Discord
//! slash commands. The set of online codes is published to a GitHub repository that
//! reroll scripts read, and webhook heartbeats from those scripts are policed for
//! forbidden techniques, stalls and packs outside the whitelist.
//!
//! # Architecture
//!
//! - **Bot Layer** (`bot/`) - Slash commands, the heartbeat listener and Discord events
//! - **Service Layer** (`service/`) - Registry operations, publishing, moderation and policing
//! - **Data Layer** (`data/`) - Local registry and whitelist files, the remote repository store
//! - **Model Layer** (`model/`) - Registry document, friend codes, heartbeats and the whitelist
//! - **Error Layer** (`error/`) - Application error types and member-facing messages
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (registry store, whitelist, policer)
//! - **Startup** (`startup`) - HTTP client, remote store, resync and the liveness server
//! - **Router** (`router`) - Liveness endpoint
//! - **Scheduler** (`scheduler/`) - Cron jobs for ban expiry, republishing, channel names and purges
//!
//! # Write Flow
//!
//! 1. **Bot** receives a command and calls a service
//! 2. **Service** runs a mutation through the registry store
//! 3. **Registry store** validates, saves locally, mirrors the registry and republishes
//!    the online set when it changed, all under one lock
//! 4. **Bot** applies Discord side effects (roles, channel overwrites) and replies

pub mod bot;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
