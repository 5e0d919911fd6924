//! Service layer for business logic and orchestration.
//!
//! Services sit between the Discord surface (commands, message handlers, scheduled
//! jobs) and the data layer. Registry mutations all go through
//! [`registry::RegistryStore`], which serializes them and hands every changed
//! document to [`publisher::PresencePublisher`]. Discord-side effects live in
//! [`discord::DiscordService`] and are applied by callers after the registry write.
//!
//! - **member** - Registration, code changes, status toggles
//! - **moderation** - Temporary bans, ban sweep, policer bans
//! - **heartbeat** - Heartbeat rules and their application
//! - **whitelist** - Permitted packs
//! - **vip** - Remote VIP list maintenance
//! - **build** - Build uploads

pub mod build;
pub mod discord;
pub mod heartbeat;
pub mod member;
pub mod moderation;
pub mod publisher;
pub mod registry;
pub mod vip;
pub mod whitelist;
