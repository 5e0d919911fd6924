//! Discord bot integration.
//!
//! The bot owns the member-facing surface of the queue: slash commands for
//! registration and presence, admin commands for moderation and repository
//! maintenance, and the heartbeat listener that polices webhook reports.
//!
//! The bot is initialized during startup and runs in a separate tokio task. Its HTTP
//! client is shared with the scheduler so cron jobs can rename channels, lift
//! permission overwrites and purge messages without a second connection.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild and role information for presence role handling
//! - `GUILD_MESSAGES` - Heartbeat webhook messages and the `!sync` text command
//! - `GUILD_MEMBERS` - Member role updates (privileged intent)
//! - `MESSAGE_CONTENT` - Heartbeat bodies (privileged intent)
//!
//! Note: privileged intents must be explicitly enabled in the Discord Developer
//! Portal for the bot application.

pub mod command;
pub mod handler;
pub mod start;
