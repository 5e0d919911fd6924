//! Environment-based configuration.
//!
//! `Config::from_env` reads the process environment once at startup. Parsing goes
//! through [`Config::from_lookup`] so tests can supply variables from a map.

use serenity::all::ChannelId;
use std::{num::NonZeroU64, time::Duration};
use url::Url;

use crate::server::{
    data::remote::github::GITHUB_API_URL,
    error::{config::ConfigError, AppError},
    service::moderation::MAX_BAN_HOURS,
    util::parse::{parse_env_in_range, parse_env_value, parse_id_list, parse_word_list},
};

/// Upper bound of `PURGE_MAX_AGE_HOURS`, one year.
pub const MAX_PURGE_AGE_HOURS: i64 = 24 * 365;

/// Repository paths the bot reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePaths {
    /// Full registry document
    pub registry: String,
    /// Online friend codes consumed by reroll scripts
    pub online: String,
    /// Duplicate of the online file under a second name
    pub online_copy: String,
    /// Detected VIP friend codes
    pub vip: String,
    pub whitelist: String,
    /// Directory uploaded builds are stored under
    pub build_dir: String,
}

/// GitHub repository settings. Absent when no token or repository is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubConfig {
    pub token: String,
    /// Repository in `owner/name` form
    pub repo: String,
    pub branch: String,
    pub api_url: String,
}

/// How the public mirror is polled after a member goes online.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyConfig {
    /// Raw mirror base URL; the online path is appended. `None` skips verification.
    pub mirror_url: Option<Url>,
    pub interval: Duration,
    pub attempts: u32,
    /// Wall-clock timeout of each poll request
    pub timeout: Duration,
}

/// Channels the bot acts on. Every channel is optional; features tied to a missing
/// channel are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Channel banned members lose access to
    pub checkin: Option<ChannelId>,
    /// Channel reroll tools post heartbeats to
    pub heartbeat: Option<ChannelId>,
    /// Channel accepted heartbeats are forwarded to
    pub transparency: Option<ChannelId>,
    /// Channel policer violations are reported to
    pub alert: Option<ChannelId>,
    /// Channel renamed to show the online count
    pub status: Option<ChannelId>,
    /// Channel renamed to show pack throughput
    pub throughput: Option<ChannelId>,
    /// Channels whose old messages are purged
    pub purge: Vec<ChannelId>,
}

/// Heartbeat policer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicerConfig {
    /// Minimum growth of elapsed minutes without new packs that counts as stalling
    pub stall_threshold_minutes: u32,
    /// Lowercase substrings that mark a forbidden reroll technique
    pub forbidden_techniques: Vec<String>,
    /// Text a message must contain to be treated as a heartbeat
    pub signature: String,
}

pub struct Config {
    pub discord_token: String,
    pub port: u16,

    /// Local registry document
    pub data_file: String,
    /// Local whitelist file
    pub whitelist_file: String,

    pub github: Option<GitHubConfig>,
    pub paths: RemotePaths,
    pub verify: VerifyConfig,

    pub channels: ChannelConfig,
    pub policer: PolicerConfig,

    /// Role granted to members with an online slot
    pub presence_role: String,
    /// Category new members get a private channel under
    pub member_category: String,
    /// Default length of `/rg_tempban`
    pub ban_hours: i64,
    /// Messages older than this are purged
    pub purge_max_age_hours: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::from_lookup(|name| std::env::var(name).ok())?)
    }

    /// Builds the configuration from a variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and every value parsed
    /// - `Err(ConfigError::MissingEnvVar)` - `DISCORD_TOKEN` is not set
    /// - `Err(ConfigError::InvalidEnvVar)` - A numeric, ID or URL value is malformed
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let string_or = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());
        let channel = |name: &str| -> Result<Option<ChannelId>, ConfigError> {
            get(name)
                .map(|value| parse_env_value::<NonZeroU64>(name, &value).map(ChannelId::from))
                .transpose()
        };

        let discord_token = get("DISCORD_TOKEN")
            .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_TOKEN".to_string()))?;

        let github = match (get("GITHUB_TOKEN"), get("GITHUB_REPO")) {
            (Some(token), Some(repo)) => Some(GitHubConfig {
                token,
                repo,
                branch: string_or("GITHUB_BRANCH", "main"),
                api_url: string_or("GITHUB_API_URL", GITHUB_API_URL),
            }),
            _ => None,
        };

        let mirror_url = get("MIRROR_URL")
            .map(|value| {
                Url::parse(&value).map_err(|_| ConfigError::InvalidEnvVar {
                    name: "MIRROR_URL".to_string(),
                    value,
                })
            })
            .transpose()?;

        let number = |name: &str, default: u64| -> Result<u64, ConfigError> {
            get(name).map_or(Ok(default), |value| parse_env_value(name, &value))
        };

        let verify = VerifyConfig {
            mirror_url,
            interval: Duration::from_secs(number("VERIFY_INTERVAL_SECS", 5)?),
            attempts: get("VERIFY_ATTEMPTS")
                .map_or(Ok(24), |value| parse_env_value("VERIFY_ATTEMPTS", &value))?,
            timeout: Duration::from_secs(number("VERIFY_TIMEOUT_SECS", 10)?),
        };

        let channels = ChannelConfig {
            checkin: channel("CHECKIN_CHANNEL_ID")?,
            heartbeat: channel("HEARTBEAT_CHANNEL_ID")?,
            transparency: channel("TRANSPARENCY_CHANNEL_ID")?,
            alert: channel("ALERT_CHANNEL_ID")?,
            status: channel("STATUS_CHANNEL_ID")?,
            throughput: channel("THROUGHPUT_CHANNEL_ID")?,
            purge: get("PURGE_CHANNEL_IDS")
                .map_or(Ok(Vec::new()), |value| {
                    parse_id_list("PURGE_CHANNEL_IDS", &value)
                })?
                .into_iter()
                .map(ChannelId::from)
                .collect(),
        };

        let policer = PolicerConfig {
            stall_threshold_minutes: get("STALL_THRESHOLD_MINUTES").map_or(Ok(25), |value| {
                parse_env_value("STALL_THRESHOLD_MINUTES", &value)
            })?,
            forbidden_techniques: parse_word_list(&string_or("FORBIDDEN_TECHNIQUES", "inject")),
            signature: string_or("HEARTBEAT_SIGNATURE", "Packs:"),
        };

        Ok(Self {
            discord_token,
            port: get("PORT").map_or(Ok(8080), |value| parse_env_value("PORT", &value))?,
            data_file: string_or("DATA_FILE", "users.json"),
            whitelist_file: string_or("WHITELIST_FILE", "whitelist.txt"),
            github,
            paths: RemotePaths {
                registry: string_or("REMOTE_REGISTRY_PATH", "users.json"),
                online: string_or("REMOTE_ONLINE_PATH", "ids.txt"),
                online_copy: string_or("REMOTE_ONLINE_COPY_PATH", "online.txt"),
                vip: string_or("REMOTE_VIP_PATH", "vip_ids.txt"),
                whitelist: string_or("REMOTE_WHITELIST_PATH", "whitelist.txt"),
                build_dir: string_or("REMOTE_BUILD_DIR", "builds"),
            },
            verify,
            channels,
            policer,
            presence_role: string_or("PRESENCE_ROLE", "Rerolling"),
            member_category: string_or("MEMBER_CATEGORY", "Member Channels"),
            ban_hours: get("BAN_HOURS").map_or(Ok(48), |value| {
                parse_env_in_range("BAN_HOURS", &value, 1..=MAX_BAN_HOURS)
            })?,
            purge_max_age_hours: get("PURGE_MAX_AGE_HOURS").map_or(Ok(24), |value| {
                parse_env_in_range("PURGE_MAX_AGE_HOURS", &value, 1..=MAX_PURGE_AGE_HOURS)
            })?,
        })
    }
}
