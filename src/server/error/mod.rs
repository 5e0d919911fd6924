//! Error types for the bot.
//!
//! `AppError` is the top-level error returned by services and startup code. It
//! wraps the domain-specific errors (`RegistryError` for member-facing validation,
//! `RemoteError` for repository I/O, `ConfigError` for startup) together with the
//! library errors the bot can hit. Event handlers never propagate errors to
//! serenity; they log them and, for validation failures, report them to the member.

pub mod config;
pub mod registry;
pub mod remote;

use thiserror::Error;

use crate::server::error::{config::ConfigError, registry::RegistryError, remote::RemoteError};

/// Top-level application error type.
///
/// Most variants use `#[from]` for automatic conversion so service code can use `?`
/// freely. Only `RegistryErr` carries a message meant for end users; everything else
/// is logged and replaced by a generic reply.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Registry validation error (malformed code, duplicate code, unregistered member).
    ///
    /// Reported directly to the invoking member; no state was changed.
    #[error(transparent)]
    RegistryErr(#[from] RegistryError),

    /// Invoking member lacks the permission a command requires.
    #[error("This command is for administrators only.")]
    Forbidden,

    /// Remote repository error.
    #[error(transparent)]
    RemoteErr(#[from] RemoteError),

    /// Local file I/O error on the registry or whitelist file.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// JSON serialization error.
    #[error(transparent)]
    JsonErr(#[from] serde_json::Error),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Internal error with custom message.
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Message to show the member who triggered the failing operation.
    ///
    /// Validation errors are shown as-is. Anything else is an internal failure: it is
    /// logged here and the member gets a generic message.
    pub fn user_message(&self) -> String {
        match self {
            Self::RegistryErr(err) => format!("❌ {}", err),
            Self::Forbidden => format!("❌ {}", self),
            Self::RemoteErr(RemoteError::Disabled) => {
                "❌ Remote storage is not configured.".to_string()
            }
            err => {
                tracing::error!("Command failed: {}", err);
                "❌ Something went wrong, please try again later.".to_string()
            }
        }
    }
}
