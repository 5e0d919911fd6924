use chrono::{DateTime, Utc};
use thiserror::Error;

/// Validation failures for registry mutations.
///
/// Every variant is recoverable and leaves the registry untouched. The `Display`
/// text is shown verbatim to the member who invoked the command, so it is phrased
/// for them rather than for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Friend code is not exactly 16 ASCII digits.
    #[error("Friend Code must be exactly 16 digits. You entered `{len}` characters.")]
    InvalidCodeFormat {
        /// Length of the rejected input in characters
        len: usize,
    },

    /// Member tried to register a second time.
    #[error(
        "You are already registered. Use `/rg_change_id` to change your code or `/rg_remove_user` to unregister."
    )]
    AlreadyRegistered,

    /// Code is already held by a slot of another record (or another slot of the same record).
    #[error("Friend Code `{0}` is already registered.")]
    CodeTaken(String),

    /// Member has no record.
    #[error("You are not registered! Use `/rg_add_user` first.")]
    NotRegistered,

    /// Ban target has no record; shown to the admin who issued the ban.
    #[error("<@{0}> is not registered.")]
    MemberNotRegistered(u64),

    /// Tempban length is zero, negative or too long.
    #[error("Ban length must be between 1 and {max} hours.")]
    InvalidBanLength {
        /// Longest accepted ban in hours
        max: i64,
    },

    /// Slot has no code, so it cannot be switched online.
    #[error("You have no {0} Friend Code registered. Use `/rg_change_id` to set one.")]
    MissingCode(&'static str),

    /// No record holds the given code.
    #[error("No member holds Friend Code `{0}`.")]
    UnknownCode(String),

    /// Member is banned from the check-in channel.
    #[error("You are banned from the queue until <t:{}:f>.", .0.timestamp())]
    Banned(DateTime<Utc>),
}
