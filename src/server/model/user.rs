//! Registered member models and parameters.
//!
//! A `UserRecord` is what the registry stores for each member: their friend codes,
//! per-code presence status, ban state and the last accepted heartbeat sample. Field
//! names on the wire follow the registry document that is mirrored to the remote
//! repository, so older documents keep loading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::server::model::{friend_code::FriendCode, heartbeat::HeartbeatSample};

/// Discord user ID of a registered member, used as the registry key.
pub type MemberId = u64;

/// Presence status of a single friend code slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Online,
    #[default]
    Offline,
}

impl SlotStatus {
    pub fn is_online(self) -> bool {
        self == SlotStatus::Online
    }
}

/// Which of a member's two friend codes an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Primary,
    Secondary,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Primary, Slot::Secondary];

    /// Human-readable slot name used in command options and replies.
    pub fn label(self) -> &'static str {
        match self {
            Slot::Primary => "primary",
            Slot::Secondary => "secondary",
        }
    }

    /// Parses a command option value, defaulting to the primary slot.
    pub fn from_option(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("secondary") => Slot::Secondary,
            _ => Slot::Primary,
        }
    }
}

/// One registered member.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserRecord {
    /// Display name at registration time, informational only.
    #[serde(default)]
    pub username: String,
    /// Primary friend code, nulled by an admin code removal.
    #[serde(rename = "friend_code", default)]
    pub primary_code: Option<FriendCode>,
    /// Optional second friend code.
    #[serde(
        rename = "secondary_friend_code",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub secondary_code: Option<FriendCode>,
    /// Number of reroll instances, excluding the main one.
    #[serde(default)]
    pub instances: i64,
    /// Username prefix used by the member's reroll instances.
    #[serde(default)]
    pub prefix: String,
    #[serde(rename = "status", default)]
    pub primary_status: SlotStatus,
    #[serde(default)]
    pub secondary_status: SlotStatus,
    /// Present while the member is banned from the check-in channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_expiry: Option<DateTime<Utc>>,
    /// Last accepted heartbeat sample, used for stall detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_heartbeat: Option<HeartbeatSample>,
}

impl UserRecord {
    pub fn code(&self, slot: Slot) -> Option<&FriendCode> {
        match slot {
            Slot::Primary => self.primary_code.as_ref(),
            Slot::Secondary => self.secondary_code.as_ref(),
        }
    }

    pub fn set_code(&mut self, slot: Slot, code: Option<FriendCode>) {
        match slot {
            Slot::Primary => self.primary_code = code,
            Slot::Secondary => self.secondary_code = code,
        }
    }

    pub fn status(&self, slot: Slot) -> SlotStatus {
        match slot {
            Slot::Primary => self.primary_status,
            Slot::Secondary => self.secondary_status,
        }
    }

    pub fn set_status(&mut self, slot: Slot, status: SlotStatus) {
        match slot {
            Slot::Primary => self.primary_status = status,
            Slot::Secondary => self.secondary_status = status,
        }
    }

    /// Whether the slot contributes a code to the published set.
    ///
    /// A slot marked online without a code is treated as offline.
    pub fn is_published(&self, slot: Slot) -> bool {
        self.status(slot).is_online() && self.code(slot).is_some()
    }

    /// Whether any slot is currently published.
    pub fn any_published(&self) -> bool {
        Slot::ALL.iter().any(|slot| self.is_published(*slot))
    }

    /// Codes of all published slots.
    pub fn published_codes(&self) -> impl Iterator<Item = &FriendCode> + '_ {
        Slot::ALL
            .into_iter()
            .filter(|slot| self.is_published(*slot))
            .filter_map(|slot| self.code(slot))
    }

    /// Sets both slots offline.
    ///
    /// # Returns
    /// - `true` - At least one slot was online before the call
    pub fn force_offline(&mut self) -> bool {
        let was_online =
            self.primary_status.is_online() || self.secondary_status.is_online();
        self.primary_status = SlotStatus::Offline;
        self.secondary_status = SlotStatus::Offline;
        was_online
    }

    /// Whether a ban is in effect at `now`.
    pub fn is_banned(&self, now: DateTime<Utc>) -> bool {
        self.ban_expiry.is_some_and(|expiry| expiry > now)
    }
}

/// Parameters for registering a new member.
#[derive(Debug, Clone)]
pub struct RegisterUserParam {
    /// Discord username of the registering member
    pub username: String,
    /// Primary friend code as typed
    pub friend_code: String,
    /// Number of instances, excluding main
    pub instances: i64,
    /// Username prefix of the instances
    pub prefix: String,
    /// Optional secondary friend code as typed
    pub secondary_friend_code: Option<String>,
}
