//! User factory for creating registry records.
//!
//! Records are produced as JSON in the registry document format, keyed by member ID.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::factory::helpers::{friend_code_for, next_id};

/// Factory for creating registry records with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let user = UserFactory::new()
///     .member_id(123456789)
///     .friend_code("1111222233334444")
///     .secondary_friend_code("5555666677778888")
///     .online()
///     .build();
/// ```
pub struct UserFactory {
    member_id: u64,
    username: String,
    friend_code: Option<String>,
    secondary_friend_code: Option<String>,
    instances: i64,
    prefix: String,
    status: &'static str,
    secondary_status: &'static str,
    ban_expiry: Option<DateTime<Utc>>,
    last_heartbeat: Option<(u32, u32)>,
}

impl UserFactory {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - member_id: `100000 + id` where id is auto-incremented
    /// - username: `"user{id}"`
    /// - friend_code: unique 16-digit code derived from id
    /// - both slots offline, not banned, no heartbeat
    pub fn new() -> Self {
        let id = next_id();
        Self {
            member_id: 100_000 + id,
            username: format!("user{}", id),
            friend_code: Some(friend_code_for(id)),
            secondary_friend_code: None,
            instances: 2,
            prefix: String::new(),
            status: "offline",
            secondary_status: "offline",
            ban_expiry: None,
            last_heartbeat: None,
        }
    }

    pub fn member_id(mut self, member_id: u64) -> Self {
        self.member_id = member_id;
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn friend_code(mut self, code: impl Into<String>) -> Self {
        self.friend_code = Some(code.into());
        self
    }

    /// Nulls the primary code, as after an admin removal.
    pub fn without_friend_code(mut self) -> Self {
        self.friend_code = None;
        self
    }

    pub fn secondary_friend_code(mut self, code: impl Into<String>) -> Self {
        self.secondary_friend_code = Some(code.into());
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Marks the primary slot online.
    pub fn online(mut self) -> Self {
        self.status = "online";
        self
    }

    /// Marks the secondary slot online.
    pub fn secondary_online(mut self) -> Self {
        self.secondary_status = "online";
        self
    }

    pub fn banned_until(mut self, expiry: DateTime<Utc>) -> Self {
        self.ban_expiry = Some(expiry);
        self
    }

    /// Sets the last accepted heartbeat sample.
    pub fn last_heartbeat(mut self, elapsed_minutes: u32, pack_count: u32) -> Self {
        self.last_heartbeat = Some((elapsed_minutes, pack_count));
        self
    }

    /// Builds the record.
    ///
    /// # Returns
    /// - `(u64, Value)` - Member ID and record JSON
    pub fn build(self) -> (u64, Value) {
        let mut record = json!({
            "username": self.username,
            "friend_code": self.friend_code,
            "instances": self.instances,
            "prefix": self.prefix,
            "status": self.status,
            "secondary_status": self.secondary_status,
        });

        if let Some(code) = self.secondary_friend_code {
            record["secondary_friend_code"] = json!(code);
        }
        if let Some(expiry) = self.ban_expiry {
            record["ban_expiry"] = json!(expiry);
        }
        if let Some((elapsed_minutes, pack_count)) = self.last_heartbeat {
            record["last_heartbeat"] = json!({
                "elapsed_minutes": elapsed_minutes,
                "pack_count": pack_count,
            });
        }

        (self.member_id, record)
    }
}

impl Default for UserFactory {
    fn default() -> Self {
        Self::new()
    }
}
