//! Ban bookkeeping on the registry.
//!
//! These operations only touch the registry; the Discord side (permission
//! overwrites on the check-in channel, the presence role) is applied by the caller
//! through [`crate::server::service::discord::DiscordService`].

use chrono::{DateTime, Duration, Utc};

use crate::server::{
    error::{registry::RegistryError, AppError},
    model::user::MemberId,
    service::registry::RegistryStore,
};

/// Longest tempban accepted from commands and `BAN_HOURS`, one year.
pub const MAX_BAN_HOURS: i64 = 24 * 365;

pub struct ModerationService<'a> {
    store: &'a RegistryStore,
}

impl<'a> ModerationService<'a> {
    pub fn new(store: &'a RegistryStore) -> Self {
        Self { store }
    }

    /// Bans a registered member and takes both slots offline.
    ///
    /// # Arguments
    /// - `member` - Member to ban
    /// - `hours` - Ban length from `now`, between 1 and [`MAX_BAN_HOURS`]
    /// - `now` - Current time
    ///
    /// # Returns
    /// - `Ok(DateTime<Utc>)` - Ban expiry
    /// - `Err(AppError::RegistryErr(InvalidBanLength))` - `hours` is out of range
    /// - `Err(AppError::RegistryErr(MemberNotRegistered))` - Member has no record
    pub async fn tempban(
        &self,
        member: MemberId,
        hours: i64,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, AppError> {
        let expiry = (1..=MAX_BAN_HOURS)
            .contains(&hours)
            .then_some(hours)
            .and_then(Duration::try_hours)
            .and_then(|duration| now.checked_add_signed(duration))
            .ok_or(RegistryError::InvalidBanLength { max: MAX_BAN_HOURS })?;

        self.store
            .update(|registry| {
                registry.apply_ban(member, expiry).map_err(|e| match e {
                    RegistryError::NotRegistered => RegistryError::MemberNotRegistered(member),
                    other => other,
                })
            })
            .await?;

        tracing::info!("Banned member {} until {}", member, expiry);
        Ok(expiry)
    }

    /// Lifts every ban that has expired by `now` in a single registry write.
    ///
    /// # Returns
    /// - Members whose ban was lifted
    pub async fn sweep(&self, now: DateTime<Utc>) -> Result<Vec<MemberId>, AppError> {
        let lifted = self
            .store
            .update(|registry| Ok(registry.lift_expired_bans(now)))
            .await?;

        if !lifted.is_empty() {
            tracing::info!("Lifted {} expired bans", lifted.len());
        }
        Ok(lifted)
    }

    /// Policer ban: both slots offline and heartbeat memory cleared, no expiry.
    pub async fn auto_ban(&self, member: MemberId) -> Result<(), AppError> {
        self.store
            .update(|registry| registry.auto_ban(member))
            .await?;

        tracing::warn!("Auto-banned member {}", member);
        Ok(())
    }
}
