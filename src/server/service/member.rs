use chrono::{DateTime, Utc};

use crate::server::{
    error::{registry::RegistryError, AppError},
    model::{
        friend_code::FriendCode,
        user::{MemberId, RegisterUserParam, Slot, SlotStatus, UserRecord},
    },
    service::registry::RegistryStore,
};

/// Result of a status toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    /// Status of the slot before the toggle
    pub previous: SlotStatus,
    /// Code in the toggled slot
    pub code: Option<FriendCode>,
    /// Whether the member still has any published slot afterwards
    pub any_online: bool,
}

/// Result of a code change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeChange {
    /// Code the slot held before
    pub previous: Option<FriendCode>,
    /// Whether the slot is online, meaning the published set changed
    pub online: bool,
}

/// Member-facing registry operations behind the slash commands.
pub struct MemberService<'a> {
    store: &'a RegistryStore,
}

impl<'a> MemberService<'a> {
    pub fn new(store: &'a RegistryStore) -> Self {
        Self { store }
    }

    /// Registers a new member with both slots offline.
    ///
    /// # Returns
    /// - `Ok(UserRecord)` - The stored record
    /// - `Err(AppError::RegistryErr)` - Malformed or taken code, or already registered
    pub async fn register(
        &self,
        member: MemberId,
        param: RegisterUserParam,
    ) -> Result<UserRecord, AppError> {
        let record = self
            .store
            .update(|registry| registry.register(member, param).cloned())
            .await?;

        tracing::info!("Registered member {} ({})", member, record.username);
        Ok(record)
    }

    /// Replaces the code in one slot. An online slot stays online with the new code.
    pub async fn change_code(
        &self,
        member: MemberId,
        slot: Slot,
        code: &str,
    ) -> Result<CodeChange, AppError> {
        let change = self
            .store
            .update(|registry| {
                let previous = registry.change_code(member, slot, code)?;
                let online = registry
                    .get(member)
                    .is_some_and(|record| record.status(slot).is_online());
                Ok(CodeChange { previous, online })
            })
            .await?;

        tracing::info!("Member {} changed {} code", member, slot.label());
        Ok(change)
    }

    /// Sets one slot online or offline.
    ///
    /// # Returns
    /// - `Ok(StatusChange)` - The slot now has `status`
    /// - `Err(AppError::RegistryErr)` - Not registered, or going online while banned
    ///   or without a code in the slot
    pub async fn set_status(
        &self,
        member: MemberId,
        slot: Slot,
        status: SlotStatus,
        now: DateTime<Utc>,
    ) -> Result<StatusChange, AppError> {
        let change = self
            .store
            .update(|registry| {
                let previous = registry.set_status(member, slot, status, now)?;
                let record = registry.get(member).ok_or(RegistryError::NotRegistered)?;
                Ok(StatusChange {
                    previous,
                    code: record.code(slot).cloned(),
                    any_online: record.any_published(),
                })
            })
            .await?;

        if change.previous != status {
            tracing::info!(
                "Member {} set {} slot {:?}",
                member,
                slot.label(),
                status
            );
        }
        Ok(change)
    }

    /// Deletes the member's record.
    pub async fn unregister(&self, member: MemberId) -> Result<UserRecord, AppError> {
        let record = self
            .store
            .update(|registry| registry.unregister(member))
            .await?;

        tracing::info!("Unregistered member {}", member);
        Ok(record)
    }

    /// Admin removal of a code from whichever slot holds it.
    ///
    /// # Returns
    /// - `Ok(MemberId)` - The member who held the code; both their slots are offline
    /// - `Err(AppError::RegistryErr)` - Malformed code or no holder
    pub async fn remove_code(&self, code: &str) -> Result<MemberId, AppError> {
        let member = self
            .store
            .update(|registry| registry.remove_code(code))
            .await?;

        tracing::info!("Removed code {} from member {}", code, member);
        Ok(member)
    }
}
