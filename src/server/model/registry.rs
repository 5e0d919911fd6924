//! The member registry document.
//!
//! `Registry` is the whole mapping from member ID to `UserRecord`, and every
//! mutation the bot performs is a method here operating on the full document.
//! Methods validate before they mutate, so an `Err` always means the registry is
//! unchanged. Persistence lives in the data layer and serialization of mutations in
//! `RegistryStore`; nothing in this module does I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::server::{
    error::registry::RegistryError,
    model::{
        friend_code::FriendCode,
        heartbeat::HeartbeatSample,
        user::{MemberId, RegisterUserParam, Slot, SlotStatus, UserRecord},
    },
};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    members: BTreeMap<MemberId, UserRecord>,
}

impl Registry {
    pub fn get(&self, member: MemberId) -> Option<&UserRecord> {
        self.members.get(&member)
    }

    pub fn contains(&self, member: MemberId) -> bool {
        self.members.contains_key(&member)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MemberId, &UserRecord)> {
        self.members.iter().map(|(id, record)| (*id, record))
    }

    /// Sorted, de-duplicated codes of every online slot.
    ///
    /// Always recomputed from the full document, so the result does not depend on
    /// the order in which members went online or offline.
    pub fn online_codes(&self) -> Vec<FriendCode> {
        self.members
            .values()
            .flat_map(UserRecord::published_codes)
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Contents of the published online-codes file, one code per line.
    pub fn render_online_codes(&self) -> String {
        self.online_codes()
            .iter()
            .map(FriendCode::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Finds the member and slot holding a code, scanning every record.
    pub fn code_holder(&self, code: &FriendCode) -> Option<(MemberId, Slot)> {
        self.members.iter().find_map(|(id, record)| {
            Slot::ALL
                .into_iter()
                .find(|slot| record.code(*slot) == Some(code))
                .map(|slot| (*id, slot))
        })
    }

    /// Fails if `code` is held by any slot other than `except`.
    fn ensure_code_free(
        &self,
        code: &FriendCode,
        except: Option<(MemberId, Slot)>,
    ) -> Result<(), RegistryError> {
        match self.code_holder(code) {
            Some(holder) if Some(holder) != except => {
                Err(RegistryError::CodeTaken(code.to_string()))
            }
            _ => Ok(()),
        }
    }

    fn record_mut(&mut self, member: MemberId) -> Result<&mut UserRecord, RegistryError> {
        self.members
            .get_mut(&member)
            .ok_or(RegistryError::NotRegistered)
    }

    /// Resolves the identity line of a heartbeat to a registered member.
    ///
    /// Tries the member ID first, then the instance prefix, then the username, all
    /// compared case-insensitively.
    pub fn find_by_identity(&self, identity: &str) -> Option<MemberId> {
        let identity = identity.trim();
        if identity.is_empty() {
            return None;
        }

        if let Ok(id) = identity.parse::<MemberId>() {
            if self.contains(id) {
                return Some(id);
            }
        }

        self.members
            .iter()
            .find(|(_, r)| !r.prefix.is_empty() && r.prefix.eq_ignore_ascii_case(identity))
            .or_else(|| {
                self.members
                    .iter()
                    .find(|(_, r)| r.username.eq_ignore_ascii_case(identity))
            })
            .map(|(id, _)| *id)
    }

    /// Registers a new member with both slots offline.
    ///
    /// Checks run in order: code format, existing registration, code uniqueness.
    ///
    /// # Returns
    /// - `Ok(&UserRecord)` - The inserted record
    /// - `Err(RegistryError::InvalidCodeFormat)` - A code is not 16 digits
    /// - `Err(RegistryError::AlreadyRegistered)` - Member already has a record
    /// - `Err(RegistryError::CodeTaken)` - A code is already held somewhere
    pub fn register(
        &mut self,
        member: MemberId,
        param: RegisterUserParam,
    ) -> Result<&UserRecord, RegistryError> {
        let primary = FriendCode::parse(&param.friend_code)?;
        let secondary = param
            .secondary_friend_code
            .as_deref()
            .map(FriendCode::parse)
            .transpose()?;

        if self.contains(member) {
            return Err(RegistryError::AlreadyRegistered);
        }

        self.ensure_code_free(&primary, None)?;
        if let Some(secondary) = &secondary {
            if *secondary == primary {
                return Err(RegistryError::CodeTaken(secondary.to_string()));
            }
            self.ensure_code_free(secondary, None)?;
        }

        let record = UserRecord {
            username: param.username,
            primary_code: Some(primary),
            secondary_code: secondary,
            instances: param.instances,
            prefix: param.prefix,
            ..Default::default()
        };

        Ok(self.members.entry(member).or_insert(record))
    }

    /// Replaces the code in one slot, keeping its status.
    ///
    /// # Returns
    /// - `Ok(Option<FriendCode>)` - The code previously in the slot
    pub fn change_code(
        &mut self,
        member: MemberId,
        slot: Slot,
        code: &str,
    ) -> Result<Option<FriendCode>, RegistryError> {
        let code = FriendCode::parse(code)?;
        if !self.contains(member) {
            return Err(RegistryError::NotRegistered);
        }
        self.ensure_code_free(&code, Some((member, slot)))?;

        let record = self.record_mut(member)?;
        let previous = record.code(slot).cloned();
        record.set_code(slot, Some(code));
        Ok(previous)
    }

    /// Sets the status of one slot.
    ///
    /// Going online requires a code in the slot and no active ban.
    ///
    /// # Returns
    /// - `Ok(SlotStatus)` - Status before the change
    pub fn set_status(
        &mut self,
        member: MemberId,
        slot: Slot,
        status: SlotStatus,
        now: DateTime<Utc>,
    ) -> Result<SlotStatus, RegistryError> {
        let record = self.record_mut(member)?;

        if status.is_online() {
            if let Some(expiry) = record.ban_expiry.filter(|_| record.is_banned(now)) {
                return Err(RegistryError::Banned(expiry));
            }
            if record.code(slot).is_none() {
                return Err(RegistryError::MissingCode(slot.label()));
            }
        }

        let previous = record.status(slot);
        record.set_status(slot, status);
        Ok(previous)
    }

    /// Deletes a member's record entirely.
    pub fn unregister(&mut self, member: MemberId) -> Result<UserRecord, RegistryError> {
        self.members
            .remove(&member)
            .ok_or(RegistryError::NotRegistered)
    }

    /// Admin removal of a code: nulls the slot holding it and forces both slots offline.
    ///
    /// # Returns
    /// - `Ok(MemberId)` - The member who held the code
    pub fn remove_code(&mut self, code: &str) -> Result<MemberId, RegistryError> {
        let code = FriendCode::parse(code)?;
        let (member, slot) = self
            .code_holder(&code)
            .ok_or_else(|| RegistryError::UnknownCode(code.to_string()))?;

        let record = self.record_mut(member)?;
        record.set_code(slot, None);
        record.force_offline();
        Ok(member)
    }

    /// Bans a member until `expiry` and takes both slots offline.
    pub fn apply_ban(
        &mut self,
        member: MemberId,
        expiry: DateTime<Utc>,
    ) -> Result<(), RegistryError> {
        let record = self.record_mut(member)?;
        record.ban_expiry = Some(expiry);
        record.force_offline();
        Ok(())
    }

    /// Clears every ban whose expiry has passed.
    ///
    /// # Returns
    /// - Members whose ban was lifted, in ID order
    pub fn lift_expired_bans(&mut self, now: DateTime<Utc>) -> Vec<MemberId> {
        let mut lifted = Vec::new();
        for (id, record) in self.members.iter_mut() {
            if record.ban_expiry.is_some_and(|expiry| expiry <= now) {
                record.ban_expiry = None;
                lifted.push(*id);
            }
        }
        lifted
    }

    /// Policer ban: both slots offline and the heartbeat memory cleared.
    ///
    /// Sets no expiry; the member comes back by going online again.
    pub fn auto_ban(&mut self, member: MemberId) -> Result<(), RegistryError> {
        let record = self.record_mut(member)?;
        record.force_offline();
        record.last_heartbeat = None;
        Ok(())
    }

    pub fn record_heartbeat(
        &mut self,
        member: MemberId,
        sample: HeartbeatSample,
    ) -> Result<(), RegistryError> {
        self.record_mut(member)?.last_heartbeat = Some(sample);
        Ok(())
    }

    /// Aligns every slot status with membership of its code in `online`.
    ///
    /// Slots without a code end up offline.
    ///
    /// # Returns
    /// - Number of slots whose status changed
    pub fn heal_statuses(&mut self, online: &BTreeSet<String>) -> usize {
        let mut corrected = 0;
        for record in self.members.values_mut() {
            for slot in Slot::ALL {
                let desired = record
                    .code(slot)
                    .is_some_and(|code| online.contains(code.as_str()));
                if record.status(slot).is_online() != desired {
                    let status = if desired {
                        SlotStatus::Online
                    } else {
                        SlotStatus::Offline
                    };
                    record.set_status(slot, status);
                    corrected += 1;
                }
            }
        }
        corrected
    }

    /// Whether both documents hold the same records apart from heartbeat samples.
    pub fn eq_ignoring_heartbeats(&self, other: &Registry) -> bool {
        let strip = |record: &UserRecord| UserRecord {
            last_heartbeat: None,
            ..record.clone()
        };

        self.members.len() == other.members.len()
            && self
                .members
                .iter()
                .zip(other.members.iter())
                .all(|((a_id, a), (b_id, b))| a_id == b_id && strip(a) == strip(b))
    }

    /// Combined packs per minute of every member with a published slot.
    pub fn throughput(&self) -> f64 {
        self.members
            .values()
            .filter(|record| record.any_published())
            .filter_map(|record| record.last_heartbeat)
            .map(|sample| sample.packs_per_minute())
            .sum()
    }
}
