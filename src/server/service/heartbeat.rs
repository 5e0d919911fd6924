//! Heartbeat policing.
//!
//! [`HeartbeatPolicer`] is the pure rule set; [`HeartbeatService`] attributes a
//! heartbeat to a member and applies the verdict to the registry.

use crate::server::{
    config::PolicerConfig,
    error::AppError,
    model::{
        heartbeat::{HeartbeatReport, HeartbeatSample, Verdict, Violation},
        user::MemberId,
        whitelist::Whitelist,
    },
    service::{moderation::ModerationService, registry::RegistryStore},
};

/// Rules a heartbeat is checked against, first match wins.
#[derive(Debug, Clone)]
pub struct HeartbeatPolicer {
    stall_threshold_minutes: u32,
    forbidden_techniques: Vec<String>,
}

impl HeartbeatPolicer {
    pub fn new(config: &PolicerConfig) -> Self {
        Self {
            stall_threshold_minutes: config.stall_threshold_minutes,
            forbidden_techniques: config
                .forbidden_techniques
                .iter()
                .map(|technique| technique.to_lowercase())
                .collect(),
        }
    }

    /// Evaluates one heartbeat.
    ///
    /// # Arguments
    /// - `content` - Raw message text, searched for forbidden techniques
    /// - `report` - Parsed parts of `content`
    /// - `last` - Previously accepted sample of the same member
    /// - `whitelist` - Permitted packs; an empty whitelist permits none
    pub fn evaluate(
        &self,
        content: &str,
        report: &HeartbeatReport,
        last: Option<HeartbeatSample>,
        whitelist: &Whitelist,
    ) -> Verdict {
        let lowered = content.to_lowercase();
        if let Some(technique) = self
            .forbidden_techniques
            .iter()
            .find(|technique| lowered.contains(technique.as_str()))
        {
            return Verdict::Violation(Violation::ForbiddenTechnique(technique.clone()));
        }

        if let (Some(previous), Some(current)) = (last, report.sample) {
            if self.is_stalling(previous, current) {
                return Verdict::Violation(Violation::Stalling { previous, current });
            }
        }

        if let Some(pack) = report
            .opening
            .iter()
            .flatten()
            .find(|pack| !whitelist.contains(pack))
        {
            return Verdict::Violation(Violation::ForbiddenPack(pack.clone()));
        }

        Verdict::Clean(report.sample)
    }

    fn is_stalling(&self, previous: HeartbeatSample, current: HeartbeatSample) -> bool {
        current.pack_count == previous.pack_count
            && current
                .elapsed_minutes
                .saturating_sub(previous.elapsed_minutes)
                >= self.stall_threshold_minutes
    }
}

/// What happened to a heartbeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeartbeatOutcome {
    /// Identity line did not match a registered member; nothing was evaluated.
    Unattributed,
    /// Heartbeat passed; its sample (if any) was stored.
    Accepted {
        member: MemberId,
        sample: Option<HeartbeatSample>,
    },
    /// Heartbeat broke a rule and the member was auto-banned.
    Rejected {
        member: MemberId,
        violation: Violation,
    },
}

pub struct HeartbeatService<'a> {
    store: &'a RegistryStore,
    policer: &'a HeartbeatPolicer,
}

impl<'a> HeartbeatService<'a> {
    pub fn new(store: &'a RegistryStore, policer: &'a HeartbeatPolicer) -> Self {
        Self { store, policer }
    }

    /// Attributes, evaluates and records one heartbeat message.
    ///
    /// # Returns
    /// - `Ok(HeartbeatOutcome)` - Verdict applied to the registry
    /// - `Err(AppError)` - The registry could not be written
    pub async fn process(
        &self,
        content: &str,
        whitelist: &Whitelist,
    ) -> Result<HeartbeatOutcome, AppError> {
        let report = HeartbeatReport::parse(content);
        let registry = self.store.snapshot().await;

        let Some(member) = report
            .identity
            .as_deref()
            .and_then(|identity| registry.find_by_identity(identity))
        else {
            tracing::debug!("Heartbeat from unknown identity {:?}", report.identity);
            return Ok(HeartbeatOutcome::Unattributed);
        };

        let last = registry.get(member).and_then(|record| record.last_heartbeat);

        match self.policer.evaluate(content, &report, last, whitelist) {
            Verdict::Violation(violation) => {
                tracing::warn!("Heartbeat violation by member {}: {}", member, violation);
                ModerationService::new(self.store).auto_ban(member).await?;
                Ok(HeartbeatOutcome::Rejected { member, violation })
            }
            Verdict::Clean(sample) => {
                if let Some(sample) = sample {
                    self.store
                        .update(|registry| registry.record_heartbeat(member, sample))
                        .await?;
                }
                Ok(HeartbeatOutcome::Accepted { member, sample })
            }
        }
    }
}
