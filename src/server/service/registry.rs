//! Serialized access to the registry document.
//!
//! Every mutation is a full read-modify-write of the local file under one async
//! lock, followed by the remote persist and, when the set of online codes changed,
//! a republish. All of it happens before the lock is released, so concurrent
//! commands cannot interleave and remote writes land in mutation order.

use std::path::PathBuf;
use tokio::sync::Mutex;

use crate::server::{
    data::registry::RegistryRepository,
    error::{registry::RegistryError, AppError},
    model::registry::Registry,
    service::publisher::PresencePublisher,
};

pub struct RegistryStore {
    path: PathBuf,
    publisher: PresencePublisher,
    lock: Mutex<()>,
}

impl RegistryStore {
    /// Creates a store over the local registry file.
    ///
    /// # Arguments
    /// - `path` - Location of the registry JSON document
    /// - `publisher` - Receives every changed document
    pub fn new(path: impl Into<PathBuf>, publisher: PresencePublisher) -> Self {
        Self {
            path: path.into(),
            publisher,
            lock: Mutex::new(()),
        }
    }

    pub fn publisher(&self) -> &PresencePublisher {
        &self.publisher
    }

    /// Applies a mutation to the registry.
    ///
    /// The document is reloaded from disk, passed to `mutate`, and written back only
    /// if it actually changed. A rejected mutation writes nothing. Changes that only
    /// touch heartbeat samples stay local.
    ///
    /// # Arguments
    /// - `mutate` - Validates and applies the change
    ///
    /// # Returns
    /// - `Ok(R)` - Value returned by `mutate`
    /// - `Err(AppError::RegistryErr)` - `mutate` rejected the change
    /// - `Err(AppError::IoErr)` - The local file could not be written
    pub async fn update<R>(
        &self,
        mutate: impl FnOnce(&mut Registry) -> Result<R, RegistryError>,
    ) -> Result<R, AppError> {
        let _guard = self.lock.lock().await;
        let repo = RegistryRepository::new(&self.path);

        let mut registry = repo.load().await;
        let before = registry.clone();
        let result = mutate(&mut registry)?;

        if registry != before {
            repo.save(&registry).await?;

            // Heartbeat samples are not mirrored.
            if !registry.eq_ignoring_heartbeats(&before) {
                self.publisher.persist(&registry).await;
            }

            if registry.online_codes() != before.online_codes() {
                self.publisher.republish(&registry).await;
            }
        }

        Ok(result)
    }

    /// Current registry as stored on disk.
    pub async fn snapshot(&self) -> Registry {
        let _guard = self.lock.lock().await;
        RegistryRepository::new(&self.path).load().await
    }

    /// Republishes the online set recomputed from the full registry.
    pub async fn republish(&self) {
        let _guard = self.lock.lock().await;
        let registry = RegistryRepository::new(&self.path).load().await;
        self.publisher.republish(&registry).await;
    }

    /// Recovers state from the remote repository after a restart.
    ///
    /// The remote registry, when present, replaces the local copy. Slot statuses are
    /// then healed against the remote online-codes file, so a slot is online exactly
    /// when its code is published. Remote failures fall back to the local copy. The
    /// local file is rewritten when anything differs; nothing is republished.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of slot statuses corrected
    /// - `Err(AppError::IoErr)` - The local file could not be written
    pub async fn resync_on_startup(&self) -> Result<usize, AppError> {
        let _guard = self.lock.lock().await;
        let repo = RegistryRepository::new(&self.path);
        let local = repo.load().await;

        let mut registry = match self.publisher.pull_registry().await {
            Ok(Some(remote)) => remote,
            Ok(None) => local.clone(),
            Err(e) => {
                tracing::warn!("Failed to pull remote registry, keeping local copy: {}", e);
                local.clone()
            }
        };

        let corrected = match self.publisher.pull_online_codes().await {
            Ok(Some(online)) => registry.heal_statuses(&online),
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!("Failed to pull remote online codes, skipping heal: {}", e);
                0
            }
        };

        if registry != local {
            repo.save(&registry).await?;
            tracing::info!(
                "Resynced registry with {} members ({} statuses corrected)",
                registry.len(),
                corrected
            );
        }

        Ok(corrected)
    }
}
