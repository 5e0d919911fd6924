//! Presence publishing to the remote repository.
//!
//! The publisher owns every write of registry-derived state to the remote store:
//! the online-codes file (and its duplicate) that reroll scripts consume, and the
//! full registry document used to recover state at startup. Remote failures are
//! logged and swallowed here, so callers treat the local registry as authoritative
//! and never fail a member's command because the repository was unreachable.

use std::{collections::BTreeSet, sync::Arc};
use tokio::time::sleep;
use url::Url;

use crate::server::{
    config::{RemotePaths, VerifyConfig},
    data::remote::{create_or_update, RemoteStore},
    error::{remote::RemoteError, AppError},
    model::{friend_code::FriendCode, registry::Registry},
};

pub const ONLINE_COMMIT_MESSAGE: &str = "Update online friend codes [skip ci]";
pub const REGISTRY_COMMIT_MESSAGE: &str = "Update registry [skip ci]";

/// Outcome of polling the public mirror for a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// The mirror served the code after `attempts` requests.
    Visible { attempts: u32 },
    /// The code never appeared within the attempt budget.
    NotVisible { attempts: u32 },
    /// No mirror is configured, nothing was checked.
    Unchecked,
}

#[derive(Clone)]
pub struct PresencePublisher {
    /// `None` when no repository credentials are configured.
    remote: Option<Arc<dyn RemoteStore>>,
    http: reqwest::Client,
    paths: RemotePaths,
    verify: VerifyConfig,
}

impl PresencePublisher {
    /// Creates a publisher.
    ///
    /// # Arguments
    /// - `remote` - Remote store, or `None` to turn every remote call into a no-op
    /// - `http` - Client used to poll the public mirror
    /// - `paths` - Repository paths to write
    /// - `verify` - Mirror polling settings
    pub fn new(
        remote: Option<Arc<dyn RemoteStore>>,
        http: reqwest::Client,
        paths: RemotePaths,
        verify: VerifyConfig,
    ) -> Self {
        Self {
            remote,
            http,
            paths,
            verify,
        }
    }

    /// The underlying remote store, when remote storage is enabled.
    pub fn remote(&self) -> Option<&Arc<dyn RemoteStore>> {
        self.remote.as_ref()
    }

    pub fn paths(&self) -> &RemotePaths {
        &self.paths
    }

    /// Writes the online-codes file and its duplicate.
    ///
    /// The content is recomputed from the full registry, so concurrent republishes
    /// converge on the same file.
    pub async fn republish(&self, registry: &Registry) {
        let Some(remote) = &self.remote else {
            return;
        };

        let content = registry.render_online_codes();
        for path in [&self.paths.online, &self.paths.online_copy] {
            match create_or_update(
                remote.as_ref(),
                path,
                content.as_bytes(),
                ONLINE_COMMIT_MESSAGE,
            )
            .await
            {
                Ok(true) => tracing::info!(
                    "Published {} online codes to {}",
                    registry.online_codes().len(),
                    path
                ),
                Ok(false) => {}
                Err(e) => tracing::error!("Failed to publish online codes to {}: {}", path, e),
            }
        }
    }

    /// Writes the full registry document to the remote repository.
    pub async fn persist(&self, registry: &Registry) {
        let Some(remote) = &self.remote else {
            return;
        };

        let content = match serde_json::to_vec_pretty(registry) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Failed to serialize registry for remote: {}", e);
                return;
            }
        };

        if let Err(e) = create_or_update(
            remote.as_ref(),
            &self.paths.registry,
            &content,
            REGISTRY_COMMIT_MESSAGE,
        )
        .await
        {
            tracing::error!("Failed to persist registry to remote: {}", e);
        }
    }

    /// Polls the public mirror until it serves `code` or the attempt budget runs out.
    ///
    /// Each request carries a fresh nonce query parameter to defeat caches and is
    /// bounded by the configured timeout; a timed-out or failed request counts as an
    /// attempt.
    pub async fn verify_propagation(&self, code: &FriendCode) -> Propagation {
        let Some(url) = self.mirror_file_url() else {
            return Propagation::Unchecked;
        };

        for attempt in 1..=self.verify.attempts {
            if attempt > 1 {
                sleep(self.verify.interval).await;
            }

            if self.mirror_serves(&url, code).await {
                tracing::debug!("Code {} visible on mirror after {} attempts", code, attempt);
                return Propagation::Visible { attempts: attempt };
            }
        }

        tracing::warn!(
            "Code {} not visible on mirror after {} attempts",
            code,
            self.verify.attempts
        );
        Propagation::NotVisible {
            attempts: self.verify.attempts,
        }
    }

    fn mirror_file_url(&self) -> Option<Url> {
        let mut base = self.verify.mirror_url.clone()?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        match base.join(self.paths.online.trim_start_matches('/')) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!("Invalid mirror URL for {}: {}", self.paths.online, e);
                None
            }
        }
    }

    async fn mirror_serves(&self, url: &Url, code: &FriendCode) -> bool {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("nocache", &rand::random::<u64>().to_string());

        let response = match self
            .http
            .get(url)
            .timeout(self.verify.timeout)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::debug!("Mirror answered {}", response.status());
                return false;
            }
            Err(e) => {
                tracing::debug!("Mirror request failed: {}", e);
                return false;
            }
        };

        match response.text().await {
            Ok(body) => body.lines().any(|line| line.trim() == code.as_str()),
            Err(_) => false,
        }
    }

    /// Fetches the remote registry document.
    ///
    /// # Returns
    /// - `Ok(Some(Registry))` - Remote document exists and parsed
    /// - `Ok(None)` - Remote storage disabled or no document stored yet
    /// - `Err(AppError)` - Fetch failed or the document is corrupt
    pub async fn pull_registry(&self) -> Result<Option<Registry>, AppError> {
        let Some(file) = self.pull(&self.paths.registry).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_slice(&file)?))
    }

    /// Fetches the remote online-codes file as a set of trimmed codes.
    pub async fn pull_online_codes(&self) -> Result<Option<BTreeSet<String>>, AppError> {
        let Some(file) = self.pull(&self.paths.online).await? else {
            return Ok(None);
        };
        let text = String::from_utf8_lossy(&file);
        Ok(Some(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        ))
    }

    async fn pull(&self, path: &str) -> Result<Option<Vec<u8>>, RemoteError> {
        let Some(remote) = &self.remote else {
            return Ok(None);
        };
        Ok(remote.fetch(path).await?.map(|file| file.content))
    }
}
