use std::{path::PathBuf, sync::Arc};
use tokio::sync::RwLock;

use crate::server::{
    data::{
        remote::{create_or_update, RemoteStore},
        whitelist::WhitelistRepository,
    },
    error::AppError,
    model::whitelist::Whitelist,
};

const WHITELIST_COMMIT_MESSAGE: &str = "Update pack whitelist [skip ci]";

/// Pack whitelist held in memory and persisted locally and remotely.
///
/// Clones share the same whitelist. Reads take a snapshot so heartbeat evaluation
/// never holds the lock across an await.
#[derive(Clone)]
pub struct WhitelistService {
    path: PathBuf,
    remote: Option<Arc<dyn RemoteStore>>,
    remote_path: String,
    current: Arc<RwLock<Whitelist>>,
}

impl WhitelistService {
    pub fn new(
        path: impl Into<PathBuf>,
        remote: Option<Arc<dyn RemoteStore>>,
        remote_path: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            remote,
            remote_path: remote_path.into(),
            current: Arc::new(RwLock::new(Whitelist::default())),
        }
    }

    /// Loads the whitelist at startup.
    ///
    /// The remote copy wins when it exists and is reachable, and is written to the
    /// local file; otherwise the local file is used.
    ///
    /// # Returns
    /// - Number of entries loaded
    pub async fn load(&self) -> usize {
        let repo = WhitelistRepository::new(&self.path);
        let mut whitelist = repo.load().await;

        if let Some(remote) = &self.remote {
            match remote.fetch(&self.remote_path).await {
                Ok(Some(file)) => {
                    let pulled = Whitelist::from_lines(&file.text());
                    if pulled != whitelist {
                        if let Err(e) = repo.save(&pulled).await {
                            tracing::warn!("Failed to cache remote whitelist locally: {}", e);
                        }
                    }
                    whitelist = pulled;
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("Failed to pull remote whitelist: {}", e),
            }
        }

        let count = whitelist.entries().count();
        *self.current.write().await = whitelist;
        count
    }

    pub async fn snapshot(&self) -> Whitelist {
        self.current.read().await.clone()
    }

    /// Allows or disallows a pack.
    ///
    /// # Returns
    /// - `Ok(true)` - The whitelist changed and was saved
    /// - `Ok(false)` - Nothing to change
    /// - `Err(AppError::IoErr)` - The local file could not be written
    pub async fn set_entry(&self, name: &str, allowed: bool) -> Result<bool, AppError> {
        let mut current = self.current.write().await;

        let mut updated = current.clone();
        if !updated.set_entry(name, allowed) {
            return Ok(false);
        }

        WhitelistRepository::new(&self.path).save(&updated).await?;
        *current = updated;
        tracing::info!(
            "Pack {} {} the whitelist",
            name.trim(),
            if allowed { "added to" } else { "removed from" }
        );

        if let Some(remote) = &self.remote {
            if let Err(e) = create_or_update(
                remote.as_ref(),
                &self.remote_path,
                current.render().as_bytes(),
                WHITELIST_COMMIT_MESSAGE,
            )
            .await
            {
                tracing::error!("Failed to persist whitelist to remote: {}", e);
            }
        }

        Ok(true)
    }
}
