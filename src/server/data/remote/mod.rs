//! Remote repository storage.
//!
//! The bot mirrors its documents to files in a source repository. Writes follow a
//! create-or-update pattern: read the current revision token, then write with that
//! token (or without one to create the file). The repository rejects a write whose
//! token is stale.

pub mod github;

use serenity::async_trait;

use crate::server::error::remote::RemoteError;

/// A file as stored in the remote repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Raw file content.
    pub content: Vec<u8>,
    /// Revision token required to overwrite this version of the file.
    pub revision: String,
}

impl RemoteFile {
    /// Content as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

/// File storage in a remote repository.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetches a file.
    ///
    /// # Returns
    /// - `Ok(Some(RemoteFile))` - File exists
    /// - `Ok(None)` - No file at `path`
    /// - `Err(RemoteError)` - Request failed
    async fn fetch(&self, path: &str) -> Result<Option<RemoteFile>, RemoteError>;

    /// Writes a file.
    ///
    /// # Arguments
    /// - `path` - Repository path
    /// - `content` - Full new content
    /// - `message` - Commit message
    /// - `revision` - Token of the version being replaced; `None` creates the file
    async fn store(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        revision: Option<&str>,
    ) -> Result<(), RemoteError>;
}

/// Creates or updates a file, skipping the write when content is unchanged.
///
/// # Returns
/// - `Ok(true)` - File was written
/// - `Ok(false)` - File already had this content
/// - `Err(RemoteError)` - Fetch or write failed
pub async fn create_or_update(
    remote: &dyn RemoteStore,
    path: &str,
    content: &[u8],
    message: &str,
) -> Result<bool, RemoteError> {
    let existing = remote.fetch(path).await?;

    if existing.as_ref().is_some_and(|file| file.content == content) {
        tracing::debug!("Remote file {} unchanged, skipping write", path);
        return Ok(false);
    }

    let revision = existing.map(|file| file.revision);
    remote
        .store(path, content, message, revision.as_deref())
        .await?;

    Ok(true)
}
