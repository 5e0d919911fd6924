use std::{io::ErrorKind, path::Path};

use crate::server::{error::AppError, model::whitelist::Whitelist};

/// Repository for the local newline-delimited whitelist file.
pub struct WhitelistRepository<'a> {
    path: &'a Path,
}

impl<'a> WhitelistRepository<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    /// Loads the whitelist, failing open to an empty one.
    pub async fn load(&self) -> Whitelist {
        match tokio::fs::read_to_string(self.path).await {
            Ok(text) => Whitelist::from_lines(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => Whitelist::default(),
            Err(e) => {
                tracing::warn!("Failed to read whitelist {}: {}", self.path.display(), e);
                Whitelist::default()
            }
        }
    }

    pub async fn save(&self, whitelist: &Whitelist) -> Result<(), AppError> {
        tokio::fs::write(self.path, whitelist.render()).await?;
        Ok(())
    }
}
