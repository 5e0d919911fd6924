//! Registry repository for the local JSON document.
//!
//! The registry is read fully and rewritten fully; there are no partial updates.

use std::{io::ErrorKind, path::Path};

use crate::server::{error::AppError, model::registry::Registry};

/// Repository for the local registry file.
pub struct RegistryRepository<'a> {
    /// Path of the JSON document.
    path: &'a Path,
}

impl<'a> RegistryRepository<'a> {
    /// Creates a new repository instance.
    ///
    /// # Arguments
    /// - `path` - Location of the registry JSON document
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    /// Loads the full registry.
    ///
    /// Fails open: a missing file yields an empty registry silently, an unreadable
    /// or corrupt one yields an empty registry with a warning.
    ///
    /// # Returns
    /// - `Registry` - The stored registry, or an empty one
    pub async fn load(&self) -> Registry {
        let bytes = match tokio::fs::read(self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Registry::default(),
            Err(e) => {
                tracing::warn!("Failed to read registry {}: {}", self.path.display(), e);
                return Registry::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(registry) => registry,
            Err(e) => {
                tracing::warn!(
                    "Registry {} is corrupt, starting empty: {}",
                    self.path.display(),
                    e
                );
                Registry::default()
            }
        }
    }

    /// Overwrites the registry file with the full document.
    ///
    /// # Returns
    /// - `Ok(())` - File written
    /// - `Err(AppError::JsonErr)` - Serialization failed
    /// - `Err(AppError::IoErr)` - File could not be written
    pub async fn save(&self, registry: &Registry) -> Result<(), AppError> {
        let json = serde_json::to_vec_pretty(registry)?;
        tokio::fs::write(self.path, json).await?;
        Ok(())
    }
}
