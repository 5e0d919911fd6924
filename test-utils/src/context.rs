use std::path::PathBuf;
use tempfile::TempDir;

use crate::{github::FakeGitHub, remote::MemoryRepo};

/// File name of the registry document inside the test directory.
pub const REGISTRY_FILE: &str = "users.json";
/// File name of the whitelist inside the test directory.
pub const WHITELIST_FILE: &str = "whitelist.txt";
/// Repository used in fake GitHub URLs.
pub const TEST_REPO: &str = "reroll/queue";

/// Test environment built by [`crate::builder::TestBuilder`].
///
/// Owns a temporary directory holding the local registry and whitelist files, and
/// optionally a fake GitHub server. Both are cleaned up when the context drops.
pub struct TestContext {
    /// Temporary working directory.
    pub dir: TempDir,

    /// Fake GitHub server, when the builder asked for one.
    pub github: Option<FakeGitHub>,
}

impl TestContext {
    /// Path of the local registry document.
    pub fn registry_path(&self) -> PathBuf {
        self.dir.path().join(REGISTRY_FILE)
    }

    /// Path of the local whitelist file.
    pub fn whitelist_path(&self) -> PathBuf {
        self.dir.path().join(WHITELIST_FILE)
    }

    /// Repository behind the fake GitHub server.
    pub fn repo(&self) -> Option<&MemoryRepo> {
        self.github.as_ref().map(|github| &github.repo)
    }

    /// Reads the local registry document as JSON.
    ///
    /// # Returns
    /// - The parsed document, or `Value::Null` when the file is missing or invalid
    pub fn read_registry(&self) -> serde_json::Value {
        std::fs::read(self.registry_path())
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or(serde_json::Value::Null)
    }

    /// Reads the local whitelist file, empty when missing.
    pub fn read_whitelist(&self) -> String {
        std::fs::read_to_string(self.whitelist_path()).unwrap_or_default()
    }
}
