use serde_json::{Map, Value};

use crate::{
    context::TestContext, error::TestError, github::FakeGitHub, remote::MemoryRepo,
};

/// Builder for creating test contexts with seeded files.
///
/// Provides a fluent interface for seeding the local registry and whitelist files and
/// the remote repository, then call `build()` to create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::{builder::TestBuilder, factory::user::UserFactory};
///
/// let test = TestBuilder::new()
///     .with_user(UserFactory::new().member_id(42).build())
///     .with_whitelist(&["Mewtwo"])
///     .with_remote_file("ids.txt", "")
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct TestBuilder {
    users: Vec<(u64, Value)>,
    raw_registry: Option<String>,
    whitelist: Option<Vec<String>>,
    github: bool,
    remote_files: Vec<(String, Vec<u8>)>,
}

impl TestBuilder {
    /// Creates a builder with nothing seeded and no fake GitHub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record to the local registry file.
    ///
    /// # Arguments
    /// - `user` - Member ID and record, as returned by `UserFactory::build`
    pub fn with_user(mut self, user: (u64, Value)) -> Self {
        self.users.push(user);
        self
    }

    /// Writes the registry file verbatim instead of from seeded users.
    pub fn with_raw_registry(mut self, content: impl Into<String>) -> Self {
        self.raw_registry = Some(content.into());
        self
    }

    /// Writes the local whitelist file.
    pub fn with_whitelist(mut self, entries: &[&str]) -> Self {
        self.whitelist = Some(entries.iter().map(|e| e.to_string()).collect());
        self
    }

    /// Starts a fake GitHub server with an empty repository.
    pub fn with_github(mut self) -> Self {
        self.github = true;
        self
    }

    /// Seeds a remote file. Implies `with_github`.
    pub fn with_remote_file(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.github = true;
        self.remote_files.push((path.to_string(), content.into()));
        self
    }

    /// Builds the test context.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Files written and server started
    /// - `Err(TestError)` - Temp directory, file write or server bind failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let dir = tempfile::tempdir()?;

        let github = if self.github {
            let repo = MemoryRepo::new();
            for (path, content) in self.remote_files {
                repo.seed(&path, content);
            }
            Some(FakeGitHub::spawn(repo).await?)
        } else {
            None
        };

        let context = TestContext { dir, github };

        if let Some(raw) = self.raw_registry {
            std::fs::write(context.registry_path(), raw)?;
        } else if !self.users.is_empty() {
            let document: Map<String, Value> = self
                .users
                .into_iter()
                .map(|(id, record)| (id.to_string(), record))
                .collect();
            std::fs::write(
                context.registry_path(),
                serde_json::to_vec_pretty(&document)?,
            )?;
        }

        if let Some(entries) = self.whitelist {
            std::fs::write(context.whitelist_path(), entries.join("\n"))?;
        }

        Ok(context)
    }
}
