//! In-memory repository used behind the fake GitHub server.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

/// A commit recorded by [`MemoryRepo::put`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub path: String,
    pub message: String,
}

/// Why a write was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutError {
    /// Supplied revision does not match the stored one.
    Conflict,
}

struct StoredFile {
    content: Vec<u8>,
    revision: String,
}

#[derive(Default)]
struct RepoState {
    files: HashMap<String, StoredFile>,
    commits: Vec<Commit>,
    next_revision: u64,
    failing: bool,
    mirror_lag: usize,
}

impl RepoState {
    fn revision(&mut self) -> String {
        self.next_revision += 1;
        format!("{:040x}", self.next_revision)
    }
}

/// Shared in-memory repository.
///
/// Clones share state, so a test keeps one handle while the fake server holds another.
#[derive(Clone, Default)]
pub struct MemoryRepo {
    state: Arc<Mutex<RepoState>>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, RepoState> {
        self.state.lock().expect("memory repo lock poisoned")
    }

    /// Stores a file without recording a commit.
    pub fn seed(&self, path: &str, content: impl Into<Vec<u8>>) {
        let mut state = self.state();
        let revision = state.revision();
        state.files.insert(
            path.to_string(),
            StoredFile {
                content: content.into(),
                revision,
            },
        );
    }

    /// Content and revision of a file.
    pub fn get(&self, path: &str) -> Option<(Vec<u8>, String)> {
        self.state()
            .files
            .get(path)
            .map(|file| (file.content.clone(), file.revision.clone()))
    }

    /// Content of a file as text.
    pub fn text(&self, path: &str) -> Option<String> {
        self.get(path)
            .map(|(content, _)| String::from_utf8_lossy(&content).into_owned())
    }

    /// Writes a file, enforcing the revision token like the contents API.
    ///
    /// Creating requires no revision; updating requires the current one.
    ///
    /// # Returns
    /// - `Ok(String)` - New revision
    /// - `Err(PutError::Conflict)` - Missing or stale revision
    pub fn put(
        &self,
        path: &str,
        content: Vec<u8>,
        message: &str,
        revision: Option<&str>,
    ) -> Result<String, PutError> {
        let mut state = self.state();

        let current = state.files.get(path).map(|file| file.revision.as_str());
        if current != revision {
            return Err(PutError::Conflict);
        }

        let revision = state.revision();
        state.files.insert(
            path.to_string(),
            StoredFile {
                content,
                revision: revision.clone(),
            },
        );
        state.commits.push(Commit {
            path: path.to_string(),
            message: message.to_string(),
        });

        Ok(revision)
    }

    /// All commits in order.
    pub fn commits(&self) -> Vec<Commit> {
        self.state().commits.clone()
    }

    /// Commits touching one path.
    pub fn commits_for(&self, path: &str) -> Vec<Commit> {
        self.state()
            .commits
            .iter()
            .filter(|commit| commit.path == path)
            .cloned()
            .collect()
    }

    /// Makes every API and mirror request fail with a server error.
    pub fn set_failing(&self, failing: bool) {
        self.state().failing = failing;
    }

    pub fn is_failing(&self) -> bool {
        self.state().failing
    }

    /// Makes the next `requests` mirror requests answer as if the file had not
    /// propagated yet.
    pub fn set_mirror_lag(&self, requests: usize) {
        self.state().mirror_lag = requests;
    }

    /// Consumes one unit of mirror lag.
    ///
    /// # Returns
    /// - `true` - This request should be served as not yet propagated
    pub fn take_mirror_lag(&self) -> bool {
        let mut state = self.state();
        if state.mirror_lag > 0 {
            state.mirror_lag -= 1;
            true
        } else {
            false
        }
    }
}
