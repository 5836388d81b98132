use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use nuncio_command::CommandError;
use nuncio_git::{CommitInfo, GitError, TagInfo};
use nuncio_manifest::{ManifestError, PackageManifest, ReleaseSettings};
use semver::Version;

use crate::traits::{GitProvider, ManifestIO, RegistryPublisher};
use crate::{OperationError, Result};

fn mock_failure(operation: &str) -> OperationError {
    OperationError::Git(GitError::Command(CommandError::Failed {
        command: format!("git {operation}"),
        code: Some(1),
        stderr: format!("mock {operation} failure"),
    }))
}

/// Records every call as `"<operation> <args>"` and fails the operations it
/// was told to fail.
pub struct MockGitProvider {
    calls: Mutex<Vec<String>>,
    failing: HashSet<&'static str>,
    dirty: bool,
    tags: HashSet<String>,
    branch: String,
}

impl Default for MockGitProvider {
    fn default() -> Self {
        Self {
            calls: Mutex::default(),
            failing: HashSet::new(),
            dirty: false,
            tags: HashSet::new(),
            branch: "master".to_string(),
        }
    }
}

impl MockGitProvider {
    pub const HEAD: &'static str = "1111111111111111111111111111111111111111";
    pub const RELEASE_COMMIT: &'static str = "2222222222222222222222222222222222222222";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports `branch` as the checked-out branch.
    #[must_use]
    pub fn on_branch(mut self, branch: &str) -> Self {
        self.branch = branch.to_string();
        self
    }

    #[must_use]
    pub fn failing(mut self, operation: &'static str) -> Self {
        self.failing.insert(operation);
        self
    }

    #[must_use]
    pub fn dirty(mut self) -> Self {
        self.dirty = true;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.insert(tag.to_string());
        self
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    fn record(&self, operation: &'static str, args: &[&str]) -> Result<()> {
        let mut call = operation.to_string();
        for arg in args {
            call.push(' ');
            call.push_str(arg);
        }
        self.calls.lock().expect("lock poisoned").push(call);

        if self.failing.contains(operation) {
            return Err(mock_failure(operation));
        }
        Ok(())
    }
}

impl GitProvider for MockGitProvider {
    fn checkout(&self, branch: &str) -> Result<()> {
        self.record("checkout", &[branch])
    }

    fn current_branch(&self) -> Result<String> {
        self.record("current_branch", &[])?;
        Ok(self.branch.clone())
    }

    fn is_working_tree_clean(&self) -> Result<bool> {
        self.record("is_working_tree_clean", &[])?;
        Ok(!self.dirty)
    }

    fn head_sha(&self) -> Result<String> {
        self.record("head_sha", &[])?;
        Ok(Self::HEAD.to_string())
    }

    fn stage_all(&self) -> Result<()> {
        self.record("stage_all", &[])
    }

    fn commit(&self, message: &str) -> Result<CommitInfo> {
        self.record("commit", &[message])?;
        Ok(CommitInfo {
            sha: Self::RELEASE_COMMIT.to_string(),
            message: message.to_string(),
        })
    }

    fn reset_hard(&self, sha: &str) -> Result<()> {
        self.record("reset_hard", &[sha])
    }

    fn reset_index(&self, sha: &str) -> Result<()> {
        self.record("reset_index", &[sha])
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        self.record("tag_exists", &[name])?;
        Ok(self.tags.contains(name))
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<TagInfo> {
        self.record("create_tag", &[name])?;
        Ok(TagInfo {
            name: name.to_string(),
            message: message.to_string(),
        })
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        self.record("delete_tag", &[name])
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        self.record("push_branch", &[remote, branch])
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.record("push_tag", &[remote, tag])
    }

    fn delete_remote_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.record("delete_remote_tag", &[remote, tag])
    }
}

struct ManifestState {
    version: String,
    content: String,
    /// Every `(version, content)` pair the manifest has held.
    history: Vec<(String, String)>,
}

/// In-memory `package.json` holding only `name` and `version`.
pub struct MockManifestIO {
    name: String,
    state: Mutex<ManifestState>,
    calls: Mutex<Vec<String>>,
    fail_write: bool,
}

impl MockManifestIO {
    #[must_use]
    pub fn new(name: &str, version: &str) -> Self {
        let content = Self::render(name, version);
        Self {
            name: name.to_string(),
            state: Mutex::new(ManifestState {
                version: version.to_string(),
                content: content.clone(),
                history: vec![(version.to_string(), content)],
            }),
            calls: Mutex::new(Vec::new()),
            fail_write: false,
        }
    }

    /// Writes the new content, then fails verification.
    #[must_use]
    pub fn failing_write(mut self) -> Self {
        self.fail_write = true;
        self
    }

    fn render(name: &str, version: &str) -> String {
        format!("{{\n  \"name\": \"{name}\",\n  \"version\": \"{version}\"\n}}\n")
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn version(&self) -> String {
        self.state.lock().expect("lock poisoned").version.clone()
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn content(&self) -> String {
        self.state.lock().expect("lock poisoned").content.clone()
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    fn record(&self, call: &str) {
        self.calls
            .lock()
            .expect("lock poisoned")
            .push(call.to_string());
    }
}

impl ManifestIO for MockManifestIO {
    fn read(&self, path: &Path) -> Result<PackageManifest> {
        self.record("read");
        let state = self.state.lock().expect("lock poisoned");
        Ok(PackageManifest {
            path: path.to_path_buf(),
            name: self.name.clone(),
            version: state.version.clone(),
            settings: ReleaseSettings::default(),
            original_content: state.content.clone(),
        })
    }

    fn write_version(&self, path: &Path, version: &Version) -> Result<()> {
        self.record("write_version");
        let version = version.to_string();
        let content = Self::render(&self.name, &version);
        let mut state = self.state.lock().expect("lock poisoned");
        state.version.clone_from(&version);
        state.content.clone_from(&content);
        state.history.push((version.clone(), content));

        if self.fail_write {
            return Err(ManifestError::VerificationFailed {
                path: path.to_path_buf(),
                expected: version,
                actual: "mock".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn restore(&self, _path: &Path, content: &str) -> Result<()> {
        self.record("restore");
        let mut state = self.state.lock().expect("lock poisoned");
        let known_version = state
            .history
            .iter()
            .find(|(_, known)| known == content)
            .map(|(version, _)| version.clone());
        if let Some(version) = known_version {
            state.version = version;
        }
        state.content = content.to_string();
        Ok(())
    }
}

#[derive(Default)]
pub struct MockPublisher {
    published: Mutex<usize>,
    fail: bool,
}

impl MockPublisher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn publish_count(&self) -> usize {
        *self.published.lock().expect("lock poisoned")
    }
}

impl RegistryPublisher for MockPublisher {
    fn publish(&self) -> Result<()> {
        *self.published.lock().expect("lock poisoned") += 1;
        if self.fail {
            return Err(OperationError::Command(CommandError::Failed {
                command: "npm publish".to_string(),
                code: Some(1),
                stderr: "mock publish failure".to_string(),
            }));
        }
        Ok(())
    }
}
