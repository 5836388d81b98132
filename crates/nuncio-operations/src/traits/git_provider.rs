use nuncio_git::{CommitInfo, TagInfo};

use crate::Result;

/// Version control operations used by a release.
pub trait GitProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the branch does not exist or cannot be checked out.
    fn checkout(&self, branch: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if HEAD is detached or cannot be resolved.
    fn current_branch(&self) -> Result<String>;

    /// # Errors
    ///
    /// Returns an error if the status check fails.
    fn is_working_tree_clean(&self) -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if HEAD cannot be resolved.
    fn head_sha(&self) -> Result<String>;

    /// # Errors
    ///
    /// Returns an error if staging fails.
    fn stage_all(&self) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the commit cannot be created.
    fn commit(&self, message: &str) -> Result<CommitInfo>;

    /// # Errors
    ///
    /// Returns an error if the commit cannot be resolved or the reset fails.
    fn reset_hard(&self, sha: &str) -> Result<()>;

    /// Unstages everything staged since `sha`, leaving file contents alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit cannot be resolved or the reset fails.
    fn reset_index(&self, sha: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if git cannot be run.
    fn tag_exists(&self, name: &str) -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if the tag cannot be created or already exists.
    fn create_tag(&self, name: &str, message: &str) -> Result<TagInfo>;

    /// # Errors
    ///
    /// Returns an error if the tag cannot be deleted.
    fn delete_tag(&self, name: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the remote rejects the push.
    fn push_branch(&self, remote: &str, branch: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the remote rejects the push.
    fn push_tag(&self, remote: &str, tag: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the remote tag cannot be deleted.
    fn delete_remote_tag(&self, remote: &str, tag: &str) -> Result<()>;
}
