use nuncio_command::CommandRunner;
use tracing::debug;

use super::Repository;
use crate::{CommitInfo, Result};

impl<R: CommandRunner> Repository<R> {
    /// Stages every change in the working tree (`git add .`).
    ///
    /// # Errors
    ///
    /// Returns an error if staging fails.
    pub fn stage_all(&self) -> Result<()> {
        self.run(&Self::git(["add", "."]))?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the commit cannot be created, e.g. when nothing is
    /// staged.
    pub fn commit(&self, message: &str) -> Result<CommitInfo> {
        self.run(&Self::git(["commit"]).flag("-m", message))?;
        let sha = self.head_sha()?;
        debug!(%sha, "created commit");

        Ok(CommitInfo {
            sha,
            message: message.to_string(),
        })
    }

    /// Resets the index to `sha` and keeps the working tree as it is, so
    /// staged changes become unstaged. Runs even after an interrupt.
    ///
    /// # Errors
    ///
    /// Returns an error if `sha` cannot be resolved or the reset fails.
    pub fn reset_index(&self, sha: &str) -> Result<()> {
        debug!(%sha, "resetting index");
        self.run(&Self::git(["reset", "--quiet", "--mixed", sha]).uninterruptible())?;
        Ok(())
    }

    /// Moves the current branch to `sha`, discarding the index and working
    /// tree changes made since. Runs even after an interrupt.
    ///
    /// # Errors
    ///
    /// Returns an error if `sha` cannot be resolved or the reset fails.
    pub fn reset_hard(&self, sha: &str) -> Result<()> {
        debug!(%sha, "hard reset");
        self.run(&Self::git(["reset", "--hard", sha]).uninterruptible())?;
        Ok(())
    }
}
