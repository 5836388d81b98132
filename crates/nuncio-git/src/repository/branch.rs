use nuncio_command::CommandRunner;
use tracing::debug;

use super::Repository;
use crate::{GitError, Result};

impl<R: CommandRunner> Repository<R> {
    /// # Errors
    ///
    /// Returns an error if the branch does not exist or the switch would
    /// overwrite local changes.
    pub fn checkout(&self, branch: &str) -> Result<()> {
        debug!(branch, "checking out branch");
        self.run(&Self::git(["checkout", branch]))?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`GitError::DetachedHead`] if HEAD is not on a branch.
    pub fn current_branch(&self) -> Result<String> {
        let output = self.run(&Self::git(["rev-parse", "--abbrev-ref", "HEAD"]))?;
        let branch = output.trimmed_stdout();

        if branch == "HEAD" {
            return Err(GitError::DetachedHead);
        }

        Ok(branch.to_string())
    }
}
