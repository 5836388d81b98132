use nuncio_command::CommandRunner;
use tracing::debug;

use super::Repository;
use crate::{Result, tag_ref};

impl<R: CommandRunner> Repository<R> {
    /// # Errors
    ///
    /// Returns an error if the push is rejected or the remote is unreachable.
    pub fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        debug!(remote, branch, "pushing branch");
        self.run(&Self::git(["push", remote, branch]))?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the push is rejected or the remote is unreachable.
    pub fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        debug!(remote, tag, "pushing tag");
        let reference = tag_ref(tag);
        self.run(&Self::git(["push", remote, reference.as_str()]))?;
        Ok(())
    }

    /// Deletes a tag from `remote`. Runs even after an interrupt.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote rejects the deletion or is unreachable.
    pub fn delete_remote_tag(&self, remote: &str, tag: &str) -> Result<()> {
        debug!(remote, tag, "deleting remote tag");
        self.run(
            &Self::git(["push", remote])
                .flag("--delete", tag_ref(tag))
                .uninterruptible(),
        )?;
        Ok(())
    }
}
