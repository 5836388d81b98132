use nuncio_command::{CommandError, CommandRunner};
use tracing::debug;

use super::Repository;
use crate::{GitError, Result, TagInfo, tag_ref};

impl<R: CommandRunner> Repository<R> {
    /// Creates an annotated tag on HEAD.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag cannot be created or already exists.
    pub fn create_tag(&self, name: &str, message: &str) -> Result<TagInfo> {
        debug!(tag = name, "creating annotated tag");
        self.run(&Self::git(["tag", "-a", name]).flag("-m", message))?;

        Ok(TagInfo {
            name: name.to_string(),
            message: message.to_string(),
        })
    }

    /// Deletes a local tag. Runs even after an interrupt.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag does not exist or cannot be deleted.
    pub fn delete_tag(&self, name: &str) -> Result<()> {
        debug!(tag = name, "deleting local tag");
        self.run(&Self::git(["tag", "-d", name]).uninterruptible())?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error only if git itself cannot be run.
    pub fn tag_exists(&self, name: &str) -> Result<bool> {
        let reference = tag_ref(name);
        let invocation = Self::git(["rev-parse", "--quiet", "--verify", reference.as_str()]);
        match self.run(&invocation) {
            Ok(_) => Ok(true),
            Err(GitError::Command(CommandError::Failed { .. })) => Ok(false),
            Err(error) => Err(error),
        }
    }
}
