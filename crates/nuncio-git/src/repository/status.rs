use nuncio_command::CommandRunner;

use super::Repository;
use crate::{GitError, Result};

impl<R: CommandRunner> Repository<R> {
    /// # Errors
    ///
    /// Returns an error if the git status operation fails.
    pub fn is_working_tree_clean(&self) -> Result<bool> {
        let output = self.run(&Self::git(["status", "--porcelain"]))?;
        Ok(output.trimmed_stdout().is_empty())
    }

    /// Full SHA of the commit HEAD points at.
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD cannot be resolved (e.g. an empty repository).
    pub fn head_sha(&self) -> Result<String> {
        let output = self.run(&Self::git(["rev-parse", "--verify", "HEAD"]))?;
        let sha = output.trimmed_stdout();

        if sha.is_empty() || !sha.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(GitError::UnexpectedOutput {
                command: "rev-parse --verify HEAD".to_string(),
                output: sha.to_string(),
            });
        }

        Ok(sha.to_string())
    }
}
