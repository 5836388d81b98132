use nuncio_command::CommandRunner;
use nuncio_git::{CommitInfo, Repository, TagInfo};

use crate::Result;
use crate::traits::GitProvider;

/// [`GitProvider`] backed by the `git` executable.
pub struct CliGitProvider<R> {
    repo: Repository<R>,
}

impl<R: CommandRunner> CliGitProvider<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self {
            repo: Repository::new(runner),
        }
    }
}

impl<R: CommandRunner> GitProvider for CliGitProvider<R> {
    fn checkout(&self, branch: &str) -> Result<()> {
        Ok(self.repo.checkout(branch)?)
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.repo.current_branch()?)
    }

    fn is_working_tree_clean(&self) -> Result<bool> {
        Ok(self.repo.is_working_tree_clean()?)
    }

    fn head_sha(&self) -> Result<String> {
        Ok(self.repo.head_sha()?)
    }

    fn stage_all(&self) -> Result<()> {
        Ok(self.repo.stage_all()?)
    }

    fn commit(&self, message: &str) -> Result<CommitInfo> {
        Ok(self.repo.commit(message)?)
    }

    fn reset_hard(&self, sha: &str) -> Result<()> {
        Ok(self.repo.reset_hard(sha)?)
    }

    fn reset_index(&self, sha: &str) -> Result<()> {
        Ok(self.repo.reset_index(sha)?)
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        Ok(self.repo.tag_exists(name)?)
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<TagInfo> {
        Ok(self.repo.create_tag(name, message)?)
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        Ok(self.repo.delete_tag(name)?)
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        Ok(self.repo.push_branch(remote, branch)?)
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        Ok(self.repo.push_tag(remote, tag)?)
    }

    fn delete_remote_tag(&self, remote: &str, tag: &str) -> Result<()> {
        Ok(self.repo.delete_remote_tag(remote, tag)?)
    }
}
