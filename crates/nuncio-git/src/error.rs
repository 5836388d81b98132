use nuncio_command::CommandError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("`git {command}` produced unexpected output '{output}'")]
    UnexpectedOutput { command: String, output: String },

    #[error("HEAD is detached, not on a branch")]
    DetachedHead,
}

impl GitError {
    /// Captured stderr of the failing git command, if there was one.
    #[must_use]
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Command(error) => error.stderr(),
            _ => None,
        }
    }
}
