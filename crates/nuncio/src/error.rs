use nuncio_operations::OperationError;
use thiserror::Error;

/// Exit status after a step failed and a rollback ran.
pub(crate) const ROLLBACK_EXIT_STATUS: u8 = 244;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("failed to install interrupt handler")]
    InterruptHandler(#[from] ctrlc::Error),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

pub type Result<T> = std::result::Result<T, CliError>;

impl CliError {
    /// `244` once a rollback was attempted, `1` for anything caught before
    /// the release changed something.
    pub(crate) fn exit_status(&self) -> u8 {
        match self {
            Self::Operation(e) if e.is_rollback() => ROLLBACK_EXIT_STATUS,
            _ => 1,
        }
    }
}
