use nuncio_command::CommandError;
use nuncio_saga::{SagaAuditLog, SagaError};
use thiserror::Error;

/// A compensation that failed while rolling back a release.
#[derive(Debug, Error)]
#[error("rollback {position}/{total} could not {description}: {error}")]
pub struct CompensationFailure {
    /// One-based position in the rollback sequence.
    pub position: usize,
    pub total: usize,
    /// Step whose compensation failed.
    pub step: String,
    pub description: String,
    #[source]
    pub error: Box<OperationError>,
}

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Core(#[from] nuncio_core::CoreError),

    #[error("version calculation failed")]
    Version(#[from] nuncio_version::VersionError),

    #[error(transparent)]
    Manifest(#[from] nuncio_manifest::ManifestError),

    #[error(transparent)]
    Git(#[from] nuncio_git::GitError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("invalid timeout '{value}'")]
    InvalidTimeout {
        value: String,
        #[source]
        source: humantime::DurationError,
    },

    #[error("timeout must be greater than zero")]
    ZeroTimeout,

    #[error("working tree has uncommitted changes; commit or stash them, or use --allow-dirty")]
    DirtyWorkingTree,

    #[error("release branch is '{expected}' but '{actual}' is checked out; switch to '{expected}' first")]
    WrongBranch { expected: String, actual: String },

    #[error("tag '{tag}' already exists")]
    TagExists { tag: String },

    #[error("release interrupted before step '{step}'")]
    Interrupted { step: String },

    #[error("release failed at step '{step}'; rolled back {compensated} completed step(s)")]
    RolledBack {
        step: String,
        #[source]
        source: Box<OperationError>,
        compensated: usize,
        audit: String,
    },

    #[error("release failed at step '{step}' and rollback stopped: {failure}")]
    RollbackIncomplete {
        step: String,
        #[source]
        source: Box<OperationError>,
        failure: CompensationFailure,
        not_attempted: Vec<String>,
        audit: String,
    },
}

pub type Result<T> = std::result::Result<T, OperationError>;

impl OperationError {
    /// Converts a failed release saga, keeping the step-by-step audit summary.
    #[must_use]
    pub fn from_saga(err: SagaError<OperationError>, audit: &SagaAuditLog) -> Self {
        let audit = audit.summary();
        match err {
            SagaError::StepFailed {
                step,
                source,
                compensated,
            } => Self::RolledBack {
                step,
                source: Box::new(source),
                compensated,
                audit,
            },
            SagaError::CompensationFailed {
                failed_step,
                step_error,
                compensation,
                not_attempted,
            } => Self::RollbackIncomplete {
                step: failed_step,
                source: Box::new(step_error),
                failure: CompensationFailure {
                    position: compensation.position,
                    total: compensation.total,
                    step: compensation.step,
                    description: compensation.description,
                    error: Box::new(compensation.error),
                },
                not_attempted,
                audit,
            },
        }
    }

    /// Whether a step failed after the release started changing things, so a
    /// rollback was attempted.
    #[must_use]
    pub fn is_rollback(&self) -> bool {
        matches!(self, Self::RolledBack { .. } | Self::RollbackIncomplete { .. })
    }

    /// Per-step outcome of a release that was rolled back.
    #[must_use]
    pub fn audit_summary(&self) -> Option<&str> {
        match self {
            Self::RolledBack { audit, .. } | Self::RollbackIncomplete { audit, .. } => Some(audit),
            _ => None,
        }
    }

    /// Compensations that were never attempted and must be undone by hand.
    #[must_use]
    pub fn not_attempted(&self) -> &[String] {
        match self {
            Self::RollbackIncomplete { not_attempted, .. } => not_attempted,
            _ => &[],
        }
    }
}
