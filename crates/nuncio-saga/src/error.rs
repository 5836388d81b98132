use std::fmt::Debug;

use thiserror::Error;

/// Error from a failed compensation operation.
#[derive(Debug, thiserror::Error)]
#[error("rollback {position}/{total} failed for step '{step}': could not {description}")]
pub struct CompensationError<E> {
    /// One-based position of this compensation in the rollback sequence.
    pub position: usize,
    /// Number of compensations the rollback intended to apply.
    pub total: usize,
    /// Name of the step whose compensation failed.
    pub step: String,
    /// Description of what the compensation was trying to do.
    pub description: String,
    /// The underlying error.
    #[source]
    pub error: E,
}

/// Error from saga execution.
#[derive(Debug, Error)]
pub enum SagaError<E: Debug> {
    /// A step failed and every compensation succeeded.
    #[error("step '{step}' failed; rolled back {compensated} completed step(s)")]
    StepFailed {
        /// Name of the step that failed.
        step: String,
        /// The error that caused the step to fail.
        #[source]
        source: E,
        /// Number of compensations applied during rollback.
        compensated: usize,
    },

    /// A step failed and rollback stopped at a failing compensation.
    #[error(
        "step '{failed_step}' failed, and rollback stopped: {compensation}; {} compensation(s) not attempted",
        not_attempted.len()
    )]
    CompensationFailed {
        /// Name of the step that originally failed.
        failed_step: String,
        /// The error from the failed step.
        step_error: E,
        /// The compensation that failed.
        compensation: CompensationError<E>,
        /// Descriptions of the compensations that were never attempted,
        /// most recent first.
        not_attempted: Vec<String>,
    },
}

impl<E: Debug> SagaError<E> {
    /// Name of the step whose failure triggered the rollback.
    #[must_use]
    pub fn failed_step(&self) -> &str {
        match self {
            Self::StepFailed { step, .. } => step,
            Self::CompensationFailed { failed_step, .. } => failed_step,
        }
    }

    /// The error returned by the failing step.
    #[must_use]
    pub fn step_error(&self) -> &E {
        match self {
            Self::StepFailed { source, .. } => source,
            Self::CompensationFailed { step_error, .. } => step_error,
        }
    }

    /// Whether every registered compensation was applied.
    #[must_use]
    pub fn fully_rolled_back(&self) -> bool {
        matches!(self, Self::StepFailed { .. })
    }
}
