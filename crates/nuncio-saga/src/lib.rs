//! Saga pattern for ordered, reversible multi-step operations.
//!
//! A saga runs its steps strictly in order. Every step that succeeds may hand
//! back a compensation: a value describing how to undo exactly what the step
//! did. When a step fails, the compensations collected so far are applied
//! most-recent-first. Rollback stops at the first compensation that fails, so
//! the operator is never told something was undone when it was not.

mod audit;
mod builder;
mod compensation;
mod error;
mod rollback;
mod saga;
mod step;

pub use audit::{SagaAuditLog, StepRecord, StepStatus};
pub use builder::SagaBuilder;
pub use compensation::{Compensation, CompensationEntry, CompensationStack};
pub use error::{CompensationError, SagaError};
pub use saga::Saga;
pub use step::SagaStep;
