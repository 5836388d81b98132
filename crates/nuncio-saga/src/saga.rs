use std::fmt::Debug;

use tracing::{debug, info};

use crate::audit::SagaAuditLog;
use crate::compensation::{Compensation, CompensationStack};
use crate::error::SagaError;
use crate::rollback::{Halted, roll_back};
use crate::step::SagaStep;

pub(crate) type BoxedStep<Ctx, Err, Comp> =
    Box<dyn SagaStep<Context = Ctx, Error = Err, Compensation = Comp>>;

/// A compiled saga ready for execution.
///
/// Steps run in order. If any step fails, the compensations registered by the
/// steps before it are applied in reverse order (LIFO).
pub struct Saga<Ctx, Err, Comp> {
    steps: Vec<BoxedStep<Ctx, Err, Comp>>,
}

impl<Ctx, Err, Comp> Saga<Ctx, Err, Comp> {
    pub(crate) fn from_steps(steps: Vec<BoxedStep<Ctx, Err, Comp>>) -> Self {
        Self { steps }
    }

    /// Names of the steps in execution order.
    #[must_use]
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Number of steps in the saga.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the saga has no steps. Always false for a built saga.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<Ctx, Err, Comp> Saga<Ctx, Err, Comp>
where
    Comp: Compensation<Ctx, Error = Err>,
    Err: Debug,
{
    /// Execute the saga.
    ///
    /// # Errors
    ///
    /// Returns `SagaError::StepFailed` if a step fails and all compensations succeed.
    /// Returns `SagaError::CompensationFailed` if a step fails and rollback halts
    /// at a failing compensation.
    pub fn execute(&self, ctx: &Ctx) -> Result<(), SagaError<Err>> {
        let (result, _audit_log) = self.execute_with_audit(ctx);
        result
    }

    /// Execute the saga and return both the result and an audit log.
    pub fn execute_with_audit(&self, ctx: &Ctx) -> (Result<(), SagaError<Err>>, SagaAuditLog) {
        let mut audit_log = SagaAuditLog::new();
        let mut stack = CompensationStack::new();

        for (index, step) in self.steps.iter().enumerate() {
            debug!(step = step.name(), "executing step {}/{}", index + 1, self.steps.len());
            audit_log.record_start(step.name());

            match step.execute(ctx) {
                Ok(Some(compensation)) => {
                    audit_log.record_success(Some(compensation.description()));
                    stack.push(index, step.name(), compensation);
                }
                Ok(None) => audit_log.record_success(None),
                Err(step_error) => {
                    audit_log.record_failure();
                    info!(step = step.name(), "step failed, rolling back {} step(s)", stack.len());

                    let result = match roll_back(stack, ctx, &mut audit_log) {
                        Ok(compensated) => Err(SagaError::StepFailed {
                            step: step.name().to_string(),
                            source: step_error,
                            compensated,
                        }),
                        Err(Halted {
                            error,
                            not_attempted,
                        }) => Err(SagaError::CompensationFailed {
                            failed_step: step.name().to_string(),
                            step_error,
                            compensation: error,
                            not_attempted,
                        }),
                    };
                    return (result, audit_log);
                }
            }
        }

        (Ok(()), audit_log)
    }
}
