use std::fmt::Debug;

use tracing::{error, info};

use crate::audit::{SagaAuditLog, StepStatus};
use crate::compensation::{Compensation, CompensationStack};
use crate::error::CompensationError;

/// Why a rollback did not complete.
pub(crate) struct Halted<E> {
    pub(crate) error: CompensationError<E>,
    pub(crate) not_attempted: Vec<String>,
}

/// Applies every compensation on the stack, most recent first.
///
/// Stops at the first compensation that fails; the remaining entries are
/// reported as not attempted and marked in the audit log. Returns the number
/// of compensations applied.
pub(crate) fn roll_back<Ctx, Err, C>(
    mut stack: CompensationStack<C>,
    ctx: &Ctx,
    audit_log: &mut SagaAuditLog,
) -> Result<usize, Halted<Err>>
where
    C: Compensation<Ctx, Error = Err>,
    Err: Debug,
{
    let total = stack.len();
    let mut applied = 0;

    while let Some(entry) = stack.pop() {
        let position = applied + 1;
        let description = entry.compensation.description();
        info!("rollback {position}/{total}: {description}");

        match entry.compensation.compensate(ctx) {
            Ok(()) => {
                audit_log.mark(entry.step_index, StepStatus::Compensated);
                applied += 1;
            }
            Err(error) => {
                error!(
                    step = entry.step_name,
                    "rollback {position}/{total} failed: {error:?}"
                );
                audit_log.mark(entry.step_index, StepStatus::CompensationFailed);

                let mut not_attempted = Vec::with_capacity(stack.len());
                while let Some(rest) = stack.pop() {
                    audit_log.mark(rest.step_index, StepStatus::NotCompensated);
                    not_attempted.push(rest.compensation.description());
                }

                return Err(Halted {
                    error: CompensationError {
                        position,
                        total,
                        step: entry.step_name.to_string(),
                        description,
                        error,
                    },
                    not_attempted,
                });
            }
        }
    }

    Ok(applied)
}
