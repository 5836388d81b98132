/// A step in a saga that can be executed and, once it succeeded, undone.
///
/// # Type Parameters
///
/// - `Context`: Shared dependencies (injected, not owned by steps)
/// - `Error`: The error type for step failures
/// - `Compensation`: The value a successful step leaves behind for rollback
pub trait SagaStep: Send + Sync {
    /// Shared context providing dependencies.
    type Context;

    /// Error type for step failures.
    type Error;

    /// Undo record produced by a successful execution.
    type Compensation;

    /// Human-readable name for logging and error messages.
    fn name(&self) -> &'static str;

    /// Execute the step.
    ///
    /// Returns the compensation that reverses this step, or `None` when there
    /// is nothing this run created that could be undone.
    ///
    /// # Errors
    ///
    /// Returns an error if the step fails. A failed step is assumed to have
    /// had no effect and is not compensated.
    fn execute(&self, ctx: &Self::Context) -> Result<Option<Self::Compensation>, Self::Error>;
}
