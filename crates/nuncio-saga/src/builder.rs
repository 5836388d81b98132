use std::marker::PhantomData;

use crate::saga::{BoxedStep, Saga};
use crate::step::SagaStep;

/// Marker type for a builder with no steps.
pub struct Empty;

/// Marker type for a builder with at least one step.
pub struct HasSteps;

/// Type-state builder for constructing sagas.
///
/// All steps of one saga share a context, an error type and a compensation
/// type. An empty saga cannot be built:
///
/// ```compile_fail
/// use nuncio_saga::SagaBuilder;
///
/// // `build()` is only available after `first_step()`
/// let saga = SagaBuilder::<(), (), (), _>::new().build();
/// ```
pub struct SagaBuilder<Ctx, Err, Comp, State> {
    steps: Vec<BoxedStep<Ctx, Err, Comp>>,
    _state: PhantomData<State>,
}

impl<Ctx, Err, Comp> SagaBuilder<Ctx, Err, Comp, Empty> {
    /// Create a new saga builder in the empty state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            _state: PhantomData,
        }
    }

    /// Add the first step to the saga.
    #[must_use]
    pub fn first_step<S>(self, step: S) -> SagaBuilder<Ctx, Err, Comp, HasSteps>
    where
        S: SagaStep<Context = Ctx, Error = Err, Compensation = Comp> + 'static,
    {
        let mut steps = self.steps;
        steps.push(Box::new(step));
        SagaBuilder {
            steps,
            _state: PhantomData,
        }
    }
}

impl<Ctx, Err, Comp> Default for SagaBuilder<Ctx, Err, Comp, Empty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx, Err, Comp> SagaBuilder<Ctx, Err, Comp, HasSteps> {
    /// Append a step.
    #[must_use]
    pub fn then<S>(mut self, step: S) -> Self
    where
        S: SagaStep<Context = Ctx, Error = Err, Compensation = Comp> + 'static,
    {
        self.steps.push(Box::new(step));
        self
    }

    /// Append a step only when `condition` holds.
    #[must_use]
    pub fn then_if<S>(self, condition: bool, step: S) -> Self
    where
        S: SagaStep<Context = Ctx, Error = Err, Compensation = Comp> + 'static,
    {
        if condition { self.then(step) } else { self }
    }

    /// Build the saga from the accumulated steps.
    #[must_use]
    pub fn build(self) -> Saga<Ctx, Err, Comp> {
        Saga::from_steps(self.steps)
    }
}
