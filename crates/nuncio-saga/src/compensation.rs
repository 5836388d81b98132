/// A recorded reversal for one completed step.
///
/// Implementors are plain values carrying exactly the data needed to undo the
/// step that produced them (a tag name, a commit SHA, a file's old content).
pub trait Compensation<Ctx> {
    type Error;

    /// What applying this compensation does, e.g. `delete local tag v1.2.0`.
    fn description(&self) -> String;

    /// Apply the compensation.
    ///
    /// # Errors
    ///
    /// Returns an error if the reversal could not be carried out.
    fn compensate(&self, ctx: &Ctx) -> Result<(), Self::Error>;
}

/// A compensation together with the step that registered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompensationEntry<C> {
    /// Zero-based position of the step in the saga.
    pub step_index: usize,
    pub step_name: &'static str,
    pub compensation: C,
}

/// Compensations accumulated during one saga run, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompensationStack<C> {
    entries: Vec<CompensationEntry<C>>,
}

impl<C> Default for CompensationStack<C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<C> CompensationStack<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step_index: usize, step_name: &'static str, compensation: C) {
        self.entries.push(CompensationEntry {
            step_index,
            step_name,
            compensation,
        });
    }

    /// Removes and returns the most recently registered compensation.
    pub fn pop(&mut self) -> Option<CompensationEntry<C>> {
        self.entries.pop()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in registration order (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &CompensationEntry<C>> {
        self.entries.iter()
    }
}
