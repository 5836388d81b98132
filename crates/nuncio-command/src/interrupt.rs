use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag tripped when the operator interrupts a release.
///
/// Clones observe the same flag. Once tripped it stays tripped for the rest of
/// the process.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trip(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_tripped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
