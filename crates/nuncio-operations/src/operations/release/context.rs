use std::sync::Arc;

use nuncio_command::InterruptFlag;

use crate::traits::{GitProvider, ManifestIO, RegistryPublisher};
use crate::{OperationError, Result};

/// Dependencies shared by every release step and compensation.
pub struct ReleaseSagaContext<G, M, P> {
    git: Arc<G>,
    manifest_io: Arc<M>,
    publisher: Arc<P>,
    interrupt: InterruptFlag,
}

impl<G, M, P> Clone for ReleaseSagaContext<G, M, P> {
    fn clone(&self) -> Self {
        Self {
            git: Arc::clone(&self.git),
            manifest_io: Arc::clone(&self.manifest_io),
            publisher: Arc::clone(&self.publisher),
            interrupt: self.interrupt.clone(),
        }
    }
}

impl<G, M, P> ReleaseSagaContext<G, M, P>
where
    G: GitProvider,
    M: ManifestIO,
    P: RegistryPublisher,
{
    pub fn new(
        git: Arc<G>,
        manifest_io: Arc<M>,
        publisher: Arc<P>,
        interrupt: InterruptFlag,
    ) -> Self {
        Self {
            git,
            manifest_io,
            publisher,
            interrupt,
        }
    }

    #[must_use]
    pub fn git(&self) -> &G {
        &self.git
    }

    #[must_use]
    pub fn manifest_io(&self) -> &M {
        &self.manifest_io
    }

    #[must_use]
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Fails with [`OperationError::Interrupted`] once the operator has
    /// interrupted the release, so no further step starts.
    ///
    /// # Errors
    ///
    /// Returns an error if the interrupt flag is set.
    pub fn ensure_not_interrupted(&self, step: &str) -> Result<()> {
        if self.interrupt.is_tripped() {
            return Err(OperationError::Interrupted {
                step: step.to_string(),
            });
        }
        Ok(())
    }
}
