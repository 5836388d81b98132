use nuncio_command::{CommandRunner, Invocation};
use tracing::info;

use crate::Result;
use crate::traits::RegistryPublisher;

/// Publishes with `npm publish` in the runner's working directory.
pub struct NpmPublisher<R> {
    runner: R,
}

impl<R: CommandRunner> NpmPublisher<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub(crate) fn invocation() -> Invocation {
        Invocation::new("npm").arg("publish")
    }
}

impl<R: CommandRunner> RegistryPublisher for NpmPublisher<R> {
    fn publish(&self) -> Result<()> {
        let output = self.runner.run(&Self::invocation())?;
        info!(elapsed = ?output.duration, "published to npm");
        Ok(())
    }
}
