use crate::Result;

/// Publishes the package to its registry. There is no way to take this back.
pub trait RegistryPublisher: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the publish command fails.
    fn publish(&self) -> Result<()>;
}
