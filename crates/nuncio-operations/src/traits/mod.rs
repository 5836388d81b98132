mod git_provider;
mod manifest_io;
mod registry_publisher;

pub use git_provider::GitProvider;
pub use manifest_io::ManifestIO;
pub use registry_publisher::RegistryPublisher;
