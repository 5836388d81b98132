mod git;
mod manifest;
mod npm;

pub use git::CliGitProvider;
pub use manifest::FileSystemManifestIO;
pub use npm::NpmPublisher;
