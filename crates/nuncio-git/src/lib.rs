mod error;
mod repository;
mod types;

pub use error::GitError;
pub use repository::Repository;
pub use types::{CommitInfo, TagInfo};

pub type Result<T> = std::result::Result<T, GitError>;

/// Fully qualified ref for a tag, so pushes never resolve to a branch of the
/// same name.
#[must_use]
pub fn tag_ref(tag: &str) -> String {
    format!("refs/tags/{tag}")
}
