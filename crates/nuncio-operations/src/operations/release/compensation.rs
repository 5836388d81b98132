use std::path::PathBuf;

use nuncio_saga::Compensation;
use tracing::warn;

use super::context::ReleaseSagaContext;
use crate::OperationError;
use crate::traits::{GitProvider, ManifestIO, RegistryPublisher};

/// How to undo one completed release step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseCompensation {
    /// Write the manifest's original bytes back.
    RestoreManifest {
        path: PathBuf,
        version: String,
        content: String,
    },
    /// Move the branch back to the commit it pointed at before the release.
    ResetCommit { previous_head: String },
    DeleteTag { tag: String },
    /// Delete the pushed tag. The pushed branch stays as it is.
    DeleteRemoteTag {
        remote: String,
        branch: String,
        tag: String,
        /// First line of the release commit message.
        subject: String,
    },
    /// A publish cannot be taken back; tell the operator what to check.
    ManualCheck { package: String, version: String },
}

impl<G, M, P> Compensation<ReleaseSagaContext<G, M, P>> for ReleaseCompensation
where
    G: GitProvider,
    M: ManifestIO,
    P: RegistryPublisher,
{
    type Error = OperationError;

    fn description(&self) -> String {
        match self {
            Self::RestoreManifest { path, version, .. } => {
                format!("restore {} to version {version}", path.display())
            }
            Self::ResetCommit { previous_head } => {
                format!("reset to commit {}", short_sha(previous_head))
            }
            Self::DeleteTag { tag } => format!("delete local tag {tag}"),
            Self::DeleteRemoteTag { remote, tag, .. } => {
                format!("delete tag {tag} from remote {remote}")
            }
            Self::ManualCheck { package, version } => {
                format!("check the registry for {package}@{version}")
            }
        }
    }

    fn compensate(&self, ctx: &ReleaseSagaContext<G, M, P>) -> Result<(), OperationError> {
        match self {
            Self::RestoreManifest { path, content, .. } => ctx.manifest_io().restore(path, content),
            Self::ResetCommit { previous_head } => ctx.git().reset_hard(previous_head),
            Self::DeleteTag { tag } => ctx.git().delete_tag(tag),
            Self::DeleteRemoteTag {
                remote,
                branch,
                tag,
                subject,
            } => {
                warn!("{}", unreverted_branch_notice(remote, branch, subject));
                ctx.git().delete_remote_tag(remote, tag)
            }
            Self::ManualCheck { package, version } => {
                warn!(
                    "{package}@{version} was published and cannot be withdrawn automatically; check the registry"
                );
                Ok(())
            }
        }
    }
}

/// Operator notice for a release commit left on the remote branch.
pub(crate) fn unreverted_branch_notice(remote: &str, branch: &str, subject: &str) -> String {
    format!(
        "branch '{branch}' on '{remote}' is not reverted; remove the commit \"{subject}\" from {remote}/{branch} manually"
    )
}

fn short_sha(sha: &str) -> &str {
    sha.get(..12).unwrap_or(sha)
}
