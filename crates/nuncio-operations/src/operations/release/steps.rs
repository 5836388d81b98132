//! The release steps, in the order they run.
//!
//! Each step owns only its inputs and reaches external systems through the
//! [`ReleaseSagaContext`]. A step that changes something returns the
//! [`ReleaseCompensation`] that reverses exactly that change.

use std::marker::PhantomData;
use std::path::PathBuf;

use nuncio_saga::SagaStep;
use semver::Version;
use tracing::{info, warn};

use super::compensation::{ReleaseCompensation, unreverted_branch_notice};
use super::context::ReleaseSagaContext;
use crate::OperationError;
use crate::traits::{GitProvider, ManifestIO, RegistryPublisher};

type StepResult = Result<Option<ReleaseCompensation>, OperationError>;

pub struct CheckoutStep<G, M, P> {
    branch: String,
    _marker: PhantomData<(G, M, P)>,
}

impl<G, M, P> CheckoutStep<G, M, P> {
    #[must_use]
    pub fn new(branch: String) -> Self {
        Self {
            branch,
            _marker: PhantomData,
        }
    }
}

impl<G, M, P> SagaStep for CheckoutStep<G, M, P>
where
    G: GitProvider,
    M: ManifestIO,
    P: RegistryPublisher,
{
    type Context = ReleaseSagaContext<G, M, P>;
    type Error = OperationError;
    type Compensation = ReleaseCompensation;

    fn name(&self) -> &'static str {
        "checkout"
    }

    fn execute(&self, ctx: &Self::Context) -> StepResult {
        ctx.ensure_not_interrupted(self.name())?;
        info!(branch = %self.branch, "checking out release branch");
        ctx.git().checkout(&self.branch)?;
        Ok(None)
    }
}

pub struct WriteVersionStep<G, M, P> {
    manifest_path: PathBuf,
    current_version: Version,
    next_version: Version,
    original_content: String,
    _marker: PhantomData<(G, M, P)>,
}

impl<G, M, P> WriteVersionStep<G, M, P> {
    #[must_use]
    pub fn new(
        manifest_path: PathBuf,
        current_version: Version,
        next_version: Version,
        original_content: String,
    ) -> Self {
        Self {
            manifest_path,
            current_version,
            next_version,
            original_content,
            _marker: PhantomData,
        }
    }
}

impl<G, M, P> SagaStep for WriteVersionStep<G, M, P>
where
    G: GitProvider,
    M: ManifestIO,
    P: RegistryPublisher,
{
    type Context = ReleaseSagaContext<G, M, P>;
    type Error = OperationError;
    type Compensation = ReleaseCompensation;

    fn name(&self) -> &'static str {
        "write_version"
    }

    fn execute(&self, ctx: &Self::Context) -> StepResult {
        ctx.ensure_not_interrupted(self.name())?;
        info!(
            manifest = %self.manifest_path.display(),
            from = %self.current_version,
            to = %self.next_version,
            "writing new version"
        );

        if let Err(err) = ctx
            .manifest_io()
            .write_version(&self.manifest_path, &self.next_version)
        {
            // A failed verification leaves the new content on disk.
            if let Err(restore_err) = ctx
                .manifest_io()
                .restore(&self.manifest_path, &self.original_content)
            {
                warn!(
                    manifest = %self.manifest_path.display(),
                    "could not restore manifest after failed write: {restore_err}"
                );
            }
            return Err(err);
        }

        Ok(Some(ReleaseCompensation::RestoreManifest {
            path: self.manifest_path.clone(),
            version: self.current_version.to_string(),
            content: self.original_content.clone(),
        }))
    }
}

pub struct CommitStep<G, M, P> {
    message: String,
    _marker: PhantomData<(G, M, P)>,
}

impl<G, M, P> CommitStep<G, M, P> {
    #[must_use]
    pub fn new(message: String) -> Self {
        Self {
            message,
            _marker: PhantomData,
        }
    }
}

impl<G, M, P> SagaStep for CommitStep<G, M, P>
where
    G: GitProvider,
    M: ManifestIO,
    P: RegistryPublisher,
{
    type Context = ReleaseSagaContext<G, M, P>;
    type Error = OperationError;
    type Compensation = ReleaseCompensation;

    fn name(&self) -> &'static str {
        "commit"
    }

    fn execute(&self, ctx: &Self::Context) -> StepResult {
        ctx.ensure_not_interrupted(self.name())?;
        let previous_head = ctx.git().head_sha()?;
        let committed = ctx
            .git()
            .stage_all()
            .and_then(|()| ctx.git().commit(&self.message));
        let commit = match committed {
            Ok(commit) => commit,
            Err(err) => {
                // Leave nothing staged; the manifest compensation only fixes the file.
                if let Err(reset_err) = ctx.git().reset_index(&previous_head) {
                    warn!("could not unstage changes after failed commit: {reset_err}");
                }
                return Err(err);
            }
        };
        info!(sha = %commit.sha, "committed release");

        Ok(Some(ReleaseCompensation::ResetCommit { previous_head }))
    }
}

pub struct TagStep<G, M, P> {
    tag: String,
    message: String,
    _marker: PhantomData<(G, M, P)>,
}

impl<G, M, P> TagStep<G, M, P> {
    #[must_use]
    pub fn new(tag: String, message: String) -> Self {
        Self {
            tag,
            message,
            _marker: PhantomData,
        }
    }
}

impl<G, M, P> SagaStep for TagStep<G, M, P>
where
    G: GitProvider,
    M: ManifestIO,
    P: RegistryPublisher,
{
    type Context = ReleaseSagaContext<G, M, P>;
    type Error = OperationError;
    type Compensation = ReleaseCompensation;

    fn name(&self) -> &'static str {
        "tag"
    }

    fn execute(&self, ctx: &Self::Context) -> StepResult {
        ctx.ensure_not_interrupted(self.name())?;
        let tag = ctx.git().create_tag(&self.tag, &self.message)?;
        info!(tag = %tag.name, "created tag");

        Ok(Some(ReleaseCompensation::DeleteTag { tag: tag.name }))
    }
}

pub struct PushStep<G, M, P> {
    remote: String,
    branch: String,
    tag: String,
    commit_message: String,
    _marker: PhantomData<(G, M, P)>,
}

impl<G, M, P> PushStep<G, M, P> {
    #[must_use]
    pub fn new(remote: String, branch: String, tag: String, commit_message: String) -> Self {
        Self {
            remote,
            branch,
            tag,
            commit_message,
            _marker: PhantomData,
        }
    }
}

impl<G, M, P> SagaStep for PushStep<G, M, P>
where
    G: GitProvider,
    M: ManifestIO,
    P: RegistryPublisher,
{
    type Context = ReleaseSagaContext<G, M, P>;
    type Error = OperationError;
    type Compensation = ReleaseCompensation;

    fn name(&self) -> &'static str {
        "push"
    }

    fn execute(&self, ctx: &Self::Context) -> StepResult {
        ctx.ensure_not_interrupted(self.name())?;
        info!(remote = %self.remote, branch = %self.branch, "pushing release commit");
        ctx.git().push_branch(&self.remote, &self.branch)?;

        info!(remote = %self.remote, tag = %self.tag, "pushing tag");
        let subject = self.commit_message.lines().next().unwrap_or_default();
        if let Err(err) = ctx.git().push_tag(&self.remote, &self.tag) {
            warn!(
                tag = %self.tag,
                "tag was not pushed; {}",
                unreverted_branch_notice(&self.remote, &self.branch, subject)
            );
            return Err(err);
        }

        Ok(Some(ReleaseCompensation::DeleteRemoteTag {
            remote: self.remote.clone(),
            branch: self.branch.clone(),
            tag: self.tag.clone(),
            subject: subject.to_string(),
        }))
    }
}

pub struct PublishStep<G, M, P> {
    package: String,
    version: Version,
    _marker: PhantomData<(G, M, P)>,
}

impl<G, M, P> PublishStep<G, M, P> {
    #[must_use]
    pub fn new(package: String, version: Version) -> Self {
        Self {
            package,
            version,
            _marker: PhantomData,
        }
    }
}

impl<G, M, P> SagaStep for PublishStep<G, M, P>
where
    G: GitProvider,
    M: ManifestIO,
    P: RegistryPublisher,
{
    type Context = ReleaseSagaContext<G, M, P>;
    type Error = OperationError;
    type Compensation = ReleaseCompensation;

    fn name(&self) -> &'static str {
        "publish"
    }

    fn execute(&self, ctx: &Self::Context) -> StepResult {
        ctx.ensure_not_interrupted(self.name())?;
        info!(package = %self.package, version = %self.version, "publishing");
        ctx.publisher().publish()?;

        Ok(Some(ReleaseCompensation::ManualCheck {
            package: self.package.clone(),
            version: self.version.to_string(),
        }))
    }
}
