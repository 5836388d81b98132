use std::sync::Arc;

use nuncio_command::InterruptFlag;
use nuncio_manifest::PackageManifest;
use nuncio_saga::SagaBuilder;
use semver::Version;
use tracing::{debug, info};

use super::config::{ReleaseConfig, ReleaseInput};
use super::context::ReleaseSagaContext;
use super::plan::{PlannedStep, ReleasePlan};
use super::steps::{CheckoutStep, CommitStep, PublishStep, PushStep, TagStep, WriteVersionStep};
use crate::traits::{GitProvider, ManifestIO, RegistryPublisher};
use crate::{OperationError, Result};

/// Resolved configuration and plan, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRelease {
    pub config: ReleaseConfig,
    pub plan: ReleasePlan,
}

/// Reads the manifest, resolves configuration and computes the plan.
///
/// Touches nothing but the manifest file, which is only read.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read, its settings section or
/// version is invalid, or the configuration cannot be resolved.
pub fn prepare_release<M: ManifestIO>(manifest_io: &M, input: &ReleaseInput) -> Result<PreparedRelease> {
    let manifest = manifest_io.read(&PackageManifest::path_in(&input.project_root))?;
    let config = ReleaseConfig::resolve(input, &manifest.settings)?;
    let plan = ReleasePlan::new(&manifest, &config)?;
    debug!(
        package = %plan.package,
        from = %plan.current_version,
        to = %plan.next_version,
        tag = %plan.tag,
        "planned release"
    );
    Ok(PreparedRelease { config, plan })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutput {
    pub package: String,
    pub previous_version: Version,
    pub version: Version,
    pub tag: String,
    pub published: bool,
    /// Per-step outcome, one line per step.
    pub audit: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    DryRun(Vec<PlannedStep>),
    Released(ReleaseOutput),
}

pub struct ReleaseOperation<G, M, P> {
    git: Arc<G>,
    manifest_io: Arc<M>,
    publisher: Arc<P>,
    interrupt: InterruptFlag,
}

impl<G, M, P> ReleaseOperation<G, M, P>
where
    G: GitProvider + 'static,
    M: ManifestIO + 'static,
    P: RegistryPublisher + 'static,
{
    pub fn new(git: G, manifest_io: M, publisher: P) -> Self {
        Self {
            git: Arc::new(git),
            manifest_io: Arc::new(manifest_io),
            publisher: Arc::new(publisher),
            interrupt: InterruptFlag::new(),
        }
    }

    /// Shares the flag the interrupt handler trips.
    #[must_use]
    pub fn with_interrupt(mut self, interrupt: InterruptFlag) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Runs the release, or only describes it for a dry run.
    ///
    /// # Errors
    ///
    /// Returns a pre-flight error if another branch is checked out, the
    /// working tree is dirty or the tag already exists; nothing has been
    /// changed in that case. Returns
    /// [`OperationError::RolledBack`] or [`OperationError::RollbackIncomplete`]
    /// if a step failed after the release started.
    pub fn execute(&self, prepared: &PreparedRelease) -> Result<ReleaseOutcome> {
        let PreparedRelease { config, plan } = prepared;

        if config.dry_run {
            return Ok(ReleaseOutcome::DryRun(plan.describe(config)));
        }

        self.preflight(config, plan)?;
        self.run_saga(config, plan)
    }

    /// The plan was computed from the manifest on disk, so it only holds for
    /// the release branch.
    fn preflight(&self, config: &ReleaseConfig, plan: &ReleasePlan) -> Result<()> {
        let current = self.git.current_branch()?;
        if current != config.branch {
            return Err(OperationError::WrongBranch {
                expected: config.branch.clone(),
                actual: current,
            });
        }

        if config.allow_dirty {
            debug!("skipping clean working tree check");
        } else if !self.git.is_working_tree_clean()? {
            return Err(OperationError::DirtyWorkingTree);
        }

        if self.git.tag_exists(&plan.tag)? {
            return Err(OperationError::TagExists {
                tag: plan.tag.clone(),
            });
        }
        Ok(())
    }

    fn run_saga(&self, config: &ReleaseConfig, plan: &ReleasePlan) -> Result<ReleaseOutcome> {
        let saga = SagaBuilder::new()
            .first_step(CheckoutStep::<G, M, P>::new(config.branch.clone()))
            .then(WriteVersionStep::<G, M, P>::new(
                plan.manifest_path.clone(),
                plan.current_version.clone(),
                plan.next_version.clone(),
                plan.original_content.clone(),
            ))
            .then(CommitStep::<G, M, P>::new(plan.commit_message.clone()))
            .then(TagStep::<G, M, P>::new(
                plan.tag.clone(),
                plan.tag_message.clone(),
            ))
            .then(PushStep::<G, M, P>::new(
                config.remote.clone(),
                config.branch.clone(),
                plan.tag.clone(),
                plan.commit_message.clone(),
            ))
            .then_if(
                config.publish,
                PublishStep::<G, M, P>::new(plan.package.clone(), plan.next_version.clone()),
            )
            .build();

        let ctx = ReleaseSagaContext::new(
            Arc::clone(&self.git),
            Arc::clone(&self.manifest_io),
            Arc::clone(&self.publisher),
            self.interrupt.clone(),
        );

        info!(
            package = %plan.package,
            version = %plan.next_version,
            steps = saga.len(),
            "starting release"
        );
        let (result, audit) = saga.execute_with_audit(&ctx);
        result.map_err(|err| OperationError::from_saga(err, &audit))?;

        info!(tag = %plan.tag, "release complete");
        Ok(ReleaseOutcome::Released(ReleaseOutput {
            package: plan.package.clone(),
            previous_version: plan.current_version.clone(),
            version: plan.next_version.clone(),
            tag: plan.tag.clone(),
            published: config.publish,
            audit: audit.summary(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::mocks::{MockGitProvider, MockManifestIO, MockPublisher};

    fn prepared(manifest: &MockManifestIO, input: ReleaseInput) -> PreparedRelease {
        prepare_release(manifest, &input).expect("prepare release")
    }

    fn input() -> ReleaseInput {
        ReleaseInput {
            project_root: PathBuf::from("/project"),
            ..ReleaseInput::default()
        }
    }

    fn operation(
        git: MockGitProvider,
        manifest: MockManifestIO,
    ) -> ReleaseOperation<MockGitProvider, MockManifestIO, MockPublisher> {
        ReleaseOperation::new(git, manifest, MockPublisher::new())
    }

    #[test]
    fn prepare_reads_manifest_from_project_root() -> anyhow::Result<()> {
        let manifest = MockManifestIO::new("my-app", "1.2.3");

        let prepared = prepare_release(&manifest, &input())?;

        assert_eq!(prepared.plan.manifest_path, PathBuf::from("/project/package.json"));
        assert_eq!(prepared.plan.tag, "v2.0.0");
        Ok(())
    }

    #[test]
    fn successful_release_runs_every_step_in_order() -> anyhow::Result<()> {
        let manifest = MockManifestIO::new("my-app", "1.2.3");
        let prepared = prepared(&manifest, input());
        let op = operation(MockGitProvider::new(), manifest);

        let outcome = op.execute(&prepared)?;

        let ReleaseOutcome::Released(output) = outcome else {
            panic!("expected a release");
        };
        assert_eq!(output.version, Version::new(2, 0, 0));
        assert_eq!(output.tag, "v2.0.0");
        assert!(!output.published);
        assert_eq!(
            output.audit,
            "✓ checkout\n✓ write_version\n✓ commit\n✓ tag\n✓ push"
        );
        assert_eq!(
            op.git.calls(),
            vec![
                "current_branch",
                "is_working_tree_clean",
                "tag_exists v2.0.0",
                "checkout master",
                "head_sha",
                "stage_all",
                "commit chore: 2.0.0",
                "create_tag v2.0.0",
                "push_branch origin master",
                "push_tag origin v2.0.0",
            ]
        );
        assert_eq!(op.manifest_io.version(), "2.0.0");
        assert_eq!(op.publisher.publish_count(), 0);
        Ok(())
    }

    #[test]
    fn npm_flag_adds_publish_step() -> anyhow::Result<()> {
        let manifest = MockManifestIO::new("my-app", "1.2.3");
        let prepared = prepared(
            &manifest,
            ReleaseInput {
                npm: true,
                ..input()
            },
        );
        let op = operation(MockGitProvider::new(), manifest);

        let ReleaseOutcome::Released(output) = op.execute(&prepared)? else {
            panic!("expected a release");
        };

        assert!(output.published);
        assert_eq!(op.publisher.publish_count(), 1);
        Ok(())
    }

    #[test]
    fn dry_run_touches_nothing() -> anyhow::Result<()> {
        let manifest = MockManifestIO::new("my-app", "1.2.3");
        let prepared = prepared(
            &manifest,
            ReleaseInput {
                dry_run: true,
                ..input()
            },
        );
        let op = operation(MockGitProvider::new(), manifest);

        let outcome = op.execute(&prepared)?;

        assert!(matches!(outcome, ReleaseOutcome::DryRun(ref steps) if steps.len() == 5));
        assert!(op.git.calls().is_empty());
        assert_eq!(op.manifest_io.version(), "1.2.3");
        Ok(())
    }

    #[test]
    fn dirty_tree_fails_preflight() {
        let manifest = MockManifestIO::new("my-app", "1.2.3");
        let prepared = prepared(&manifest, input());
        let op = operation(MockGitProvider::new().dirty(), manifest);

        let err = op.execute(&prepared).expect_err("dirty tree");

        assert!(matches!(err, OperationError::DirtyWorkingTree));
        assert!(!err.is_rollback());
        assert_eq!(op.git.calls(), vec!["current_branch", "is_working_tree_clean"]);
    }

    #[test]
    fn other_branch_checked_out_fails_preflight() {
        let manifest = MockManifestIO::new("my-app", "1.2.3");
        let prepared = prepared(&manifest, input());
        let op = operation(MockGitProvider::new().on_branch("develop"), manifest);

        let err = op.execute(&prepared).expect_err("wrong branch");

        assert!(matches!(
            err,
            OperationError::WrongBranch { ref expected, ref actual }
                if expected == "master" && actual == "develop"
        ));
        assert!(!err.is_rollback());
        assert_eq!(op.git.calls(), vec!["current_branch"]);
        assert_eq!(op.manifest_io.version(), "1.2.3");
    }

    #[test]
    fn allow_dirty_skips_clean_check() -> anyhow::Result<()> {
        let manifest = MockManifestIO::new("my-app", "1.2.3");
        let prepared = prepared(
            &manifest,
            ReleaseInput {
                allow_dirty: true,
                ..input()
            },
        );
        let op = operation(MockGitProvider::new().dirty(), manifest);

        op.execute(&prepared)?;

        assert!(!op.git.calls().contains(&"is_working_tree_clean".to_string()));
        Ok(())
    }

    #[test]
    fn existing_tag_fails_preflight() {
        let manifest = MockManifestIO::new("my-app", "1.2.3");
        let prepared = prepared(&manifest, input());
        let op = operation(MockGitProvider::new().with_tag("v2.0.0"), manifest);

        let err = op.execute(&prepared).expect_err("tag exists");

        assert!(matches!(err, OperationError::TagExists { ref tag } if tag == "v2.0.0"));
        assert_eq!(op.manifest_io.version(), "1.2.3");
    }

    #[test]
    fn tag_failure_rolls_back_commit_then_manifest() {
        let manifest = MockManifestIO::new("my-app", "1.2.3");
        let original = manifest.content();
        let prepared = prepared(&manifest, input());
        let op = operation(MockGitProvider::new().failing("create_tag"), manifest);

        let err = op.execute(&prepared).expect_err("tag fails");

        assert!(err.is_rollback());
        assert!(matches!(
            err,
            OperationError::RolledBack { ref step, compensated: 2, .. } if step == "tag"
        ));
        let calls = op.git.calls();
        assert_eq!(
            calls.last().map(String::as_str),
            Some(format!("reset_hard {}", MockGitProvider::HEAD).as_str())
        );
        assert_eq!(op.manifest_io.calls().last().map(String::as_str), Some("restore"));
        assert_eq!(op.manifest_io.content(), original);
        assert_eq!(
            err.audit_summary(),
            Some("✓ checkout\n↩ write_version\n↩ commit\n✗ tag")
        );
    }

    #[test]
    fn failing_compensation_reports_manual_actions() {
        let manifest = MockManifestIO::new("my-app", "1.2.3");
        let prepared = prepared(&manifest, input());
        let git = MockGitProvider::new()
            .failing("push_branch")
            .failing("delete_tag");
        let op = operation(git, manifest);

        let err = op.execute(&prepared).expect_err("push fails");

        let OperationError::RollbackIncomplete {
            step,
            failure,
            not_attempted,
            ..
        } = &err
        else {
            panic!("expected RollbackIncomplete, got {err:?}");
        };
        assert_eq!(step, "push");
        assert_eq!(failure.position, 1);
        assert_eq!(failure.total, 3);
        assert_eq!(failure.description, "delete local tag v2.0.0");
        assert_eq!(not_attempted.len(), 2);
        assert!(not_attempted[0].starts_with("reset to commit"));
        assert!(not_attempted[1].starts_with("restore"));
        assert_eq!(op.manifest_io.version(), "2.0.0");
    }

    #[test]
    fn publish_failure_rolls_back_everything_before_it() {
        let manifest = MockManifestIO::new("my-app", "1.2.3");
        let prepared = prepared(
            &manifest,
            ReleaseInput {
                npm: true,
                ..input()
            },
        );
        let op = ReleaseOperation::new(MockGitProvider::new(), manifest, MockPublisher::failing());

        let err = op.execute(&prepared).expect_err("publish fails");

        assert!(matches!(
            err,
            OperationError::RolledBack { ref step, compensated: 4, .. } if step == "publish"
        ));
        let calls = op.git.calls();
        assert_eq!(
            calls[calls.len() - 3..],
            [
                "delete_remote_tag origin v2.0.0".to_string(),
                "delete_tag v2.0.0".to_string(),
                format!("reset_hard {}", MockGitProvider::HEAD),
            ]
        );
        assert_eq!(op.manifest_io.version(), "1.2.3");
    }

    #[test]
    fn interrupt_before_start_rolls_back_nothing() {
        let manifest = MockManifestIO::new("my-app", "1.2.3");
        let prepared = prepared(&manifest, input());
        let interrupt = InterruptFlag::new();
        let op = operation(MockGitProvider::new(), manifest).with_interrupt(interrupt.clone());
        interrupt.trip();

        let err = op.execute(&prepared).expect_err("interrupted");

        assert!(matches!(
            err,
            OperationError::RolledBack { ref step, compensated: 0, .. } if step == "checkout"
        ));
        assert_eq!(
            op.git.calls(),
            vec!["current_branch", "is_working_tree_clean", "tag_exists v2.0.0"]
        );
    }

    #[test]
    fn commit_failure_unstages_before_rolling_back() {
        let manifest = MockManifestIO::new("my-app", "1.2.3");
        let original = manifest.content();
        let prepared = prepared(&manifest, input());
        let op = operation(MockGitProvider::new().failing("commit"), manifest);

        let err = op.execute(&prepared).expect_err("commit fails");

        assert!(matches!(
            err,
            OperationError::RolledBack { ref step, compensated: 1, .. } if step == "commit"
        ));
        let calls = op.git.calls();
        assert_eq!(
            calls[calls.len() - 2..],
            [
                "commit chore: 2.0.0".to_string(),
                format!("reset_index {}", MockGitProvider::HEAD),
            ]
        );
        assert!(!calls.iter().any(|call| call.starts_with("reset_hard")));
        assert_eq!(op.manifest_io.content(), original);
    }
}
