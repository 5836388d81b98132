mod release;

pub use release::{
    DEFAULT_BRANCH, DEFAULT_PREFIX, DEFAULT_REMOTE, PlannedStep, PreparedRelease,
    ReleaseCompensation, ReleaseConfig, ReleaseInput, ReleaseOperation, ReleaseOutcome,
    ReleaseOutput, ReleasePlan, ReleaseSagaContext, prepare_release,
};
