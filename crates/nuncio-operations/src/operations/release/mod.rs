mod compensation;
mod config;
mod context;
mod operation;
mod plan;
pub mod steps;

pub use compensation::ReleaseCompensation;
pub use config::{DEFAULT_BRANCH, DEFAULT_PREFIX, DEFAULT_REMOTE, ReleaseConfig, ReleaseInput};
pub use context::ReleaseSagaContext;
pub use operation::{
    PreparedRelease, ReleaseOperation, ReleaseOutcome, ReleaseOutput, prepare_release,
};
pub use plan::{PlannedStep, ReleasePlan};
