use std::path::PathBuf;
use std::time::Duration;

use nuncio_command::DEFAULT_TIMEOUT;
use nuncio_core::BumpKind;
use nuncio_manifest::ReleaseSettings;

use crate::{OperationError, Result};

pub const DEFAULT_BRANCH: &str = "master";
pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_PREFIX: &str = "v";

/// Release options as given on the command line.
///
/// Unset fields fall back to the manifest's `"nuncio"` section, then to the
/// built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct ReleaseInput {
    pub project_root: PathBuf,
    pub branch: Option<String>,
    pub semver: Option<BumpKind>,
    pub remote: Option<String>,
    pub prefix: Option<String>,
    pub message: Option<String>,
    pub npm: bool,
    pub timeout: Option<Duration>,
    pub dry_run: bool,
    pub allow_dirty: bool,
}

/// Fully resolved release options, fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseConfig {
    pub project_root: PathBuf,
    pub branch: String,
    pub bump: BumpKind,
    pub remote: String,
    pub prefix: String,
    pub message: Option<String>,
    /// Set only by the `--npm` flag, never by project settings.
    pub publish: bool,
    pub timeout: Duration,
    pub dry_run: bool,
    pub allow_dirty: bool,
}

impl ReleaseConfig {
    /// Merges command-line input over project settings over defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings carry an unparseable timeout or the
    /// resolved timeout is zero.
    pub fn resolve(input: &ReleaseInput, settings: &ReleaseSettings) -> Result<Self> {
        let timeout = match (input.timeout, settings.timeout.as_deref()) {
            (Some(timeout), _) => timeout,
            (None, Some(value)) => {
                humantime::parse_duration(value).map_err(|source| {
                    OperationError::InvalidTimeout {
                        value: value.to_string(),
                        source,
                    }
                })?
            }
            (None, None) => DEFAULT_TIMEOUT,
        };
        if timeout.is_zero() {
            return Err(OperationError::ZeroTimeout);
        }

        Ok(Self {
            project_root: input.project_root.clone(),
            branch: pick(input.branch.as_ref(), settings.branch.as_ref(), DEFAULT_BRANCH),
            bump: input.semver.or(settings.semver).unwrap_or_default(),
            remote: pick(input.remote.as_ref(), settings.remote.as_ref(), DEFAULT_REMOTE),
            prefix: pick(input.prefix.as_ref(), settings.prefix.as_ref(), DEFAULT_PREFIX),
            message: input
                .message
                .as_deref()
                .map(str::trim)
                .filter(|message| !message.is_empty())
                .map(str::to_string),
            publish: input.npm,
            timeout,
            dry_run: input.dry_run,
            allow_dirty: input.allow_dirty,
        })
    }
}

fn pick(cli: Option<&String>, settings: Option<&String>, default: &str) -> String {
    cli.or(settings)
        .map_or_else(|| default.to_string(), Clone::clone)
}
