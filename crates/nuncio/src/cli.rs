use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use nuncio_core::BumpKind;
use nuncio_operations::operations::ReleaseInput;

/// Command-line flags. Every flag is optional; unset values come from the
/// `"nuncio"` section of `package.json`, then from built-in defaults.
#[derive(Debug, Parser)]
#[command(name = "nuncio")]
#[command(version = env!("NUNCIO_VERSION"))]
#[command(
    about = "Bump the version in package.json, commit, tag, push and optionally publish, rolling back on failure"
)]
pub(crate) struct Cli {
    /// Branch to release from [default: master]
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Version component to bump [default: major]
    #[arg(short, long, value_enum)]
    pub semver: Option<BumpKind>,

    /// Remote to push the release to [default: origin]
    #[arg(short, long)]
    pub remote: Option<String>,

    /// Prefix of the release tag [default: v]
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Text added to the release commit and used as the tag message
    #[arg(short, long)]
    pub message: Option<String>,

    /// Publish to npm after pushing
    #[arg(long)]
    pub npm: bool,

    /// Project directory containing package.json (default: current directory)
    #[arg(long = "path", short = 'C')]
    pub path: Option<PathBuf>,

    /// Timeout for each external command, e.g. "90s" or "5m" [default: 5m]
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Print the steps that would run without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Release even if the working tree has uncommitted changes
    #[arg(long)]
    pub allow_dirty: bool,

    /// Log every external command
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub(crate) fn into_input(self, project_root: PathBuf) -> ReleaseInput {
        ReleaseInput {
            project_root,
            branch: self.branch,
            semver: self.semver,
            remote: self.remote,
            prefix: self.prefix,
            message: self.message,
            npm: self.npm,
            timeout: self.timeout,
            dry_run: self.dry_run,
            allow_dirty: self.allow_dirty,
        }
    }
}
