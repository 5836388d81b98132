use std::fmt;
use std::path::PathBuf;

use nuncio_command::Invocation;
use nuncio_manifest::PackageManifest;
use nuncio_version::{bump_version, parse_version};
use semver::Version;

use super::config::ReleaseConfig;
use crate::Result;

/// Everything a release derives up front from the manifest and config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    pub manifest_path: PathBuf,
    pub package: String,
    pub current_version: Version,
    pub next_version: Version,
    pub tag: String,
    pub commit_message: String,
    pub tag_message: String,
    /// Manifest bytes before the release, restored verbatim on rollback.
    pub original_content: String,
}

impl ReleasePlan {
    /// # Errors
    ///
    /// Returns an error if the manifest version is not `major.minor.patch`
    /// or the bump overflows.
    pub fn new(manifest: &PackageManifest, config: &ReleaseConfig) -> Result<Self> {
        let current_version = parse_version(&manifest.version)?;
        let next_version = bump_version(&current_version, config.bump)?;
        let tag = tag_name(&config.prefix, &next_version);

        Ok(Self {
            manifest_path: manifest.path.clone(),
            package: manifest.name.clone(),
            commit_message: commit_message(&next_version, config.message.as_deref()),
            tag_message: config.message.clone().unwrap_or_else(|| tag.clone()),
            tag,
            current_version,
            next_version,
            original_content: manifest.original_content.clone(),
        })
    }

    /// The steps a release would run, with the commands each one issues.
    #[must_use]
    pub fn describe(&self, config: &ReleaseConfig) -> Vec<PlannedStep> {
        let git = |args: &[&str]| Invocation::new("git").args(args.iter().copied());

        let mut steps = vec![
            PlannedStep::new("checkout", vec![git(&["checkout", &config.branch]).to_string()]),
            PlannedStep::new(
                "write_version",
                vec![format!(
                    "set version {} -> {} in {}",
                    self.current_version,
                    self.next_version,
                    self.manifest_path.display()
                )],
            ),
            PlannedStep::new(
                "commit",
                vec![
                    git(&["add", "."]).to_string(),
                    git(&["commit"])
                        .flag("-m", self.commit_message.as_str())
                        .to_string(),
                ],
            ),
            PlannedStep::new(
                "tag",
                vec![
                    git(&["tag", "-a", &self.tag])
                        .flag("-m", self.tag_message.as_str())
                        .to_string(),
                ],
            ),
            PlannedStep::new(
                "push",
                vec![
                    git(&["push", &config.remote, &config.branch]).to_string(),
                    git(&["push", &config.remote, &nuncio_git::tag_ref(&self.tag)]).to_string(),
                ],
            ),
        ];
        if config.publish {
            steps.push(PlannedStep::new(
                "publish",
                vec![Invocation::new("npm").arg("publish").to_string()],
            ));
        }
        steps
    }
}

/// One step of a dry run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub name: &'static str,
    pub actions: Vec<String>,
}

impl PlannedStep {
    fn new(name: &'static str, actions: Vec<String>) -> Self {
        Self { name, actions }
    }
}

impl fmt::Display for PlannedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for action in &self.actions {
            write!(f, "\n    {action}")?;
        }
        Ok(())
    }
}

/// `prefix` followed by the version, e.g. `v2.0.0`.
#[must_use]
pub fn tag_name(prefix: &str, version: &Version) -> String {
    format!("{prefix}{version}")
}

fn commit_message(version: &Version, message: Option<&str>) -> String {
    match message {
        Some(message) => format!("chore: {version}\n\n{message}"),
        None => format!("chore: {version}"),
    }
}
