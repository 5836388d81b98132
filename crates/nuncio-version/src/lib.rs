//! Version calculation for a release.
//!
//! Versions are plain `major.minor.patch` triples. Anything else (pre-release
//! suffixes, build metadata, missing or extra components) is rejected before
//! a release touches any external system.

use nuncio_core::BumpKind;
use semver::Version;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("version '{input}' must have exactly three dot-separated components, found {found}")]
    ComponentCount { input: String, found: usize },

    #[error("version '{input}' has an invalid {component} component '{value}'")]
    InvalidComponent {
        input: String,
        component: &'static str,
        value: String,
    },

    #[error("bumping the {component} component of '{version}' overflows")]
    Overflow {
        version: String,
        component: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, VersionError>;

const COMPONENTS: [&str; 3] = ["major", "minor", "patch"];

/// Parses a `major.minor.patch` string into a [`Version`].
///
/// Each component must be a run of ASCII digits. Leading zeros are accepted
/// and normalized away (`"01.2.3"` parses as `1.2.3`).
///
/// # Errors
///
/// Returns [`VersionError::ComponentCount`] if the input does not have exactly
/// three components and [`VersionError::InvalidComponent`] if a component is
/// not a non-negative integer.
pub fn parse_version(input: &str) -> Result<Version> {
    let parts: Vec<&str> = input.split('.').collect();
    if parts.len() != COMPONENTS.len() {
        return Err(VersionError::ComponentCount {
            input: input.to_string(),
            found: parts.len(),
        });
    }

    let mut values = [0_u64; 3];
    for ((slot, part), component) in values.iter_mut().zip(&parts).zip(COMPONENTS) {
        let invalid = || VersionError::InvalidComponent {
            input: input.to_string(),
            component,
            value: (*part).to_string(),
        };
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        *slot = part.parse().map_err(|_| invalid())?;
    }

    Ok(Version::new(values[0], values[1], values[2]))
}

/// Returns the version that follows `version` for the given bump kind.
///
/// # Errors
///
/// Returns [`VersionError::Overflow`] if the bumped component is already at
/// `u64::MAX`.
pub fn bump_version(version: &Version, bump: BumpKind) -> Result<Version> {
    let overflow = |component| VersionError::Overflow {
        version: version.to_string(),
        component,
    };

    let next = match bump {
        BumpKind::Major => Version::new(
            version.major.checked_add(1).ok_or_else(|| overflow("major"))?,
            0,
            0,
        ),
        BumpKind::Minor => Version::new(
            version.major,
            version.minor.checked_add(1).ok_or_else(|| overflow("minor"))?,
            0,
        ),
        BumpKind::Patch => Version::new(
            version.major,
            version.minor,
            version.patch.checked_add(1).ok_or_else(|| overflow("patch"))?,
        ),
    };

    Ok(next)
}
