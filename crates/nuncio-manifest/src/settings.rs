use nuncio_core::BumpKind;
use serde::Deserialize;
use serde_json::Value;

/// Key of the project-level release defaults inside `package.json`.
pub const SETTINGS_KEY: &str = "nuncio";

/// Project defaults for a release, read from the `"nuncio"` object.
///
/// Every field is optional; command-line flags take precedence. Publishing
/// is deliberately absent: it only ever happens with `--npm`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseSettings {
    pub branch: Option<String>,
    pub semver: Option<BumpKind>,
    pub remote: Option<String>,
    pub prefix: Option<String>,
    /// Per-command timeout in humantime syntax, e.g. `"90s"` or `"5m"`.
    pub timeout: Option<String>,
}

impl ReleaseSettings {
    pub(crate) fn deserialize_from(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}
