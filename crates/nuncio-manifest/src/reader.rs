use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::ManifestError;
use crate::settings::{ReleaseSettings, SETTINGS_KEY};

/// File name of the manifest inside a project directory.
pub const MANIFEST_FILE: &str = "package.json";

/// The parts of `package.json` a release needs, read once up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManifest {
    pub path: PathBuf,
    pub name: String,
    pub version: String,
    pub settings: ReleaseSettings,
    /// File content exactly as read, used to restore the manifest on rollback.
    pub original_content: String,
}

impl PackageManifest {
    /// Path of the manifest inside `project_root`.
    #[must_use]
    pub fn path_in(project_root: &Path) -> PathBuf {
        project_root.join(MANIFEST_FILE)
    }
}

/// # Errors
///
/// Returns `ManifestError::Read` if the file cannot be read,
/// `ManifestError::Parse` if the JSON is malformed, or
/// `ManifestError::NotAnObject` if the top level is not an object.
pub fn read_document(path: &Path) -> Result<(Map<String, Value>, String), ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok((map, content)),
        _ => Err(ManifestError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// # Errors
///
/// Returns an error if the manifest cannot be read, if `name` or `version`
/// is missing or not a string, or if the `"nuncio"` section is malformed.
pub fn read_manifest(path: &Path) -> Result<PackageManifest, ManifestError> {
    let (doc, original_content) = read_document(path)?;

    let name = string_field(&doc, path, "name")?;
    let version = string_field(&doc, path, "version")?;

    let settings = match doc.get(SETTINGS_KEY) {
        Some(section) => ReleaseSettings::deserialize_from(section.clone()).map_err(|source| {
            ManifestError::InvalidSettings {
                path: path.to_path_buf(),
                source,
            }
        })?,
        None => ReleaseSettings::default(),
    };

    Ok(PackageManifest {
        path: path.to_path_buf(),
        name,
        version,
        settings,
        original_content,
    })
}

pub(crate) fn string_field(
    doc: &Map<String, Value>,
    path: &Path,
    field: &str,
) -> Result<String, ManifestError> {
    let value = doc.get(field).ok_or_else(|| ManifestError::MissingField {
        path: path.to_path_buf(),
        field: field.to_string(),
    })?;

    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ManifestError::NotAString {
            path: path.to_path_buf(),
            field: field.to_string(),
        })
}
