use std::path::Path;

use serde_json::Value;

use crate::error::ManifestError;
use crate::reader::{read_document, string_field};

/// Rewrites the `version` field, leaving every other field and the key order
/// untouched. Output uses two-space indentation; a trailing newline is kept if
/// the original file had one.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read, parsed, or written.
pub fn write_version(path: &Path, version: &str) -> Result<(), ManifestError> {
    let (mut doc, original) = read_document(path)?;

    if !doc.contains_key("version") {
        return Err(ManifestError::MissingField {
            path: path.to_path_buf(),
            field: "version".to_string(),
        });
    }
    doc.insert("version".to_string(), Value::String(version.to_string()));

    let mut content =
        serde_json::to_string_pretty(&doc).map_err(|source| ManifestError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
    if original.ends_with('\n') {
        content.push('\n');
    }

    write_file(path, &content)
}

/// Writes `content` back verbatim, used to undo [`write_version`].
///
/// # Errors
///
/// Returns `ManifestError::Write` if the file cannot be written.
pub fn restore_content(path: &Path, content: &str) -> Result<(), ManifestError> {
    write_file(path, content)
}

/// # Errors
///
/// Returns an error if the manifest cannot be read or the version does not
/// match `expected`.
pub fn verify_version(path: &Path, expected: &str) -> Result<(), ManifestError> {
    let (doc, _) = read_document(path)?;
    let actual = string_field(&doc, path, "version")?;

    if actual != expected {
        return Err(ManifestError::VerificationFailed {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            actual,
        });
    }

    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<(), ManifestError> {
    std::fs::write(path, content).map_err(|source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_manifest;

    const MANIFEST: &str = r#"{
  "name": "my-app",
  "version": "1.0.0",
  "description": "demo",
  "scripts": {
    "test": "jest"
  },
  "files": [],
  "author": "Ünïcode Name"
}
"#;

    fn write_manifest(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("package.json");
        std::fs::write(&path, content).expect("write test file");
        (dir, path)
    }

    #[test]
    fn write_version_updates_only_the_version() {
        let (_dir, path) = write_manifest(MANIFEST);

        write_version(&path, "2.0.0").expect("write version");

        let content = std::fs::read_to_string(&path).expect("read file");
        assert_eq!(content, MANIFEST.replace("\"1.0.0\"", "\"2.0.0\""));
    }

    #[test]
    fn write_version_preserves_key_order() {
        let (_dir, path) =
            write_manifest(r#"{"zeta": 1, "version": "1.0.0", "alpha": 2, "name": "x"}"#);

        write_version(&path, "1.0.1").expect("write version");

        let content = std::fs::read_to_string(&path).expect("read file");
        let zeta = content.find("zeta").expect("zeta present");
        let version = content.find("version").expect("version present");
        let alpha = content.find("alpha").expect("alpha present");
        let name = content.find("name").expect("name present");
        assert!(zeta < version && version < alpha && alpha < name);
    }

    #[test]
    fn write_version_without_trailing_newline_keeps_none() {
        let (_dir, path) = write_manifest(r#"{"name": "x", "version": "1.0.0"}"#);

        write_version(&path, "1.1.0").expect("write version");

        let content = std::fs::read_to_string(&path).expect("read file");
        assert!(!content.ends_with('\n'));
        assert_eq!(content, "{\n  \"name\": \"x\",\n  \"version\": \"1.1.0\"\n}");
    }

    #[test]
    fn write_version_requires_existing_field() {
        let (_dir, path) = write_manifest(r#"{"name": "x"}"#);

        let result = write_version(&path, "1.0.0");

        assert!(matches!(result, Err(ManifestError::MissingField { .. })));
    }

    #[test]
    fn restore_content_is_byte_exact() {
        let original = "{ \"name\":\"x\",   \"version\":\"1.0.0\" }";
        let (_dir, path) = write_manifest(original);

        write_version(&path, "9.9.9").expect("write version");
        restore_content(&path, original).expect("restore");

        assert_eq!(std::fs::read_to_string(&path).expect("read file"), original);
        assert_eq!(read_manifest(&path).expect("read").version, "1.0.0");
    }

    #[test]
    fn verify_version_succeeds_when_matching() {
        let (_dir, path) = write_manifest(MANIFEST);

        verify_version(&path, "1.0.0").expect("verify version");
    }

    #[test]
    fn verify_version_fails_when_mismatched() {
        let (_dir, path) = write_manifest(MANIFEST);

        let result = verify_version(&path, "2.0.0");

        assert!(matches!(
            result,
            Err(ManifestError::VerificationFailed { ref actual, .. }) if actual == "1.0.0"
        ));
    }
}
