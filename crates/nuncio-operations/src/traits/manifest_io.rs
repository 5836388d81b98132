use std::path::Path;

use nuncio_manifest::PackageManifest;
use semver::Version;

use crate::Result;

pub trait ManifestIO: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the manifest is missing, malformed, or lacks a
    /// string `name` or `version`.
    fn read(&self, path: &Path) -> Result<PackageManifest>;

    /// Rewrites `version` and checks the result on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be read or written, or the
    /// written version does not read back.
    fn write_version(&self, path: &Path, version: &Version) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn restore(&self, path: &Path, content: &str) -> Result<()>;
}
