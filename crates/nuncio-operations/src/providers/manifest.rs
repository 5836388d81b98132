use std::path::Path;

use nuncio_manifest::PackageManifest;
use semver::Version;

use crate::Result;
use crate::traits::ManifestIO;

pub struct FileSystemManifestIO;

impl FileSystemManifestIO {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemManifestIO {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestIO for FileSystemManifestIO {
    fn read(&self, path: &Path) -> Result<PackageManifest> {
        Ok(nuncio_manifest::read_manifest(path)?)
    }

    fn write_version(&self, path: &Path, version: &Version) -> Result<()> {
        let version = version.to_string();
        nuncio_manifest::write_version(path, &version)?;
        nuncio_manifest::verify_version(path, &version)?;
        Ok(())
    }

    fn restore(&self, path: &Path, content: &str) -> Result<()> {
        Ok(nuncio_manifest::restore_content(path, content)?)
    }
}
