mod error;
mod reader;
mod settings;
mod writer;

pub use error::ManifestError;
pub use reader::{MANIFEST_FILE, PackageManifest, read_document, read_manifest};
pub use settings::{ReleaseSettings, SETTINGS_KEY};
pub use writer::{restore_content, verify_version, write_version};
