//! Package manifest abstraction
//!
//! The publisher reads and rewrites the package version through
//! [ManifestPort]; [JsonManifest] backs it with a package.json file and
//! [MemoryManifest] backs it with a string for tests.

use crate::error::{ReleaseKitError, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Narrow interface over the package manifest
pub trait ManifestPort: Send + Sync {
    /// Current version as stored in the manifest (no leading 'v')
    fn read_version(&self) -> Result<String>;

    /// Rewrite the stored version; a leading 'v' is stripped before writing
    fn write_version(&self, version: &str) -> Result<()>;
}

/// package.json-backed manifest
///
/// Rewrites only the `version` field and leaves the rest of the document
/// intact, re-serialized with two-space indentation and a trailing newline.
pub struct JsonManifest {
    path: PathBuf,
}

impl JsonManifest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonManifest { path: path.into() }
    }

    fn read_document(&self) -> Result<serde_json::Value> {
        let raw = fs::read_to_string(&self.path)?;
        serde_json::from_str(&raw).map_err(|e| {
            ReleaseKitError::manifest(format!("Cannot parse {}: {}", self.path.display(), e))
        })
    }
}

impl ManifestPort for JsonManifest {
    fn read_version(&self) -> Result<String> {
        let document = self.read_document()?;
        document
            .get("version")
            .and_then(|v| v.as_str())
            .map(|v| v.to_string())
            .ok_or_else(|| {
                ReleaseKitError::manifest(format!(
                    "No version field in {}",
                    self.path.display()
                ))
            })
    }

    fn write_version(&self, version: &str) -> Result<()> {
        let mut document = self.read_document()?;
        let object = document.as_object_mut().ok_or_else(|| {
            ReleaseKitError::manifest(format!("{} is not a JSON object", self.path.display()))
        })?;

        let bare = version.trim_start_matches('v');
        object.insert(
            "version".to_string(),
            serde_json::Value::String(bare.to_string()),
        );

        let mut rendered = serde_json::to_string_pretty(&document)
            .map_err(|e| ReleaseKitError::manifest(format!("Cannot serialize manifest: {}", e)))?;
        rendered.push('\n');

        fs::write(&self.path, rendered)?;
        Ok(())
    }
}

/// In-memory manifest for tests
pub struct MemoryManifest {
    version: Mutex<String>,
}

impl MemoryManifest {
    pub fn new(version: impl Into<String>) -> Self {
        MemoryManifest {
            version: Mutex::new(version.into()),
        }
    }

    /// Current stored version, for assertions
    pub fn current(&self) -> String {
        self.version.lock().unwrap().clone()
    }
}

impl ManifestPort for MemoryManifest {
    fn read_version(&self) -> Result<String> {
        Ok(self.version.lock().unwrap().clone())
    }

    fn write_version(&self, version: &str) -> Result<()> {
        let bare = version.trim_start_matches('v');
        *self.version.lock().unwrap() = bare.to_string();
        Ok(())
    }
}
