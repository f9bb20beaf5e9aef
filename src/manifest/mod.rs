//! Release manifest: the JSON descriptor published with each build.

pub mod template;

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ManifestError;
use crate::fsutil::{StagedFile, stage_file};

pub use template::{DEFAULT_URL_TEMPLATE, UrlTemplate, VERSION_PLACEHOLDER};

/// The manifest written to `build/latest.json`.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseManifest {
    pub version: u64,
    pub url: String,
}

impl ReleaseManifest {
    pub fn new(version: u64, template: &UrlTemplate) -> Self {
        Self {
            version,
            url: template.render(version),
        }
    }

    /// Compact JSON, e.g. `{"version":42,"url":"https://..."}`.
    pub fn to_json(&self) -> Result<String, ManifestError> {
        serde_json::to_string(self).map_err(ManifestError::Serialize)
    }

    /// Serialize and stage beside `path` without replacing it yet.
    pub fn stage(&self, path: &Path) -> Result<StagedFile, ManifestError> {
        let json = self.to_json()?;
        stage_file(path, json.as_bytes()).map_err(|e| ManifestError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Read a previously published manifest, if any.
pub fn read_manifest(path: &Path) -> Result<Option<ReleaseManifest>, ManifestError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ManifestError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
