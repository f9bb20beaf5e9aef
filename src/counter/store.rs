//! Reading and staging the VERSION file.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CounterError;
use crate::fsutil::{StagedFile, stage_file};

use super::parse::parse_counter;

/// The version counter backed by a file on disk.
#[derive(Debug, Clone)]
pub struct VersionCounter {
    path: PathBuf,
}

impl VersionCounter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the current counter value.
    pub fn read(&self) -> Result<u64, CounterError> {
        let bytes = std::fs::read(&self.path).map_err(|source| CounterError::Read {
            path: self.path.clone(),
            source,
        })?;

        // Invalid UTF-8 becomes U+FFFD and fails parsing as content, not as I/O
        let value = parse_counter(&String::from_utf8_lossy(&bytes))?;
        debug!("Read version {} from {}", value, self.path.display());
        Ok(value)
    }

    /// Stage `version` as plain decimal text, no trailing newline.
    pub fn stage(&self, version: u64) -> Result<StagedFile, CounterError> {
        stage_file(&self.path, version.to_string().as_bytes()).map_err(|e| {
            CounterError::Write {
                path: self.path.clone(),
                reason: e.to_string(),
            }
        })
    }
}
