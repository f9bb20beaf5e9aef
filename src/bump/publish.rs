//! Two-file publish: manifest first, VERSION second, manifest restored on failure.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{BumpError, CounterError, ManifestError};
use crate::fsutil::{StagedFile, stage_file};

/// Snapshot of the manifest that a publish is about to replace.
#[derive(Debug)]
pub(crate) struct ManifestBackup {
    previous: Option<Vec<u8>>,
}

impl ManifestBackup {
    pub(crate) fn take(path: &Path) -> Result<Self, ManifestError> {
        match fs::read(path) {
            Ok(bytes) => Ok(Self {
                previous: Some(bytes),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self { previous: None }),
            Err(source) => Err(ManifestError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Put the snapshot back, removing the manifest if none existed before.
    fn restore(&self, path: &Path) -> Result<(), BumpError> {
        let result = match &self.previous {
            Some(bytes) => stage_file(path, bytes).and_then(StagedFile::commit),
            None => fs::remove_file(path),
        };

        result.map_err(|e| BumpError::Rollback {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Commit the staged manifest, then the staged VERSION file.
///
/// Both files are fully written before either rename, so the only window for
/// disagreement is the second rename. If it fails the manifest is restored.
pub(crate) fn commit_in_order(
    manifest: StagedFile,
    backup: &ManifestBackup,
    version: StagedFile,
) -> Result<(), BumpError> {
    let manifest_path = manifest.target().to_path_buf();
    let version_path = version.target().to_path_buf();

    manifest.commit().map_err(|e| ManifestError::Write {
        path: manifest_path.clone(),
        reason: e.to_string(),
    })?;
    debug!("Published {}", manifest_path.display());

    if let Err(e) = version.commit() {
        warn!(
            "Failed to update {}, restoring {}",
            version_path.display(),
            manifest_path.display()
        );
        backup.restore(&manifest_path)?;
        return Err(CounterError::Write {
            path: version_path,
            reason: e.to_string(),
        }
        .into());
    }
    debug!("Updated {}", version_path.display());

    Ok(())
}
