//! Version bump pipeline.
//!
//! Reads the counter, computes the next version, renders the manifest, and
//! publishes both files under the single-writer lock.

mod publish;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::Config;
use crate::counter::VersionCounter;
use crate::error::BumpError;
use crate::fsutil::atomic::parent_dir;
use crate::fsutil::{LockGuard, lock_path_for};
use crate::manifest::ReleaseManifest;

use self::publish::{ManifestBackup, commit_in_order};

/// Everything a bump would write, computed without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpPlan {
    pub current: u64,
    pub next: u64,
    pub manifest: ReleaseManifest,
}

/// Result of a completed bump.
#[derive(Debug, Clone)]
pub struct BumpOutcome {
    pub previous: u64,
    pub current: u64,
    pub manifest: ReleaseManifest,
    pub manifest_path: PathBuf,
    pub version_path: PathBuf,
}

/// Next version after `current`.
///
/// An explicit `requested` version must be strictly greater than `current`.
pub fn next_version(current: u64, requested: Option<u64>) -> Result<u64, BumpError> {
    match requested {
        Some(requested) if requested <= current => {
            Err(BumpError::NotIncreasing { current, requested })
        }
        Some(requested) => Ok(requested),
        None => current
            .checked_add(1)
            .ok_or(BumpError::VersionOverflow(current)),
    }
}

/// Compute the bump without taking the lock or writing anything.
pub fn plan(config: &Config) -> Result<BumpPlan, BumpError> {
    let counter = VersionCounter::new(&config.version_file);
    let current = counter.read()?;
    let next = next_version(current, config.set_version)?;
    let manifest = ReleaseManifest::new(next, &config.url_template);

    debug!("Planned bump {} -> {} ({})", current, next, manifest.url);

    Ok(BumpPlan {
        current,
        next,
        manifest,
    })
}

/// Increment the counter and publish the manifest.
///
/// Validation happens before any write: a missing manifest directory,
/// unreadable or malformed counter, or an overflowing version leaves both
/// files untouched.
pub fn bump(config: &Config) -> Result<BumpOutcome, BumpError> {
    let manifest_dir = parent_dir(&config.manifest_path);
    if !manifest_dir.is_dir() {
        return Err(BumpError::MissingParent(manifest_dir.to_path_buf()));
    }

    let _lock = LockGuard::acquire(lock_path_for(&config.version_file))?;

    let plan = plan(config)?;
    let counter = VersionCounter::new(&config.version_file);

    let backup = ManifestBackup::take(&config.manifest_path)?;
    let staged_manifest = plan.manifest.stage(&config.manifest_path)?;
    let staged_version = counter.stage(plan.next)?;

    commit_in_order(staged_manifest, &backup, staged_version)?;

    info!(
        "Bumped {} from {} to {}",
        config.version_file.display(),
        plan.current,
        plan.next
    );

    Ok(BumpOutcome {
        previous: plan.current,
        current: plan.next,
        manifest: plan.manifest,
        manifest_path: config.manifest_path.clone(),
        version_path: config.version_file.clone(),
    })
}
