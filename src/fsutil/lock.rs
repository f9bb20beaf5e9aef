//! Single-writer lock file guarding the version counter.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::BumpError;

/// Lock file path for a version file: `VERSION` -> `VERSION.lock`.
pub fn lock_path_for(version_file: &Path) -> PathBuf {
    let mut name = OsString::from(version_file.as_os_str());
    name.push(".lock");
    PathBuf::from(name)
}

/// Exclusive lock held for the lifetime of the guard.
///
/// The lock is a file created with `create_new`, so a second process fails
/// instead of waiting. The file is removed on drop.
#[derive(Debug)]
pub struct LockGuard {
    path: PathBuf,
}

impl LockGuard {
    pub fn acquire(path: PathBuf) -> Result<Self, BumpError> {
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                // pid is informational only
                if let Err(e) = writeln!(file, "{}", std::process::id()) {
                    debug!("Failed to record pid in lock file {}: {}", path.display(), e);
                }
                debug!("Acquired lock {}", path.display());
                Ok(Self { path })
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(BumpError::Locked(path)),
            Err(source) => Err(BumpError::Lock { path, source }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!("Failed to remove lock file {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_path_appends_suffix() {
        assert_eq!(
            lock_path_for(Path::new("build/VERSION")),
            PathBuf::from("build/VERSION.lock")
        );
    }

    #[test]
    fn test_second_acquire_fails_while_held() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("VERSION.lock");

        let guard = LockGuard::acquire(path.clone()).unwrap();
        assert!(guard.path().exists());

        let second = LockGuard::acquire(path.clone());
        assert!(matches!(second, Err(BumpError::Locked(p)) if p == path));
    }

    #[test]
    fn test_lock_file_records_pid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("VERSION.lock");

        let _guard = LockGuard::acquire(path.clone()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), std::process::id().to_string());
    }

    #[test]
    fn test_drop_releases_lock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("VERSION.lock");

        drop(LockGuard::acquire(path.clone()).unwrap());
        assert!(!path.exists());

        let again = LockGuard::acquire(path);
        assert!(again.is_ok());
    }

    #[test]
    fn test_acquire_in_missing_directory_is_lock_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("VERSION.lock");

        let result = LockGuard::acquire(path);
        assert!(matches!(result, Err(BumpError::Lock { .. })));
    }
}
