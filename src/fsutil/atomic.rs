//! Atomic file replacement via a sibling temp file and rename.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// File contents written to a temp file beside their target, not yet visible.
///
/// Dropping a `StagedFile` without calling [`StagedFile::commit`] removes the
/// temp file and leaves the target untouched.
#[derive(Debug)]
pub struct StagedFile {
    target: PathBuf,
    temp: NamedTempFile,
}

impl StagedFile {
    /// The path this file will replace on commit.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Rename the temp file over the target.
    pub fn commit(self) -> io::Result<()> {
        self.temp
            .persist(&self.target)
            .map(|_| ())
            .map_err(|e| e.error)
    }
}

/// Write `contents` to a temp file in the target's directory.
///
/// The temp file takes the target's permissions when the target exists, so a
/// rename does not silently tighten them.
pub fn stage_file(target: &Path, contents: &[u8]) -> io::Result<StagedFile> {
    let mut temp = NamedTempFile::new_in(parent_dir(target))?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;

    match fs::metadata(target) {
        Ok(meta) => temp.as_file().set_permissions(meta.permissions())?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => set_default_permissions(&temp)?,
        Err(e) => return Err(e),
    }

    Ok(StagedFile {
        target: target.to_path_buf(),
        temp,
    })
}

/// Directory containing `path`, with bare file names resolving to `.`.
pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(unix)]
fn set_default_permissions(temp: &NamedTempFile) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    temp.as_file()
        .set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_temp: &NamedTempFile) -> io::Result<()> {
    Ok(())
}
