//! Filesystem helpers: atomic staging and the single-writer lock.

pub mod atomic;
pub mod lock;

pub use atomic::{StagedFile, stage_file};
pub use lock::{LockGuard, lock_path_for};
