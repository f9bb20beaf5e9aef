//! Error types for vbump modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading, parsing, or persisting the version counter.
#[derive(Error, Debug)]
pub enum CounterError {
    #[error("Failed to read version file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Version file does not start with an integer: {0:?}")]
    NotANumber(String),

    #[error("Version counter must not be negative: {0:?}")]
    Negative(String),

    #[error("Version counter is too large: {0:?}")]
    Overflow(String),

    #[error("Failed to write version file {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

/// Errors from building or writing the release manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("URL template '{0}' has no {{version}} placeholder")]
    MissingPlaceholder(String),

    #[error("URL template '{template}' does not render to a valid URL: {source}")]
    InvalidUrl {
        template: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write manifest {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest {path} is not valid: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from the bump pipeline.
#[derive(Error, Debug)]
pub enum BumpError {
    #[error(transparent)]
    Counter(#[from] CounterError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(
        "Another bump is in progress (lock file {0} exists). If no other bump is running, remove the lock file and retry."
    )]
    Locked(PathBuf),

    #[error("Failed to create lock file {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Version {0} cannot be incremented without overflowing")]
    VersionOverflow(u64),

    #[error("Requested version {requested} is not greater than current version {current}")]
    NotIncreasing { current: u64, requested: u64 },

    #[error("Output directory {0} does not exist")]
    MissingParent(PathBuf),

    #[error(
        "Failed to restore {path} after a partial bump: {reason}. The manifest and version file may disagree."
    )]
    Rollback { path: PathBuf, reason: String },
}

/// Errors from resolving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid URL template: {0}")]
    InvalidTemplate(#[from] ManifestError),
}
