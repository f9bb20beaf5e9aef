//! vbump - A CLI tool that bumps a build counter and publishes a release manifest.
//!
//! # Overview
//!
//! vbump reads the build number from a `VERSION` file, increments it, writes a
//! compact JSON manifest (`build/latest.json`) pointing at the new build's
//! download URL, and persists the new number. Both files are staged and renamed
//! into place under a lock file so that concurrent or failed runs cannot leave
//! them disagreeing.

pub mod bump;
pub mod config;
pub mod counter;
pub mod error;
pub mod fsutil;
pub mod manifest;

// Re-export commonly used types
pub use bump::{BumpOutcome, BumpPlan, bump, plan};
pub use config::{Config, ConfigOverrides};
pub use counter::VersionCounter;
pub use error::{BumpError, ConfigError, CounterError, ManifestError};
pub use manifest::{ReleaseManifest, UrlTemplate};
