//! Configuration resolution: CLI flag, then environment, then default.

use std::env;
use std::path::PathBuf;

use tracing::debug;

use crate::error::ConfigError;
use crate::manifest::UrlTemplate;

/// Default version counter path, relative to the working directory.
pub const DEFAULT_VERSION_FILE: &str = "VERSION";

/// Default manifest path, relative to the working directory.
pub const DEFAULT_MANIFEST_PATH: &str = "build/latest.json";

/// Environment variable overriding the version file path.
pub const VERSION_FILE_ENV_VAR: &str = "VBUMP_VERSION_FILE";

/// Environment variable overriding the manifest path.
pub const MANIFEST_ENV_VAR: &str = "VBUMP_MANIFEST";

/// Environment variable overriding the download URL template.
pub const URL_TEMPLATE_ENV_VAR: &str = "VBUMP_URL_TEMPLATE";

/// Values given explicitly, typically from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub version_file: Option<PathBuf>,
    pub manifest_path: Option<PathBuf>,
    pub url_template: Option<String>,
    pub set_version: Option<u64>,
}

/// Resolved settings for a bump.
#[derive(Debug, Clone)]
pub struct Config {
    pub version_file: PathBuf,
    pub manifest_path: PathBuf,
    pub url_template: UrlTemplate,
    /// Explicit next version instead of `current + 1`.
    pub set_version: Option<u64>,
}

impl Config {
    /// Resolve each setting from its override, its environment variable, or
    /// the built-in default. Empty environment values are ignored.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let version_file = overrides
            .version_file
            .or_else(|| env_value(VERSION_FILE_ENV_VAR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_VERSION_FILE));

        let manifest_path = overrides
            .manifest_path
            .or_else(|| env_value(MANIFEST_ENV_VAR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST_PATH));

        let url_template = match overrides
            .url_template
            .or_else(|| env_value(URL_TEMPLATE_ENV_VAR))
        {
            Some(raw) => UrlTemplate::parse(&raw)?,
            None => UrlTemplate::default(),
        };

        debug!(
            "Config: version_file={} manifest={} url_template={}",
            version_file.display(),
            manifest_path.display(),
            url_template
        );

        Ok(Self {
            version_file,
            manifest_path,
            url_template,
            set_version: overrides.set_version,
        })
    }

    /// Config for explicit paths with the default template.
    pub fn with_paths(version_file: impl Into<PathBuf>, manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            version_file: version_file.into(),
            manifest_path: manifest_path.into(),
            url_template: UrlTemplate::default(),
            set_version: None,
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(v) if !v.is_empty() => Some(v),
        _ => None,
    }
}
