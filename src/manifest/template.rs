//! Download URL templates.

use std::fmt;
use std::str::FromStr;

use crate::error::ManifestError;

/// Placeholder replaced by the version number when rendering.
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Default artifact location.
pub const DEFAULT_URL_TEMPLATE: &str =
    "https://pool.fra1.digitaloceanspaces.com/versions/{version}.zip";

/// A validated URL template containing at least one `{version}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    /// Validate a template.
    ///
    /// The placeholder must be present and the template, rendered with a
    /// sample version, must be an absolute URL.
    pub fn parse(template: &str) -> Result<Self, ManifestError> {
        if !template.contains(VERSION_PLACEHOLDER) {
            return Err(ManifestError::MissingPlaceholder(template.to_string()));
        }

        let sample = template.replace(VERSION_PLACEHOLDER, "0");
        url::Url::parse(&sample).map_err(|source| ManifestError::InvalidUrl {
            template: template.to_string(),
            source,
        })?;

        Ok(Self(template.to_string()))
    }

    /// Substitute `version` for every placeholder.
    pub fn render(&self, version: u64) -> String {
        self.0.replace(VERSION_PLACEHOLDER, &version.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UrlTemplate {
    fn default() -> Self {
        Self(DEFAULT_URL_TEMPLATE.to_string())
    }
}

impl FromStr for UrlTemplate {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
