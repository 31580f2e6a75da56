use crate::constants::{DEFAULT_DOCS_PATH, DEFAULT_VERSION_HEADER};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Core application settings (`appOptions` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppOptions {
    pub port: u16,
    pub api_prefix: Option<String>,
    pub service_name: String,
    pub version: Option<String>,
}

/// Cross-origin policy (`corsOptions` section).
///
/// An empty origin list disables the CORS layer entirely.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CorsOptions {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub use_credentials: bool,
}

/// Logging sink configuration (`loggerOptions` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerOptions {
    pub level: String,
    pub console: bool,
    pub json: bool,
    pub path: Option<PathBuf>,
    pub env_filter: Option<String>,
    pub max_files: usize,
}

/// How the API version is carried on requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionType {
    Header,
    #[default]
    Uri,
}

/// API versioning scheme (`versioningOptions` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VersioningOptions {
    #[serde(rename = "type")]
    pub kind: VersionType,
    pub header_name: Option<String>,
    pub prefix: String,
    pub default_version: String,
}

impl VersioningOptions {
    /// URI segment for the default version (`v1`), `None` for header versioning.
    #[must_use]
    pub fn uri_segment(&self) -> Option<String> {
        match self.kind {
            VersionType::Uri => Some(format!("{}{}", self.prefix, self.default_version)),
            VersionType::Header => None,
        }
    }

    /// Request header carrying the version in header mode.
    #[must_use]
    pub fn version_header(&self) -> &str {
        self.header_name.as_deref().map_or(DEFAULT_VERSION_HEADER, str::trim)
    }

    /// `true` for the default version, with or without the prefix (`1`, `v1`).
    #[must_use]
    pub fn accepts_version(&self, requested: &str) -> bool {
        let requested = requested.trim();
        requested == self.default_version
            || requested
                .strip_prefix(self.prefix.as_str())
                .is_some_and(|version| version == self.default_version)
    }
}

/// API reference settings (`swaggerOptions` section).
///
/// One document is published per entry in `versions`, under `/<version>/<path>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SwaggerOptions {
    pub title: String,
    pub description: String,
    pub versions: Vec<String>,
    pub path: Option<String>,
    pub author_name: Option<String>,
    pub author_url: Option<String>,
    pub author_email: Option<String>,
    pub license_name: Option<String>,
    pub license_url: Option<String>,
}

impl SwaggerOptions {
    /// Route segment of the reference, without slashes (`swagger`).
    #[must_use]
    pub fn docs_path(&self) -> &str {
        self.path
            .as_deref()
            .map(|path| path.trim_matches('/'))
            .filter(|path| !path.is_empty())
            .unwrap_or(DEFAULT_DOCS_PATH)
    }

    /// First listed version; `/<path>` redirects to its document.
    #[must_use]
    pub fn default_version(&self) -> &str {
        self.versions.first().map_or("v1", String::as_str)
    }
}

// --- Default ---

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            port: 3000,
            api_prefix: Some("api".to_owned()),
            service_name: "catalog-service".to_owned(),
            version: None,
        }
    }
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            console: true,
            json: false,
            path: None,
            env_filter: None,
            max_files: 10,
        }
    }
}

impl Default for SwaggerOptions {
    fn default() -> Self {
        Self {
            title: "Catalog API".to_owned(),
            description: String::new(),
            versions: vec!["v1".to_owned()],
            path: None,
            author_name: None,
            author_url: None,
            author_email: None,
            license_name: None,
            license_url: None,
        }
    }
}

impl Default for VersioningOptions {
    fn default() -> Self {
        Self {
            kind: VersionType::Uri,
            header_name: None,
            prefix: "v".to_owned(),
            default_version: "1".to_owned(),
        }
    }
}
