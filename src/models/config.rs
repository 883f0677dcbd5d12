use serde::Deserialize;
use std::path::Path;

/// Application configuration loaded from an optional YAML file
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Where the resize proxy fetches original images from
    #[serde(default)]
    pub origin: OriginConfig,
}

/// Origin used to reconstruct the fetch URL for the resize proxy
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct OriginConfig {
    /// URL scheme of the origin
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Fixed origin host. When unset, the inbound request's `host` header is used.
    #[serde(default)]
    pub host: Option<String>,
}

fn default_scheme() -> String {
    "https".to_string()
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: None,
        }
    }
}

impl OriginConfig {
    /// Host to fetch from: the configured one, else the request's own host.
    pub fn resolve_host<'a>(&'a self, request_host: &'a str) -> Option<&'a str> {
        self.host
            .as_deref()
            .filter(|h| !h.is_empty())
            .or(Some(request_host).filter(|h| !h.is_empty()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
}

impl AppConfig {
    /// Parse configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load configuration, falling back to defaults when the file is
    /// missing or invalid
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    origin_scheme = %config.origin.scheme,
                    origin_host = ?config.origin.host,
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Apply `ORIGIN_SCHEME` / `ORIGIN_HOST` style overrides
    pub fn with_overrides(mut self, scheme: Option<String>, host: Option<String>) -> Self {
        if let Some(scheme) = scheme.filter(|s| !s.is_empty()) {
            self.origin.scheme = scheme;
        }
        if let Some(host) = host.filter(|h| !h.is_empty()) {
            self.origin.host = Some(host);
        }
        self
    }

    /// Load from `CONFIG_FILE` and apply `ORIGIN_SCHEME` / `ORIGIN_HOST`
    pub fn from_env() -> Self {
        let config_file = std::env::var("CONFIG_FILE").ok();
        Self::load(config_file.as_deref().map(Path::new)).with_overrides(
            std::env::var("ORIGIN_SCHEME").ok(),
            std::env::var("ORIGIN_HOST").ok(),
        )
    }
}
