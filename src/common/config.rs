//! Configuration file handling

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// Base URLs of the services the probes talk to
    #[serde(default)]
    pub endpoints: Endpoints,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Result sink settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Base URLs for outbound probes, stored without a trailing slash
#[derive(Debug, Deserialize, Clone)]
pub struct Endpoints {
    /// JSON REST API (posts, users)
    #[serde(default = "default_json_api")]
    pub json_api: String,

    /// Service that can answer with arbitrary content types
    #[serde(default = "default_text_api")]
    pub text_api: String,

    /// Image service used by the binary transfer probe
    #[serde(default = "default_image_api")]
    pub image_api: String,

    /// GraphQL endpoint
    #[serde(default = "default_graphql")]
    pub graphql: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            json_api: default_json_api(),
            text_api: default_text_api(),
            image_api: default_image_api(),
            graphql: default_graphql(),
        }
    }
}

impl Endpoints {
    /// Point every endpoint at one base URL (handy for local stub servers)
    pub fn all_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            json_api: base.to_string(),
            text_api: base.to_string(),
            image_api: base.to_string(),
            graphql: format!("{base}/graphql"),
        }
    }

    fn normalize(&mut self) {
        for url in [
            &mut self.json_api,
            &mut self.text_api,
            &mut self.image_api,
            &mut self.graphql,
        ] {
            while url.ends_with('/') {
                url.pop();
            }
        }
    }
}

fn default_json_api() -> String {
    "https://jsonplaceholder.typicode.com".to_string()
}
fn default_text_api() -> String {
    "https://httpbin.org".to_string()
}
fn default_image_api() -> String {
    "https://picsum.photos".to_string()
}
fn default_graphql() -> String {
    "https://rickandmortyapi.com/graphql".to_string()
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize, Clone)]
pub struct Timeouts {
    /// Timeout for a single outbound request
    #[serde(default = "default_request")]
    pub request_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request_secs: default_request(),
        }
    }
}

impl Timeouts {
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }
}

fn default_request() -> u64 {
    30
}

/// Result sink configuration
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Largest rendered result kept in the sink; longer text is truncated
    #[serde(default = "default_max_result_bytes")]
    pub max_result_bytes: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_result_bytes: default_max_result_bytes(),
        }
    }
}

fn default_max_result_bytes() -> usize {
    64 * 1024
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))?;
        if config.timeouts.request_secs == 0 {
            return Err(super::Error::Config(
                "timeouts.request_secs must be at least 1".to_string(),
            ));
        }
        config.endpoints.normalize();
        Ok(config)
    }
}
