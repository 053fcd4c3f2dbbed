use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{RelayError, Result};

/// Main configuration structure for Gemini Relay
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Proxy rerouting settings
    #[serde(default)]
    pub proxy: ProxySettings,
    /// Settings for the underlying HTTP transport
    #[serde(default)]
    pub transport: TransportConfig,
}

/// Proxy rerouting settings as supplied by the user
///
/// These are raw values; validation happens when they are handed to
/// [`crate::interceptor::InterceptorStore::configure`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProxySettings {
    /// Route Gemini API requests through the proxy
    #[serde(default)]
    pub enabled: bool,
    /// Proxy base URL (e.g., "https://my-gateway.example/v1")
    #[serde(default)]
    pub url: Option<String>,
}

/// HTTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Total request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Connection establishment timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| RelayError::Config(format!("Failed to parse config: {e}")))
    }

    /// Load configuration from an explicit path, or from the first default
    /// location that exists
    ///
    /// Default locations, in order:
    /// * `~/.gemini-relay/config.toml`
    /// * `<config_dir>/gemini-relay/config.toml`
    /// * `./config.toml`
    ///
    /// Falls back to [`Config::default`] when no file is found.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_file(path);
        }

        for path in default_config_paths() {
            if path.exists() {
                return Self::load_file(&path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    fn load_file(path: &Path) -> Result<Self> {
        tracing::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            RelayError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }
}

/// Candidate config file locations, most specific first
pub fn default_config_paths() -> Vec<PathBuf> {
    [
        dirs::home_dir().map(|h| h.join(".gemini-relay").join("config.toml")),
        dirs::config_dir().map(|c| c.join("gemini-relay").join("config.toml")),
        Some(PathBuf::from("config.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}
