use serde::{Deserialize, Serialize};

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// On-disk configuration (`~/.collector-check/config.toml`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Proxy for outbound probes; falls back to HTTPS_PROXY/HTTP_PROXY when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    /// License key used to infer the reporting region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_key: Option<String>,
    /// Explicit region codes, overriding license key detection
    pub regions: Vec<String>,
    /// Task identifiers that always run, bypassing their gates
    pub forced_tasks: Vec<String>,
    pub output: OutputFormat,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error("Config read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}
