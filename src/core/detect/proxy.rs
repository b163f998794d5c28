// Proxy detection from CLI, config file and environment

use crate::core::tasks::task::Task;
use crate::core::tasks::types::{
    Identifier, Options, Payload, ProxySettings, ProxySource, TaskResult, UpstreamResults,
};
use url::Url;

pub const PROXY_DETECT_ID: &str = "Base/Config/ProxyDetect";

/// Environment variables consulted in priority order
pub const PROXY_ENV_VARS: [&str; 4] = ["HTTPS_PROXY", "https_proxy", "HTTP_PROXY", "http_proxy"];

const SUPPORTED_SCHEMES: [&str; 4] = ["http", "https", "socks4", "socks5"];

/// Resolves the proxy the collector probes should go through
#[derive(Debug, Clone, Default)]
pub struct ProxyDetect {
    cli_proxy: Option<String>,
    config_proxy: Option<String>,
}

impl ProxyDetect {
    pub fn new(cli_proxy: Option<String>, config_proxy: Option<String>) -> Self {
        Self {
            cli_proxy,
            config_proxy,
        }
    }

    /// First non-empty candidate by priority: CLI, config, environment
    fn candidate(&self) -> Option<(String, ProxySource)> {
        let explicit = [
            (self.cli_proxy.clone(), ProxySource::Cli),
            (self.config_proxy.clone(), ProxySource::Config),
        ];
        for (value, source) in explicit {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                return Some((value.trim().to_string(), source));
            }
        }

        PROXY_ENV_VARS.iter().find_map(|var| {
            std::env::var(var)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| (v.trim().to_string(), ProxySource::Environment(var.to_string())))
        })
    }
}

/// Display form of a proxy URL with any password masked
pub fn masked_proxy_url(url: &Url) -> String {
    let mut masked = url.clone();
    if masked.password().is_some() {
        let _ = masked.set_password(Some("****"));
    }
    masked.to_string()
}

impl Task for ProxyDetect {
    fn identifier(&self) -> Identifier {
        Identifier::new("Base", "Config", "ProxyDetect")
    }

    fn explain(&self) -> &'static str {
        "Detect proxy settings used for outbound connectivity checks"
    }

    fn dependencies(&self) -> Vec<Identifier> {
        Vec::new()
    }

    fn execute(&self, _options: &Options, _upstream: &UpstreamResults) -> TaskResult {
        let (raw, source) = match self.candidate() {
            Some(candidate) => candidate,
            None => return TaskResult::none("No proxy configured, connecting directly"),
        };

        let url = match Url::parse(&raw) {
            Ok(url) => url,
            Err(e) => {
                return TaskResult::warning(format!(
                    "Proxy setting from {} is not a valid URL and will be ignored: {}",
                    source, e
                ))
            }
        };

        if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
            return TaskResult::warning(format!(
                "Proxy setting from {} uses unsupported scheme '{}' and will be ignored",
                source,
                url.scheme()
            ));
        }

        TaskResult::success(format!(
            "Proxy detected from {}: {}",
            source,
            masked_proxy_url(&url)
        ))
        .with_payload(Payload::Proxy(ProxySettings { url: raw, source }))
    }
}
