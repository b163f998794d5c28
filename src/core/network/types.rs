// Error types for the network layer

/// Network layer errors
///
/// `Transport` keeps the lower layer's message verbatim so it can be shown
/// to the operator unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    #[error("Request creation failed: {0}")]
    RequestError(String),
    #[error("{0}")]
    Transport(String),
    #[error("Invalid proxy setting: {0}")]
    ProxyError(String),
}

// Environment variable utilities
/// Parse boolean environment variables
///
/// Accepts true/false, 1/0, yes/no, on/off (case insensitive). Anything else,
/// including an unset variable, is false.
pub fn parse_env_bool(env_var: &str) -> bool {
    std::env::var(env_var)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on"))
        .unwrap_or(false)
}

/// Local timezone RFC3339 timestamp used by every log entry
pub fn get_local_timestamp() -> String {
    chrono::Local::now().to_rfc3339()
}
