//! Probe Transport
//!
//! Narrow HTTP abstraction used by connectivity checks: one request in, one
//! response (status, headers, body stream) or one transport error out.
//! Production code binds it to a blocking `ureq` agent; tests substitute a
//! closure or a recording stub.

use crate::core::network::types::NetworkError;
use crate::core::tasks::types::ProxySettings;
use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

/// Fixed timeout for collector probes
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Single outbound request description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestWrapper {
    pub method: String,
    pub url: String,
    pub timeout: Duration,
}

impl RequestWrapper {
    pub fn get(url: &str, timeout: Duration) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.to_string(),
            timeout,
        }
    }
}

/// Response handed back by a transport
///
/// Owns the body stream. The only way to get at the body is
/// [`ProbeResponse::into_body_text`], which consumes the response, so the
/// stream is released exactly once whichever way the read ends.
pub struct ProbeResponse {
    pub status_code: u16,
    /// Lower-cased header names
    pub headers: HashMap<String, String>,
    body: Box<dyn Read>,
}

impl ProbeResponse {
    pub fn new(status_code: u16, headers: HashMap<String, String>, body: Box<dyn Read>) -> Self {
        Self {
            status_code,
            headers,
            body,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .map(|value| value.as_str())
    }

    /// Drain the body to a string and release the stream
    ///
    /// Invalid UTF-8 is replaced rather than treated as a read failure.
    pub fn into_body_text(self) -> Result<String, std::io::Error> {
        let mut body = self.body;
        let mut bytes = Vec::new();
        let read = body.read_to_end(&mut bytes);
        drop(body);
        read.map(|_| String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl fmt::Debug for ProbeResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeResponse")
            .field("status_code", &self.status_code)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// HTTP transport abstraction for dependency injection and testing
pub trait HttpTransport: Send + Sync {
    /// Execute one request, honouring `request.timeout`
    ///
    /// # Returns
    /// * `Ok(ProbeResponse)` - any HTTP status, including 4xx/5xx
    /// * `Err(NetworkError)` - DNS, connect, TLS, proxy or timeout failure
    fn send(&self, request: &RequestWrapper) -> Result<ProbeResponse, NetworkError>;
}

impl<F> HttpTransport for F
where
    F: Fn(&RequestWrapper) -> Result<ProbeResponse, NetworkError> + Send + Sync,
{
    fn send(&self, request: &RequestWrapper) -> Result<ProbeResponse, NetworkError> {
        self(request)
    }
}

/// Production transport using a blocking ureq agent
#[cfg(feature = "network-probe")]
pub struct UreqTransport {
    agent: ureq::Agent,
}

#[cfg(feature = "network-probe")]
impl UreqTransport {
    /// Build an agent, routing through `proxy` when one was detected
    pub fn new(proxy: Option<&ProxySettings>) -> Result<Self, NetworkError> {
        let proxy = match proxy {
            Some(settings) => Some(
                ureq::Proxy::new(&settings.url)
                    .map_err(|e| NetworkError::ProxyError(format!("{}: {}", settings.url, e)))?,
            ),
            None => None,
        };

        // 4xx/5xx are answers, not transport failures
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .proxy(proxy)
            .build()
            .into();

        Ok(Self { agent })
    }
}

#[cfg(feature = "network-probe")]
impl HttpTransport for UreqTransport {
    fn send(&self, request: &RequestWrapper) -> Result<ProbeResponse, NetworkError> {
        if !request.method.eq_ignore_ascii_case("GET") {
            return Err(NetworkError::RequestError(format!(
                "unsupported method {}",
                request.method
            )));
        }

        let response = self
            .agent
            .get(&request.url)
            .config()
            .timeout_global(Some(request.timeout))
            .build()
            .call()
            .map_err(|e| NetworkError::Transport(e.to_string()))?;

        let status_code = response.status().as_u16();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                headers.insert(key.as_str().to_lowercase(), value_str.to_string());
            }
        }

        let (_, body) = response.into_parts();
        Ok(ProbeResponse::new(
            status_code,
            headers,
            Box::new(body.into_reader()),
        ))
    }
}

/// Transport used when built without the network-probe feature
///
/// Every request fails at the transport level, so checks report Failure
/// instead of pretending the endpoint answered.
#[cfg(not(feature = "network-probe"))]
#[derive(Default)]
pub struct OfflineTransport;

#[cfg(not(feature = "network-probe"))]
impl OfflineTransport {
    pub fn new(_proxy: Option<&ProxySettings>) -> Result<Self, NetworkError> {
        Ok(Self)
    }
}

#[cfg(not(feature = "network-probe"))]
impl HttpTransport for OfflineTransport {
    fn send(&self, request: &RequestWrapper) -> Result<ProbeResponse, NetworkError> {
        Err(NetworkError::Transport(format!(
            "network probing disabled in this build, cannot reach {}",
            request.url
        )))
    }
}

/// Transport the binary uses for the current feature set
pub fn default_transport(
    proxy: Option<&ProxySettings>,
) -> Result<Arc<dyn HttpTransport>, NetworkError> {
    #[cfg(feature = "network-probe")]
    let transport: Arc<dyn HttpTransport> = Arc::new(UreqTransport::new(proxy)?);
    #[cfg(not(feature = "network-probe"))]
    let transport: Arc<dyn HttpTransport> = Arc::new(OfflineTransport::new(proxy)?);

    Ok(transport)
}
