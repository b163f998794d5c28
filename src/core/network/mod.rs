pub mod debug_logger;
pub mod transport;
pub mod types;

// Re-export commonly used items
pub use debug_logger::{get_debug_logger, DebugLogger};
pub use transport::{default_transport, HttpTransport, ProbeResponse, RequestWrapper, PROBE_TIMEOUT};
pub use types::*;

#[cfg(feature = "network-probe")]
pub use transport::UreqTransport;

#[cfg(not(feature = "network-probe"))]
pub use transport::OfflineTransport;
