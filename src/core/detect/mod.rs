//! Upstream detection tasks feeding the collector checks
//!
//! These run in the first stage and publish typed payloads:
//! - `Base/Config/ProxyDetect` publishes [`Payload::Proxy`]
//! - `Base/Config/RegionDetect` publishes [`Payload::Regions`]
//!
//! [`Payload::Proxy`]: crate::core::tasks::types::Payload::Proxy
//! [`Payload::Regions`]: crate::core::tasks::types::Payload::Regions

pub mod proxy;
pub mod region;

pub use proxy::{ProxyDetect, PROXY_DETECT_ID, PROXY_ENV_VARS};
pub use region::{region_from_license_key, RegionDetect};
