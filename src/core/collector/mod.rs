//! Collector Connectivity Checks
//!
//! Region-scoped checks that confirm a collector ingestion endpoint answers:
//! - Region gate that skips probes for regions known to be irrelevant
//! - Single bounded GET against the region's ping endpoint
//! - Total classifier mapping the probe outcome to a task result

pub mod classifier;
pub mod connect;
pub mod gate;
pub mod region;

// Re-export public API
pub use classifier::{classify, ProbeOutcome, NETWORKS_DOC_URL};
pub use connect::{
    collector_checks, run_probe, transport_from_upstream, CheckPhase, CollectorConnect,
};
pub use gate::{evaluate_gate, GateDecision, REGION_DETECT_ID};
pub use region::{CollectorRegion, EU_REGION, US_REGION};
