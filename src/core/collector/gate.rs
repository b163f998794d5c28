//! Region Gate
//!
//! Decides from upstream region detection whether a collector probe should
//! run at all. Unknown region data never blocks a probe: an absent, wrongly
//! typed or empty payload all mean "run the check".

use crate::core::collector::region::CollectorRegion;
use crate::core::tasks::types::{TaskResult, UpstreamResults};

/// Upstream task that publishes the detected region list
pub const REGION_DETECT_ID: &str = "Base/Config/RegionDetect";

#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// Go ahead and probe the endpoint
    Run,
    /// Stop here and report this `None` result
    Skip(TaskResult),
}

/// Evaluate the gate for `region`
///
/// `forced` is the operator override for this exact task and bypasses the
/// region lookup entirely.
pub fn evaluate_gate(
    region: &CollectorRegion,
    forced: bool,
    upstream: &UpstreamResults,
) -> GateDecision {
    if forced {
        return GateDecision::Run;
    }

    let regions = match upstream
        .payload(REGION_DETECT_ID)
        .and_then(|payload| payload.as_regions())
    {
        Some(regions) => regions,
        None => return GateDecision::Run,
    };

    // Nothing detected means every region is still a candidate
    if regions.is_empty() || regions.iter().any(|code| code == region.code) {
        return GateDecision::Run;
    }

    GateDecision::Skip(TaskResult::none(format!(
        "{label} Region not detected, skipping {label} collector connect check",
        label = region.label
    )))
}
