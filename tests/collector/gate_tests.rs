use crate::common::{upstream_with_payload, upstream_with_regions};
use collector_check::core::collector::{evaluate_gate, GateDecision, EU_REGION, US_REGION};
use collector_check::core::tasks::{Payload, Status, TaskResult, UpstreamResults};

#[test]
fn test_skips_when_region_not_detected() {
    let upstream = upstream_with_regions(&["us01"]);

    match evaluate_gate(&EU_REGION, false, &upstream) {
        GateDecision::Skip(result) => {
            assert_eq!(result.status, Status::None);
            assert_eq!(
                result.summary,
                "EU Region not detected, skipping EU collector connect check"
            );
            assert!(result.url.is_none());
        }
        GateDecision::Run => panic!("EU check should be skipped for [us01]"),
    }
}

#[test]
fn test_runs_when_region_detected() {
    let upstream = upstream_with_regions(&["us01", "eu01"]);
    assert_eq!(evaluate_gate(&EU_REGION, false, &upstream), GateDecision::Run);
    assert_eq!(evaluate_gate(&US_REGION, false, &upstream), GateDecision::Run);
}

#[test]
fn test_runs_when_region_list_empty() {
    let upstream = upstream_with_regions(&[]);
    assert_eq!(evaluate_gate(&EU_REGION, false, &upstream), GateDecision::Run);
}

#[test]
fn test_runs_when_region_detect_absent() {
    let upstream = UpstreamResults::new();
    assert_eq!(evaluate_gate(&EU_REGION, false, &upstream), GateDecision::Run);
}

#[test]
fn test_runs_when_payload_has_wrong_type() {
    let upstream = upstream_with_payload(
        "Base/Config/RegionDetect",
        Payload::Text("eu01".to_string()),
    );
    assert_eq!(evaluate_gate(&US_REGION, false, &upstream), GateDecision::Run);
}

#[test]
fn test_runs_when_region_detect_has_no_payload() {
    let upstream: UpstreamResults = [(
        "Base/Config/RegionDetect".to_string(),
        TaskResult::warning("detection failed"),
    )]
    .into_iter()
    .collect();
    assert_eq!(evaluate_gate(&EU_REGION, false, &upstream), GateDecision::Run);
}

#[test]
fn test_regions_under_other_key_are_ignored() {
    let upstream = upstream_with_payload(
        "Base/Config/SomethingElse",
        Payload::Regions(vec!["us01".to_string()]),
    );
    assert_eq!(evaluate_gate(&EU_REGION, false, &upstream), GateDecision::Run);
}

#[test]
fn test_forced_run_bypasses_gate() {
    let upstream = upstream_with_regions(&["us01"]);
    assert_eq!(evaluate_gate(&EU_REGION, true, &upstream), GateDecision::Run);
}

#[test]
fn test_gate_is_deterministic() {
    let upstream = upstream_with_regions(&["eu01"]);
    let first = evaluate_gate(&US_REGION, false, &upstream);
    let second = evaluate_gate(&US_REGION, false, &upstream);
    assert_eq!(first, second);
    assert!(matches!(first, GateDecision::Skip(_)));
}
