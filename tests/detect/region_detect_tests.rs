use collector_check::core::detect::{region_from_license_key, RegionDetect};
use collector_check::core::tasks::{Options, Payload, Status, Task, UpstreamResults};

fn regions_of(detect: &RegionDetect) -> (Status, Option<Payload>) {
    let result = detect.execute(&Options::new(), &UpstreamResults::new());
    (result.status, result.payload)
}

#[test]
fn test_license_key_prefix() {
    assert_eq!(
        region_from_license_key("eu01xx0123456789abcdef0123456789abcdNRAL"),
        Some("eu01".to_string())
    );
    assert_eq!(
        region_from_license_key("  EU01XX0123456789  "),
        Some("eu01".to_string())
    );
    assert_eq!(
        region_from_license_key("0123456789abcdef0123456789abcdef01234567"),
        Some("us01".to_string())
    );
    assert_eq!(region_from_license_key("   "), None);
}

#[test]
fn test_explicit_regions_are_normalised() {
    let detect = RegionDetect::new(
        vec![" EU01".to_string(), "eu01".to_string(), "".to_string(), "us01".to_string()],
        Some("eu01xxabc".to_string()),
    );

    let (status, payload) = regions_of(&detect);

    assert_eq!(status, Status::Success);
    assert_eq!(
        payload,
        Some(Payload::Regions(vec!["eu01".to_string(), "us01".to_string()]))
    );
}

#[test]
fn test_region_from_license_key() {
    let detect = RegionDetect::new(Vec::new(), Some("eu01xxabcdef".to_string()));
    assert_eq!(
        regions_of(&detect),
        (Status::Success, Some(Payload::Regions(vec!["eu01".to_string()])))
    );
}

#[test]
fn test_nothing_known_publishes_empty_list() {
    let detect = RegionDetect::default();
    assert_eq!(
        regions_of(&detect),
        (Status::None, Some(Payload::Regions(Vec::new())))
    );
}

#[test]
fn test_no_dependencies() {
    let detect = RegionDetect::default();
    assert!(detect.dependencies().is_empty());
    assert_eq!(detect.identifier().to_string(), "Base/Config/RegionDetect");
}
