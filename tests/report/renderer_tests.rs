use collector_check::core::tasks::{Identifier, Payload, Status, TaskResult};
use collector_check::core::ReportRenderer;

fn eu() -> Identifier {
    Identifier::new("Base", "Collector", "ConnectEU")
}

#[test]
fn test_markers_follow_status() {
    assert_eq!(ReportRenderer::marker(Status::None), "⚪");
    assert_eq!(ReportRenderer::marker(Status::Success), "🟢");
    assert_eq!(ReportRenderer::marker(Status::Warning), "🟡");
    assert_eq!(ReportRenderer::marker(Status::Failure), "🔴");
}

#[test]
fn test_render_success() {
    let renderer = ReportRenderer::new();
    let text = renderer.render_result(&eu(), &TaskResult::success("Status Code = 200 Body = OK"));

    assert_eq!(
        text,
        "🟢 Base/Collector/ConnectEU [Success]\n    Status Code = 200 Body = OK"
    );
}

#[test]
fn test_render_failure_with_link() {
    let renderer = ReportRenderer::new();
    let result = TaskResult::failure("first line\nsecond line").with_url("https://docs.example/networks");

    let text = renderer.render_result(&eu(), &result);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "🔴 Base/Collector/ConnectEU [Failure]");
    assert_eq!(lines[1], "    first line");
    assert_eq!(lines[2], "    second line");
    assert_eq!(lines[3], "    See: https://docs.example/networks");
}

#[test]
fn test_render_text_one_block_per_task() {
    let renderer = ReportRenderer::default();
    let results = vec![
        (eu(), TaskResult::none("skipped")),
        (
            Identifier::new("Base", "Collector", "ConnectUS"),
            TaskResult::warning("slow"),
        ),
    ];

    let text = renderer.render_text(&results);
    assert!(text.starts_with("⚪ Base/Collector/ConnectEU [None]"));
    assert!(text.contains("\n🟡 Base/Collector/ConnectUS [Warning]"));
}

#[test]
fn test_render_json_flattens_result() {
    let renderer = ReportRenderer::new();
    let results = vec![(
        Identifier::new("Base", "Config", "RegionDetect"),
        TaskResult::success("Configured regions: eu01")
            .with_payload(Payload::Regions(vec!["eu01".to_string()])),
    )];

    let json = renderer.render_json(&results).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value[0]["task"], "Base/Config/RegionDetect");
    assert_eq!(value[0]["summary"], "Configured regions: eu01");
    assert_eq!(value[0]["payload"]["type"], "regions");
    assert_eq!(value[0]["payload"]["value"][0], "eu01");
    assert!(value[0].get("url").is_none());
}
