// Report rendering for task results
use crate::core::tasks::types::{Identifier, Status, TaskResult};
use serde::Serialize;

/// One line of the final report
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry<'a> {
    pub task: String,
    #[serde(flatten)]
    pub result: &'a TaskResult,
}

/// Renders task results for the terminal or as JSON
pub struct ReportRenderer;

impl ReportRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Marker: ⚪/🟢/🟡/🔴 map to `None/Success/Warning/Failure`
    pub fn marker(status: Status) -> &'static str {
        match status {
            Status::None => "⚪",
            Status::Success => "🟢",
            Status::Warning => "🟡",
            Status::Failure => "🔴",
        }
    }

    /// Render one result as an indented block
    ///
    /// Header carries marker, task id and status; summary lines follow
    /// indented, then `See: <url>` when a remediation link exists.
    pub fn render_result(&self, id: &Identifier, result: &TaskResult) -> String {
        let mut out = format!("{} {} [{}]", Self::marker(result.status), id, result.status);

        for line in result.summary.lines() {
            out.push('\n');
            out.push_str("    ");
            out.push_str(line);
        }

        if let Some(url) = &result.url {
            out.push_str("\n    See: ");
            out.push_str(url);
        }

        out
    }

    /// Render every result, one block per task
    pub fn render_text(&self, results: &[(Identifier, TaskResult)]) -> String {
        results
            .iter()
            .map(|(id, result)| self.render_result(id, result))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render_json(
        &self,
        results: &[(Identifier, TaskResult)],
    ) -> Result<String, serde_json::Error> {
        let entries: Vec<ReportEntry<'_>> = results
            .iter()
            .map(|(id, result)| ReportEntry {
                task: id.to_string(),
                result,
            })
            .collect();
        serde_json::to_string_pretty(&entries)
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}
