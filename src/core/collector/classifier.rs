//! Response Classifier
//!
//! Pure mapping from a collector probe outcome to a task result. Rows are
//! checked in order and the first match wins:
//!
//! | condition              | status  |
//! |------------------------|---------|
//! | transport error        | Failure |
//! | body read error        | Warning |
//! | status code "200"      | Success |
//! | anything else          | Warning |
//!
//! The status code is carried as text so an empty or malformed code simply
//! lands in the last row.

use crate::core::collector::region::CollectorRegion;
use crate::core::tasks::types::TaskResult;

pub const NETWORKS_DOC_URL: &str =
    "https://docs.newrelic.com/docs/apm/new-relic-apm/getting-started/networks";

const CHECK_SETTINGS_ADVICE: &str =
    "Please check network and proxy settings and try again or see --help for more options.";

/// Raw facts gathered by one probe
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProbeOutcome {
    pub transport_error: Option<String>,
    pub read_error: Option<String>,
    /// Empty when no response was received
    pub status_code: String,
    pub body: String,
}

impl ProbeOutcome {
    pub fn transport_failure(error: impl Into<String>) -> Self {
        Self {
            transport_error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn read_failure(status_code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            read_error: Some(error.into()),
            status_code: status_code.into(),
            ..Default::default()
        }
    }

    pub fn response(status_code: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status_code: status_code.into(),
            body: body.into(),
            ..Default::default()
        }
    }
}

/// Classify a probe outcome for `region`
pub fn classify(region: &CollectorRegion, outcome: &ProbeOutcome) -> TaskResult {
    if let Some(error) = &outcome.transport_error {
        return TaskResult::failure(format!(
            "There was an error connecting to collector.newrelic.com ({} Region)\n{}\nError = {}",
            region.label, CHECK_SETTINGS_ADVICE, error
        ))
        .with_url(NETWORKS_DOC_URL);
    }

    if let Some(error) = &outcome.read_error {
        return TaskResult::warning(format!(
            "Status = {}. When connecting to the {} Region collector, there was an issue reading the body.\n{}\nError = {}",
            outcome.status_code, region.label, CHECK_SETTINGS_ADVICE, error
        ))
        .with_url(NETWORKS_DOC_URL);
    }

    if outcome.status_code == "200" {
        return TaskResult::success(format!(
            "Status Code = {} Body = {}",
            outcome.status_code, outcome.body
        ));
    }

    TaskResult::warning(format!(
        "collector.newrelic.com ({} Region) returned a non-200 STATUS CODE: {}\n{}\nResponse Body: {}",
        region.label, outcome.status_code, CHECK_SETTINGS_ADVICE, outcome.body
    ))
    .with_url(NETWORKS_DOC_URL)
}
