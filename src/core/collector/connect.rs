//! Collector connect task: gate, probe, classify.

use crate::core::collector::classifier::{classify, ProbeOutcome};
use crate::core::collector::gate::{evaluate_gate, GateDecision, REGION_DETECT_ID};
use crate::core::collector::region::CollectorRegion;
use crate::core::detect::PROXY_DETECT_ID;
use crate::core::network::debug_logger::DebugLogger;
use crate::core::network::transport::{
    default_transport, HttpTransport, ProbeResponse, RequestWrapper, PROBE_TIMEOUT,
};
use crate::core::network::types::NetworkError;
use crate::core::tasks::task::Task;
use crate::core::tasks::types::{Identifier, Options, TaskResult, UpstreamResults};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Lifecycle of a single check execution
///
/// `NotRun -> Skipped` or `NotRun -> Probing -> Classified`; no phase is
/// entered twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckPhase {
    NotRun,
    Skipped,
    Probing,
    Classified,
}

impl fmt::Display for CheckPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckPhase::NotRun => write!(f, "not_run"),
            CheckPhase::Skipped => write!(f, "skipped"),
            CheckPhase::Probing => write!(f, "probing"),
            CheckPhase::Classified => write!(f, "classified"),
        }
    }
}

/// Connectivity check for one collector region
pub struct CollectorConnect {
    region: CollectorRegion,
    transport: Arc<dyn HttpTransport>,
    logger: Arc<DebugLogger>,
}

impl CollectorConnect {
    pub fn new(region: CollectorRegion, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            region,
            transport,
            logger: Arc::new(DebugLogger::new()),
        }
    }

    /// Configure with a shared logger
    pub fn with_logger(mut self, logger: Arc<DebugLogger>) -> Self {
        self.logger = logger;
        self
    }

    fn transition(&self, id: &Identifier, from: CheckPhase, to: CheckPhase) {
        self.logger
            .phase_change(&id.to_string(), &from.to_string(), &to.to_string());
    }
}

impl Task for CollectorConnect {
    fn identifier(&self) -> Identifier {
        Identifier::new("Base", "Collector", self.region.task_name)
    }

    fn explain(&self) -> &'static str {
        self.region.explain
    }

    fn dependencies(&self) -> Vec<Identifier> {
        vec![
            Identifier::new("Base", "Config", "ProxyDetect"),
            Identifier::new("Base", "Config", "RegionDetect"),
        ]
    }

    fn execute(&self, options: &Options, upstream: &UpstreamResults) -> TaskResult {
        let id = self.identifier();
        let forced = options.is_forced_task(&id);

        if let GateDecision::Skip(result) = evaluate_gate(&self.region, forced, upstream) {
            let regions = upstream
                .payload(REGION_DETECT_ID)
                .and_then(|payload| payload.as_regions())
                .unwrap_or_default();
            self.logger.gate_skip(&id.to_string(), regions);
            self.transition(&id, CheckPhase::NotRun, CheckPhase::Skipped);
            return result;
        }

        self.transition(&id, CheckPhase::NotRun, CheckPhase::Probing);
        let request = RequestWrapper::get(self.region.endpoint, PROBE_TIMEOUT);
        let outcome = run_probe(self.transport.as_ref(), &request, &self.logger);
        let result = classify(&self.region, &outcome);
        self.transition(&id, CheckPhase::Probing, CheckPhase::Classified);

        result
    }
}

/// Issue one request and collect what the classifier needs
///
/// The response is consumed by [`ProbeResponse::into_body_text`] on the only
/// path that receives one, so the body is released before this returns.
///
/// [`ProbeResponse::into_body_text`]: crate::core::network::transport::ProbeResponse::into_body_text
pub fn run_probe(
    transport: &dyn HttpTransport,
    request: &RequestWrapper,
    logger: &DebugLogger,
) -> ProbeOutcome {
    let correlation_id = Uuid::new_v4().to_string();
    let start = Instant::now();
    logger.probe_start(&request.url, request.timeout.as_secs(), correlation_id.clone());

    let response = match transport.send(request) {
        Ok(response) => response,
        Err(e) => {
            let elapsed = start.elapsed().as_millis() as u64;
            logger.probe_end("transport_error", None, elapsed, correlation_id);
            return ProbeOutcome::transport_failure(e.to_string());
        }
    };

    let status_code = response.status_code;
    let outcome = match response.into_body_text() {
        Ok(body) => ProbeOutcome::response(status_code.to_string(), body),
        Err(e) => ProbeOutcome::read_failure(status_code.to_string(), e.to_string()),
    };

    let label = if outcome.read_error.is_some() {
        "read_error"
    } else {
        "response"
    };
    logger.probe_end(
        label,
        Some(status_code),
        start.elapsed().as_millis() as u64,
        correlation_id,
    );

    outcome
}

/// Transport for the collector stage, routed through the detected proxy
///
/// A transport that cannot be built (for example a proxy ureq rejects)
/// becomes one that fails every request with that reason, so each check
/// still reports a Failure result instead of the run aborting.
pub fn transport_from_upstream(upstream: &UpstreamResults) -> Arc<dyn HttpTransport> {
    let proxy = upstream
        .payload(PROXY_DETECT_ID)
        .and_then(|payload| payload.as_proxy());

    match default_transport(proxy) {
        Ok(transport) => transport,
        Err(e) => {
            let message = e.to_string();
            Arc::new(
                move |_: &RequestWrapper| -> Result<ProbeResponse, NetworkError> {
                    Err(NetworkError::Transport(message.clone()))
                },
            )
        }
    }
}

/// One connect check per known collector region, sharing a transport
pub fn collector_checks(
    transport: Arc<dyn HttpTransport>,
    logger: Arc<DebugLogger>,
) -> Vec<Arc<dyn Task>> {
    CollectorRegion::ALL
        .into_iter()
        .map(|region| {
            Arc::new(
                CollectorConnect::new(region, Arc::clone(&transport)).with_logger(Arc::clone(&logger)),
            ) as Arc<dyn Task>
        })
        .collect()
}
