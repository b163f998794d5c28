// Static descriptors for each collector region

/// Everything region-specific about a collector connectivity check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectorRegion {
    /// Region code as reported by region detection, e.g. "eu01"
    pub code: &'static str,
    /// Short label used in messages, e.g. "EU"
    pub label: &'static str,
    /// Task name under Base/Collector
    pub task_name: &'static str,
    pub endpoint: &'static str,
    pub explain: &'static str,
}

pub const EU_REGION: CollectorRegion = CollectorRegion {
    code: "eu01",
    label: "EU",
    task_name: "ConnectEU",
    endpoint: "https://collector.eu.newrelic.com/jserrors/ping",
    explain: "Check network connection to New Relic EU region collector endpoint",
};

pub const US_REGION: CollectorRegion = CollectorRegion {
    code: "us01",
    label: "US",
    task_name: "ConnectUS",
    endpoint: "https://collector.newrelic.com/jserrors/ping",
    explain: "Check network connection to New Relic US region collector endpoint",
};

impl CollectorRegion {
    pub const ALL: [CollectorRegion; 2] = [EU_REGION, US_REGION];
}
