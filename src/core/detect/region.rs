// Region detection from explicit settings or license key prefix

use crate::core::tasks::task::Task;
use crate::core::tasks::types::{Identifier, Options, Payload, TaskResult, UpstreamResults};
use regex::Regex;
use std::sync::OnceLock;

/// Keys without a region prefix belong to the default region
const DEFAULT_REGION: &str = "us01";

fn license_prefix_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([a-z]{2}[0-9]{2})x").ok())
        .as_ref()
}

/// Region code encoded in a license key, e.g. `eu01xx...` -> `eu01`
pub fn region_from_license_key(license_key: &str) -> Option<String> {
    let key = license_key.trim().to_lowercase();
    if key.is_empty() {
        return None;
    }

    match license_prefix_regex().and_then(|re| re.captures(&key)) {
        Some(captures) => captures.get(1).map(|m| m.as_str().to_string()),
        None => Some(DEFAULT_REGION.to_string()),
    }
}

/// Publishes the list of regions this installation reports to
#[derive(Debug, Clone, Default)]
pub struct RegionDetect {
    regions: Vec<String>,
    license_key: Option<String>,
}

impl RegionDetect {
    pub fn new(regions: Vec<String>, license_key: Option<String>) -> Self {
        Self {
            regions,
            license_key,
        }
    }

    fn explicit_regions(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for code in &self.regions {
            let code = code.trim().to_lowercase();
            if !code.is_empty() && !seen.contains(&code) {
                seen.push(code);
            }
        }
        seen
    }
}

impl Task for RegionDetect {
    fn identifier(&self) -> Identifier {
        Identifier::new("Base", "Config", "RegionDetect")
    }

    fn explain(&self) -> &'static str {
        "Detect which collector regions this installation reports to"
    }

    fn dependencies(&self) -> Vec<Identifier> {
        Vec::new()
    }

    fn execute(&self, _options: &Options, _upstream: &UpstreamResults) -> TaskResult {
        let explicit = self.explicit_regions();
        if !explicit.is_empty() {
            return TaskResult::success(format!("Configured regions: {}", explicit.join(", ")))
                .with_payload(Payload::Regions(explicit));
        }

        if let Some(region) = self
            .license_key
            .as_deref()
            .and_then(region_from_license_key)
        {
            return TaskResult::success(format!("Region detected from license key: {}", region))
                .with_payload(Payload::Regions(vec![region]));
        }

        TaskResult::none("No region information found, all collector regions will be checked")
            .with_payload(Payload::Regions(Vec::new()))
    }
}
