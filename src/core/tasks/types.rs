// Core types shared by every diagnostic task
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Severity of a task outcome
///
/// Variants are declared in severity order so the derived `Ord` can be used
/// by whoever aggregates results. `None` marks a task that was not evaluated
/// (skipped or nothing to report) rather than a severity of its own.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Status {
    #[default]
    None,
    Success,
    Warning,
    Failure,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::None => write!(f, "None"),
            Status::Success => write!(f, "Success"),
            Status::Warning => write!(f, "Warning"),
            Status::Failure => write!(f, "Failure"),
        }
    }
}

/// Where a detected proxy setting came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProxySource {
    Cli,
    Config,
    /// Name of the environment variable that supplied the proxy
    Environment(String),
}

impl fmt::Display for ProxySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxySource::Cli => write!(f, "cli"),
            ProxySource::Config => write!(f, "config"),
            ProxySource::Environment(var) => write!(f, "env:{}", var),
        }
    }
}

/// Proxy settings published by the proxy detection task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxySettings {
    pub url: String,
    pub source: ProxySource,
}

/// Typed data a task hands to the tasks that depend on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Payload {
    /// Ordered list of detected region codes, e.g. `["eu01", "us01"]`
    Regions(Vec<String>),
    Proxy(ProxySettings),
    Text(String),
}

impl Payload {
    /// Checked accessor for a region list; `None` for every other variant
    pub fn as_regions(&self) -> Option<&[String]> {
        match self {
            Payload::Regions(regions) => Some(regions.as_slice()),
            _ => None,
        }
    }

    /// Checked accessor for proxy settings; `None` for every other variant
    pub fn as_proxy(&self) -> Option<&ProxySettings> {
        match self {
            Payload::Proxy(settings) => Some(settings),
            _ => None,
        }
    }
}

/// Outcome of a single task execution
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaskResult {
    pub status: Status,
    pub summary: String,
    /// Remediation documentation, only set for Warning and Failure outcomes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

impl TaskResult {
    pub fn new(status: Status, summary: impl Into<String>) -> Self {
        Self {
            status,
            summary: summary.into(),
            url: None,
            payload: None,
        }
    }

    pub fn none(summary: impl Into<String>) -> Self {
        Self::new(Status::None, summary)
    }

    pub fn success(summary: impl Into<String>) -> Self {
        Self::new(Status::Success, summary)
    }

    pub fn warning(summary: impl Into<String>) -> Self {
        Self::new(Status::Warning, summary)
    }

    pub fn failure(summary: impl Into<String>) -> Self {
        Self::new(Status::Failure, summary)
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("identifier must have the form Category/Subcategory/Name, got {0:?}")]
    Malformed(String),
}

/// Stable task identity: `Category/Subcategory/Name`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    pub category: String,
    pub subcategory: String,
    pub name: String,
}

impl Identifier {
    pub fn new(category: &str, subcategory: &str, name: &str) -> Self {
        Self {
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            name: name.to_string(),
        }
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        match parts.as_slice() {
            [category, subcategory, name]
                if !category.is_empty() && !subcategory.is_empty() && !name.is_empty() =>
            {
                Ok(Self::new(category, subcategory, name))
            }
            _ => Err(IdentifierError::Malformed(s.to_string())),
        }
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.to_string()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.category, self.subcategory, self.name)
    }
}

/// Run-scoped execution options handed to every task
///
/// Carries the operator's forced-task selection explicitly instead of tasks
/// reaching for process-wide flags.
#[derive(Debug, Clone, Default)]
pub struct Options {
    forced_tasks: HashSet<String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_forced_task(mut self, id: &Identifier) -> Self {
        self.forced_tasks.insert(id.to_string());
        self
    }

    pub fn with_forced_tasks<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = Identifier>,
    {
        self.forced_tasks
            .extend(ids.into_iter().map(|id| id.to_string()));
        self
    }

    /// Whether the operator asked for exactly this task
    pub fn is_forced_task(&self, id: &Identifier) -> bool {
        self.forced_tasks.contains(&id.to_string())
    }
}

/// Read-only snapshot of the results produced earlier in the run
#[derive(Debug, Clone, Default)]
pub struct UpstreamResults {
    results: HashMap<String, TaskResult>,
}

impl UpstreamResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&TaskResult> {
        self.results.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.results.contains_key(id)
    }

    /// Payload of an upstream result, `None` when the task is absent or carried none
    pub fn payload(&self, id: &str) -> Option<&Payload> {
        self.get(id).and_then(|result| result.payload.as_ref())
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Produce a new snapshot extended with another stage's results
    pub fn extended<I>(&self, results: I) -> Self
    where
        I: IntoIterator<Item = (Identifier, TaskResult)>,
    {
        let mut next = self.clone();
        for (id, result) in results {
            next.results.insert(id.to_string(), result);
        }
        next
    }
}

impl FromIterator<(String, TaskResult)> for UpstreamResults {
    fn from_iter<T: IntoIterator<Item = (String, TaskResult)>>(iter: T) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}
