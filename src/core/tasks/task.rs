//! Task contract between individual checks and the runner.

use crate::core::tasks::types::{Identifier, Options, TaskResult, UpstreamResults};

/// A single diagnostic check
///
/// Implementations must be total: every failure path is expressed as a
/// [`TaskResult`], never as a panic or an error bubbling out of `execute`.
pub trait Task: Send + Sync {
    /// Stable `Category/Subcategory/Name` identity
    fn identifier(&self) -> Identifier;

    /// One-line help text shown by `--list`
    fn explain(&self) -> &'static str;

    /// Identifiers whose results must be in the upstream store before `execute`
    ///
    /// A task must not read any upstream entry it does not declare here.
    fn dependencies(&self) -> Vec<Identifier>;

    /// Run the check once against a frozen snapshot of earlier results
    fn execute(&self, options: &Options, upstream: &UpstreamResults) -> TaskResult;
}
