pub mod collector;
pub mod detect;
pub mod network;
pub mod report;
pub mod tasks;

pub use report::ReportRenderer;
pub use tasks::{Runner, Task};
