pub mod runner;
pub mod task;
pub mod types;

// Re-export commonly used items
pub use runner::Runner;
pub use task::Task;
pub use types::*;
