/*!
Staged task runner.

Executes tasks in stages against frozen snapshots of earlier results:

- **Stage snapshot**: every task in a stage sees the same read-only
  `UpstreamResults`; the store is only extended between stages
- **Blocking pool**: each task runs on tokio's blocking pool, since checks
  perform synchronous network I/O
- **Total**: a task that panics or is cancelled still yields a Failure result
- **Ordering**: results come back in registration order, not completion order
*/

use crate::core::network::debug_logger::DebugLogger;
use crate::core::tasks::task::Task;
use crate::core::tasks::types::{Identifier, Options, TaskResult, UpstreamResults};
use std::sync::Arc;
use std::time::Instant;

pub struct Runner {
    options: Arc<Options>,
    logger: Arc<DebugLogger>,
}

impl Runner {
    pub fn new(options: Options) -> Self {
        Self {
            options: Arc::new(options),
            logger: Arc::new(DebugLogger::new()),
        }
    }

    /// Configure with a shared logger
    pub fn with_logger(mut self, logger: Arc<DebugLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Run every task of one stage concurrently against `upstream`
    pub async fn run_stage(
        &self,
        tasks: Vec<Arc<dyn Task>>,
        upstream: &UpstreamResults,
    ) -> Vec<(Identifier, TaskResult)> {
        let snapshot = Arc::new(upstream.clone());
        let mut handles = Vec::with_capacity(tasks.len());

        for task in tasks {
            let id = task.identifier();
            let id_str = id.to_string();

            for dependency in task.dependencies() {
                if !snapshot.contains(&dependency.to_string()) {
                    self.logger
                        .dependency_missing(&id_str, &dependency.to_string());
                }
            }

            let options = Arc::clone(&self.options);
            let snapshot = Arc::clone(&snapshot);
            let logger = Arc::clone(&self.logger);
            let handle = tokio::task::spawn_blocking(move || {
                let start = Instant::now();
                let result = task.execute(&options, &snapshot);
                logger.task_complete(
                    &id_str,
                    &result.status.to_string(),
                    start.elapsed().as_millis() as u64,
                );
                result
            });
            handles.push((id, handle));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (id, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    self.logger.error_sync(
                        "Runner",
                        "task_aborted",
                        &format!("{} did not complete: {}", id, e),
                    );
                    TaskResult::failure(format!("Task {} did not complete: {}", id, e))
                }
            };
            results.push((id, result));
        }

        results
    }

    /// Run `first`, then the stage `second` builds from the first stage's results
    ///
    /// Returns both stages' results, first stage first.
    pub async fn run_staged<F>(
        &self,
        first: Vec<Arc<dyn Task>>,
        second: F,
    ) -> Vec<(Identifier, TaskResult)>
    where
        F: FnOnce(&UpstreamResults) -> Vec<Arc<dyn Task>>,
    {
        let mut results = self.run_stage(first, &UpstreamResults::new()).await;
        let upstream = UpstreamResults::new().extended(results.iter().cloned());

        let next = second(&upstream);
        results.extend(self.run_stage(next, &upstream).await);
        results
    }
}
