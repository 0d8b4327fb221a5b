//! Bounded worker pool.
//!
//! A single control loop owns the pending queue, the in-flight set and
//! the completed list. Items are admitted in FIFO order while fewer than
//! `capacity` executions are outstanding; each admitted item runs as its
//! own Tokio task. The loop then waits for the next completion (no
//! polling) and refills the freed slot.
//!
//! Every item yields exactly one [`TaskResult`]. A transform error, a
//! panic inside the transform, or an expired per-item timeout becomes a
//! [`TaskOutcome::Failure`] for that item only; the loop and the other
//! executions carry on. Nothing is retried.

use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use relocale_core::error::CoreError;
use relocale_core::types::{TaskOutcome, TaskResult, WorkItem};

use crate::transform::Transform;

/// Default number of concurrent executions.
pub const DEFAULT_CAPACITY: usize = 4;

/// Pool tuning.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of outstanding transform calls. Must be at least 1.
    pub capacity: usize,
    /// Optional limit on a single execution. An execution that exceeds it
    /// is dropped and recorded as a failure. `None` waits indefinitely.
    pub item_timeout: Option<Duration>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            item_timeout: None,
        }
    }
}

/// Runs work items through a [`Transform`] with at most
/// [`PoolConfig::capacity`] executions in flight.
pub struct WorkerPool<T: Transform + ?Sized> {
    transform: Arc<T>,
    config: PoolConfig,
}

impl<T: Transform + ?Sized> WorkerPool<T> {
    /// Create a pool. Fails with [`CoreError::Config`] when the capacity
    /// is zero.
    pub fn new(transform: Arc<T>, config: PoolConfig) -> Result<Self, CoreError> {
        if config.capacity == 0 {
            return Err(CoreError::Config(
                "Worker pool capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self { transform, config })
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Process every item and return one result per item, in completion
    /// order.
    pub async fn run(&self, items: Vec<WorkItem>) -> Vec<TaskResult> {
        let total = items.len();
        if total == 0 {
            return Vec::new();
        }

        let mut pending: VecDeque<WorkItem> = items.into();
        let mut in_flight = FuturesUnordered::new();
        let mut completed: Vec<TaskResult> = Vec::with_capacity(total);

        tracing::info!(
            total,
            capacity = self.config.capacity,
            "Worker pool started",
        );

        while !pending.is_empty() || !in_flight.is_empty() {
            while in_flight.len() < self.config.capacity {
                let Some(item) = pending.pop_front() else {
                    break;
                };
                in_flight.push(self.admit(item));
            }

            if let Some(result) = in_flight.next().await {
                log_completion(&result, completed.len() + 1, total);
                completed.push(result);
            }
        }

        let succeeded = completed.iter().filter(|r| r.is_success()).count();
        tracing::info!(
            total,
            succeeded,
            failed = total - succeeded,
            "Worker pool drained",
        );

        completed
    }

    /// Start one execution and return a future resolving to its result.
    fn admit(&self, item: WorkItem) -> impl Future<Output = TaskResult> {
        let row = item.row;
        let item_name = item.item_name.clone();
        tracing::info!(row, item = %item_name, "Started processing");

        let handle = tokio::spawn(execute(
            Arc::clone(&self.transform),
            item,
            self.config.item_timeout,
        ));

        async move {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) if e.is_panic() => TaskOutcome::Failure {
                    error: format!("transform panicked: {}", panic_message(e.into_panic())),
                },
                Err(e) => TaskOutcome::Failure {
                    error: format!("execution aborted: {e}"),
                },
            };
            TaskResult {
                row,
                item_name,
                outcome,
            }
        }
    }
}

impl<T: Transform + ?Sized> fmt::Debug for WorkerPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("capacity", &self.config.capacity)
            .field("item_timeout", &self.config.item_timeout)
            .finish_non_exhaustive()
    }
}

/// Body of one execution task.
async fn execute<T: Transform + ?Sized>(
    transform: Arc<T>,
    item: WorkItem,
    timeout: Option<Duration>,
) -> TaskOutcome {
    let call = transform.execute(item);
    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => {
                return TaskOutcome::Failure {
                    error: format!("timed out after {}ms", limit.as_millis()),
                }
            }
        },
        None => call.await,
    };

    match result {
        Ok(output) => TaskOutcome::Success(output),
        Err(e) => TaskOutcome::Failure {
            error: e.to_string(),
        },
    }
}

fn log_completion(result: &TaskResult, done: usize, total: usize) {
    match &result.outcome {
        TaskOutcome::Success(output) => tracing::info!(
            row = result.row,
            item = %result.item_name,
            converted = %output.converted_name,
            done,
            total,
            "Successfully processed",
        ),
        TaskOutcome::Failure { error } => tracing::warn!(
            row = result.row,
            item = %result.item_name,
            error = %error,
            done,
            total,
            "Failed to process",
        ),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
