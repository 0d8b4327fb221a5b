//! One batch run: load, process, persist.

use relocale_core::error::CoreError;
use relocale_dataset::{ResultSink, TaskSource};
use serde::Serialize;

use crate::pool::WorkerPool;
use crate::transform::Transform;

/// Per-run outcome counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Load all items from `source`, run them through `pool`, and hand the
/// results to `sink`.
///
/// Per-item failures are part of the summary, not errors. The run fails
/// only when the source cannot be loaded (nothing is processed) or the
/// sink cannot persist (all items have already been processed).
pub async fn run_batch<T: Transform + ?Sized>(
    source: &dyn TaskSource,
    pool: &WorkerPool<T>,
    sink: &dyn ResultSink,
) -> Result<RunSummary, CoreError> {
    let items = source.load()?;
    tracing::info!(count = items.len(), "Found items to process");

    let results = pool.run(items).await;

    let succeeded = results.iter().filter(|r| r.is_success()).count();
    let summary = RunSummary {
        total: results.len(),
        succeeded,
        failed: results.len() - succeeded,
    };

    sink.persist(&results)?;

    tracing::info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Processing complete",
    );

    Ok(summary)
}
