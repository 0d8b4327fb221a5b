//! The seam between the pool and the remote service.

use async_trait::async_trait;
use relocale_core::types::{TransformOutput, WorkItem};

use crate::error::ServiceError;

/// Turns one work item into its localized output.
///
/// Calls may take arbitrarily long and are not idempotent: running the
/// same item twice can produce two different outputs.
#[async_trait]
pub trait Transform: Send + Sync + 'static {
    async fn execute(&self, item: WorkItem) -> Result<TransformOutput, ServiceError>;
}
