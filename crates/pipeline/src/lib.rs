//! Batch localization pipeline.
//!
//! - [`pool::WorkerPool`] runs work items through a [`Transform`] with a
//!   fixed concurrency ceiling, producing one result per item.
//! - [`openai_transform::OpenAiTransform`] is the production transform:
//!   regenerate the image with translated text, translate the file name.
//! - [`batch::run_batch`] wires a task source, the pool and a result sink
//!   into one run.

pub mod batch;
pub mod error;
pub mod openai_transform;
pub mod pool;
pub mod prompts;
pub mod transform;

pub use batch::{run_batch, RunSummary};
pub use error::ServiceError;
pub use pool::{PoolConfig, WorkerPool};
pub use transform::Transform;
