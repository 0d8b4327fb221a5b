//! Dataset adapters for the batch pipeline.
//!
//! Datasets are CSV files or XLSX workbooks (sheet `Results`); the format
//! is chosen by file extension.
//!
//! - [`TaskSource`] / [`DatasetTaskSource`] turn dataset rows into
//!   [`WorkItem`](relocale_core::types::WorkItem)s.
//! - [`ResultSink`] / [`DatasetResultSink`] write the outcomes back as an
//!   updated copy of the dataset.
//! - [`latest_dataset`] picks the input file for a run.

mod csv_file;
pub mod error;
pub mod format;
pub mod rows;
pub mod sink;
pub mod source;
mod xlsx_file;

pub use error::DatasetError;
pub use format::DatasetFormat;
pub use sink::{DatasetResultSink, ResultSink};
pub use source::{latest_dataset, DatasetTaskSource, TaskSource};
pub use xlsx_file::RESULTS_SHEET;
