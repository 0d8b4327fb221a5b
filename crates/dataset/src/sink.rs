//! Result sink writing an updated copy of the dataset.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use relocale_core::error::CoreError;
use relocale_core::types::{RowIndex, TaskResult};

use crate::format::{read_dataset, write_dataset};
use crate::rows::{DatasetRows, Row, COLUMN_HEADERS, CONVERTED_COLUMN};

/// Persists the outcomes of a batch run.
pub trait ResultSink {
    /// Write all results. Fails with [`CoreError::Storage`] when the
    /// destination cannot be written.
    fn persist(&self, results: &[TaskResult]) -> Result<(), CoreError>;
}

/// Writes the input dataset back out with a fourth column holding the
/// converted item name of every successful row.
///
/// Failed rows keep the column blank. The fixed header is always
/// written, replacing any header the input had. Input and output formats
/// each follow their own file extension.
#[derive(Debug, Clone)]
pub struct DatasetResultSink {
    dataset_path: PathBuf,
    output_path: PathBuf,
}

impl DatasetResultSink {
    pub fn new(dataset_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

impl ResultSink for DatasetResultSink {
    fn persist(&self, results: &[TaskResult]) -> Result<(), CoreError> {
        let dataset = read_dataset(&self.dataset_path).map_err(|e| {
            CoreError::Storage(format!(
                "Failed to re-read dataset {}: {e}",
                self.dataset_path.display()
            ))
        })?;

        let converted: HashMap<RowIndex, &str> = results
            .iter()
            .filter_map(|result| result.converted_name().map(|name| (result.row, name)))
            .collect();

        let rows = updated_rows(&dataset, &converted);
        write_dataset(&self.output_path, &rows).map_err(|e| {
            CoreError::Storage(format!(
                "Failed to write results to {}: {e}",
                self.output_path.display()
            ))
        })?;

        tracing::info!(
            output = %self.output_path.display(),
            rows = dataset.rows.len(),
            converted = converted.len(),
            "Results persisted",
        );

        Ok(())
    }
}

/// Fixed header followed by every data row with its converted name set.
fn updated_rows(dataset: &DatasetRows, converted: &HashMap<RowIndex, &str>) -> Vec<Row> {
    let header: Row = COLUMN_HEADERS.iter().map(|title| title.to_string()).collect();
    std::iter::once(header)
        .chain(dataset.rows.iter().enumerate().map(|(row, record)| {
            with_converted_name(record, converted.get(&row).copied())
        }))
        .collect()
}

/// Copy a data row, setting the converted-name column (padding short
/// rows so the column exists).
fn with_converted_name(record: &[String], converted_name: Option<&str>) -> Row {
    let mut fields = record.to_vec();
    if fields.len() <= CONVERTED_COLUMN {
        fields.resize(CONVERTED_COLUMN + 1, String::new());
    }
    fields[CONVERTED_COLUMN] = converted_name.unwrap_or_default().to_string();
    fields
}
