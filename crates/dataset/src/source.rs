//! Task source over a CSV or XLSX dataset.

use std::path::{Path, PathBuf};

use relocale_core::error::CoreError;
use relocale_core::types::WorkItem;

use crate::format::{read_dataset, DatasetFormat};
use crate::rows::{DatasetRows, REQUIRED_COLUMNS};

/// Produces the work items of one batch run.
pub trait TaskSource {
    /// Load all work items in source order.
    ///
    /// Fails with [`CoreError::DataUnavailable`] when the dataset is
    /// missing, unreadable, or malformed.
    fn load(&self) -> Result<Vec<WorkItem>, CoreError>;
}

/// Reads work items from a dataset with the columns item name,
/// detected text and translated text.
///
/// The file format follows the extension of `dataset_path`. Image paths
/// are resolved against `images_dir`.
#[derive(Debug, Clone)]
pub struct DatasetTaskSource {
    dataset_path: PathBuf,
    images_dir: PathBuf,
}

impl DatasetTaskSource {
    pub fn new(dataset_path: impl Into<PathBuf>, images_dir: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            images_dir: images_dir.into(),
        }
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    fn work_item(&self, row: usize, record: &[String]) -> Result<WorkItem, CoreError> {
        if record.len() < REQUIRED_COLUMNS {
            return Err(CoreError::DataUnavailable(format!(
                "Data row {row} of {} has {} columns, expected at least {REQUIRED_COLUMNS}",
                self.dataset_path.display(),
                record.len(),
            )));
        }
        let item_name = record[0].trim().to_string();
        if item_name.is_empty() {
            return Err(CoreError::DataUnavailable(format!(
                "Data row {row} of {} has an empty item name",
                self.dataset_path.display(),
            )));
        }
        Ok(WorkItem {
            row,
            image_path: self.images_dir.join(&item_name),
            item_name,
            detected_text: record[1].clone(),
            translated_text: record[2].clone(),
        })
    }
}

impl TaskSource for DatasetTaskSource {
    fn load(&self) -> Result<Vec<WorkItem>, CoreError> {
        let dataset: DatasetRows = read_dataset(&self.dataset_path).map_err(|e| {
            CoreError::DataUnavailable(format!(
                "Failed to read dataset {}: {e}",
                self.dataset_path.display()
            ))
        })?;

        let items = dataset
            .rows
            .iter()
            .enumerate()
            .map(|(row, record)| self.work_item(row, record))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            dataset = %self.dataset_path.display(),
            header = dataset.header.is_some(),
            count = items.len(),
            "Loaded work items",
        );

        Ok(items)
    }
}

/// Find the dataset to process in `dir`: the `.csv` or `.xlsx` file
/// whose name sorts last. Office lock files (`~$...`) are ignored.
pub fn latest_dataset(dir: &Path) -> Result<PathBuf, CoreError> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        CoreError::DataUnavailable(format!(
            "Failed to read dataset directory {}: {e}",
            dir.display()
        ))
    })?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| DatasetFormat::from_path(path).is_some())
        .filter(|path| {
            !path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("~$"))
        })
        .collect();
    candidates.sort();

    candidates.pop().ok_or_else(|| {
        CoreError::DataUnavailable(format!(
            "No .csv or .xlsx dataset found in {}",
            dir.display()
        ))
    })
}
