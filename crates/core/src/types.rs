//! Work items and their outcomes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Zero-based index of a data row in the source dataset (header excluded).
pub type RowIndex = usize;

/// One unit of input: a single data row of the source dataset.
///
/// Created once by the task source and never mutated afterwards. The
/// pool moves it into the execution that processes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Position of the row among the data rows.
    pub row: RowIndex,
    /// Image file name as listed in the dataset.
    pub item_name: String,
    /// Text detected in the source image.
    pub detected_text: String,
    /// Translation of the detected text to render into the new image.
    pub translated_text: String,
    /// Location of the source image on disk.
    pub image_path: PathBuf,
}

/// What a successful transform produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOutput {
    /// Localized file name, always with a `.png` extension.
    pub converted_name: String,
    /// Where the regenerated image was written.
    pub output_path: PathBuf,
}

/// Success or failure of a single work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TaskOutcome {
    Success(TransformOutput),
    Failure { error: String },
}

/// The outcome of processing one [`WorkItem`], tagged with the item it
/// belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    pub row: RowIndex,
    pub item_name: String,
    pub outcome: TaskOutcome,
}

impl TaskResult {
    pub fn success(item: &WorkItem, output: TransformOutput) -> Self {
        Self {
            row: item.row,
            item_name: item.item_name.clone(),
            outcome: TaskOutcome::Success(output),
        }
    }

    pub fn failure(item: &WorkItem, error: impl Into<String>) -> Self {
        Self {
            row: item.row,
            item_name: item.item_name.clone(),
            outcome: TaskOutcome::Failure {
                error: error.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, TaskOutcome::Success(_))
    }

    /// The produced file name, if the item succeeded.
    pub fn converted_name(&self) -> Option<&str> {
        match &self.outcome {
            TaskOutcome::Success(output) => Some(&output.converted_name),
            TaskOutcome::Failure { .. } => None,
        }
    }
}
