//! `relocale-worker` library crate.
//!
//! Holds the configuration loader and the wiring of one batch run. The
//! binary entrypoint lives in `main.rs`.

pub mod config;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use relocale_core::error::CoreError;
use relocale_core::naming::{results_file_name, run_directory_name};
use relocale_dataset::{latest_dataset, DatasetResultSink, DatasetTaskSource};
use relocale_openai::OpenAiApi;
use relocale_pipeline::openai_transform::{OpenAiTransform, TransformSettings};
use relocale_pipeline::{run_batch, PoolConfig, RunSummary, WorkerPool};

use crate::config::WorkerConfig;

/// File system locations used by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    /// The dataset being processed.
    pub dataset: PathBuf,
    /// This run's image directory, created on first write.
    pub converted_dir: PathBuf,
    /// Updated dataset written at the end of the run.
    pub results_file: PathBuf,
}

impl RunPaths {
    /// Resolve the paths of a run started at `started_at`.
    pub fn resolve(config: &WorkerConfig, started_at: DateTime<Utc>) -> Result<Self, CoreError> {
        let dataset = latest_dataset(&config.dataset_dir)?;
        let dataset_name = dataset
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                CoreError::DataUnavailable(format!(
                    "Dataset path {} has no valid file name",
                    dataset.display()
                ))
            })?
            .to_string();

        Ok(Self {
            converted_dir: config
                .converted_root
                .join(run_directory_name(started_at)),
            results_file: config.results_dir.join(results_file_name(&dataset_name)),
            dataset,
        })
    }
}

/// Execute one batch run against the OpenAI API.
///
/// The run's output directory is created when the first image is
/// written. A run that aborts while loading creates no directories.
pub async fn run(
    config: &WorkerConfig,
    started_at: DateTime<Utc>,
) -> Result<RunSummary, CoreError> {
    let paths = RunPaths::resolve(config, started_at)?;

    tracing::info!(
        dataset = %paths.dataset.display(),
        converted_dir = %paths.converted_dir.display(),
        results_file = %paths.results_file.display(),
        concurrency = config.concurrency,
        "Starting batch run",
    );

    let api = OpenAiApi::new(config.api_key.clone(), config.openai_base_url.clone());
    let transform = OpenAiTransform::new(
        api,
        TransformSettings {
            chat_model: config.chat_model.clone(),
            image_model: config.image_model.clone(),
            languages: config.languages.clone(),
            prompts_dir: config.prompts_dir.clone(),
            converted_dir: paths.converted_dir.clone(),
        },
    );
    let pool = WorkerPool::new(
        Arc::new(transform),
        PoolConfig {
            capacity: config.concurrency,
            item_timeout: config.item_timeout,
        },
    )?;

    let source = DatasetTaskSource::new(&paths.dataset, &config.images_dir);
    let sink = DatasetResultSink::new(&paths.dataset, &paths.results_file);

    run_batch(&source, &pool, &sink).await
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use super::*;

    fn config(root: &Path) -> WorkerConfig {
        WorkerConfig::from_lookup(|key| match key {
            "OPENAI_API_KEY" => Some("sk-test".to_string()),
            "DATASET_DIR" => Some(root.join("datasets").display().to_string()),
            "CONVERTED_DIR" => Some(root.join("converted").display().to_string()),
            "RESULTS_DIR" => Some(root.join("results").display().to_string()),
            _ => None,
        })
        .expect("config should load")
    }

    #[test]
    fn run_paths_follow_naming_conventions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let datasets = dir.path().join("datasets");
        std::fs::create_dir_all(&datasets).expect("mkdir");
        std::fs::write(datasets.join("a.csv"), "x,y,z\n").expect("write");
        std::fs::write(datasets.join("b.csv"), "x,y,z\n").expect("write");

        let started = Utc.with_ymd_and_hms(2025, 4, 1, 12, 30, 0).unwrap();
        let paths = RunPaths::resolve(&config(dir.path()), started).expect("paths");

        assert_eq!(paths.dataset, datasets.join("b.csv"));
        assert_eq!(
            paths.converted_dir,
            dir.path().join("converted").join("2025-04-01_12-30-00")
        );
        assert_eq!(
            paths.results_file,
            dir.path().join("results").join("updated_results_b.csv")
        );
    }

    #[tokio::test]
    async fn malformed_dataset_leaves_no_output_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let datasets = dir.path().join("datasets");
        std::fs::create_dir_all(&datasets).expect("mkdir");
        std::fs::write(datasets.join("captions.csv"), "izhod.png,Izhod\n").expect("write");

        let result = run(&config(dir.path()), Utc::now()).await;

        assert_matches!(result, Err(CoreError::DataUnavailable(_)));
        assert!(!dir.path().join("converted").exists());
        assert!(!dir.path().join("results").exists());
    }

    #[tokio::test]
    async fn run_without_dataset_is_data_unavailable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = run(&config(dir.path()), Utc::now()).await;
        assert_matches!(result, Err(CoreError::DataUnavailable(_)));
    }
}
