use std::path::PathBuf;
use std::time::Duration;

use relocale_core::error::CoreError;
use relocale_openai::api::DEFAULT_BASE_URL;
use relocale_pipeline::openai_transform::{DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL};
use relocale_pipeline::pool::DEFAULT_CAPACITY;
use relocale_pipeline::prompts::LanguagePair;

/// Batch configuration loaded from environment variables.
///
/// Everything except the API key has a default suitable for running
/// from the project directory.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub api_key: String,
    pub openai_base_url: String,
    pub chat_model: String,
    pub image_model: String,
    pub languages: LanguagePair,
    /// Maximum concurrent transform calls.
    pub concurrency: usize,
    /// Per-item timeout; `None` waits indefinitely.
    pub item_timeout: Option<Duration>,
    /// Directory scanned for the input dataset.
    pub dataset_dir: PathBuf,
    /// Directory holding the source images named in the dataset.
    pub images_dir: PathBuf,
    pub prompts_dir: PathBuf,
    /// Parent of the per-run output directories.
    pub converted_root: PathBuf,
    pub results_dir: PathBuf,
}

impl WorkerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var              | Default                     |
    /// |----------------------|-----------------------------|
    /// | `OPENAI_API_KEY`     | required                    |
    /// | `OPENAI_BASE_URL`    | `https://api.openai.com/v1` |
    /// | `CHAT_MODEL`         | `gpt-4.5-preview`           |
    /// | `IMAGE_MODEL`        | `gpt-image-1`               |
    /// | `SOURCE_LANGUAGE`    | `Slovenian`                 |
    /// | `TARGET_LANGUAGE`    | `Slovak`                    |
    /// | `WORKER_CONCURRENCY` | `4`                         |
    /// | `ITEM_TIMEOUT_SECS`  | unset (no timeout)          |
    /// | `DATASET_DIR`        | `./datasets`                |
    /// | `IMAGES_DIR`         | `./images`                  |
    /// | `PROMPTS_DIR`        | `./prompts`                 |
    /// | `CONVERTED_DIR`      | `./converted_images`        |
    /// | `RESULTS_DIR`        | `./results`                 |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| CoreError::Config("OPENAI_API_KEY must be set".to_string()))?;

        let concurrency = parse_var::<usize>("WORKER_CONCURRENCY", lookup("WORKER_CONCURRENCY"))?
            .unwrap_or(DEFAULT_CAPACITY);
        if concurrency == 0 {
            return Err(CoreError::Config(
                "WORKER_CONCURRENCY must be at least 1".to_string(),
            ));
        }

        let item_timeout = parse_var::<u64>("ITEM_TIMEOUT_SECS", lookup("ITEM_TIMEOUT_SECS"))?;
        if item_timeout == Some(0) {
            return Err(CoreError::Config(
                "ITEM_TIMEOUT_SECS must be at least 1 when set".to_string(),
            ));
        }
        let item_timeout = item_timeout.map(Duration::from_secs);

        let defaults = LanguagePair::default();

        Ok(Self {
            api_key,
            openai_base_url: var("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            chat_model: var("CHAT_MODEL", DEFAULT_CHAT_MODEL),
            image_model: var("IMAGE_MODEL", DEFAULT_IMAGE_MODEL),
            languages: LanguagePair {
                source: var("SOURCE_LANGUAGE", defaults.source.as_str()),
                target: var("TARGET_LANGUAGE", defaults.target.as_str()),
            },
            concurrency,
            item_timeout,
            dataset_dir: var("DATASET_DIR", "./datasets").into(),
            images_dir: var("IMAGES_DIR", "./images").into(),
            prompts_dir: var("PROMPTS_DIR", "./prompts").into(),
            converted_root: var("CONVERTED_DIR", "./converted_images").into(),
            results_dir: var("RESULTS_DIR", "./results").into(),
        })
    }
}

/// Parse an optional numeric variable.
fn parse_var<T: std::str::FromStr>(
    key: &str,
    value: Option<String>,
) -> Result<Option<T>, CoreError> {
    value
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|_| {
                CoreError::Config(format!("{key} must be a non-negative integer, got {raw:?}"))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<WorkerConfig, CoreError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        WorkerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_applied() {
        let config = load(&[("OPENAI_API_KEY", "sk-test")]).expect("config should load");
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.openai_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.chat_model, "gpt-4.5-preview");
        assert_eq!(config.image_model, "gpt-image-1");
        assert_eq!(config.languages.source, "Slovenian");
        assert_eq!(config.languages.target, "Slovak");
        assert_eq!(config.concurrency, 4);
        assert!(config.item_timeout.is_none());
        assert_eq!(config.dataset_dir, PathBuf::from("./datasets"));
        assert_eq!(config.results_dir, PathBuf::from("./results"));
    }

    #[test]
    fn overrides_applied() {
        let config = load(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("WORKER_CONCURRENCY", "12"),
            ("ITEM_TIMEOUT_SECS", "90"),
            ("TARGET_LANGUAGE", "Czech"),
            ("IMAGES_DIR", "/data/images"),
        ])
        .expect("config should load");
        assert_eq!(config.concurrency, 12);
        assert_eq!(config.item_timeout, Some(Duration::from_secs(90)));
        assert_eq!(config.languages.target, "Czech");
        assert_eq!(config.images_dir, PathBuf::from("/data/images"));
    }

    #[test]
    fn missing_api_key_rejected() {
        assert_matches!(load(&[]), Err(CoreError::Config(_)));
        assert_matches!(load(&[("OPENAI_API_KEY", "  ")]), Err(CoreError::Config(_)));
    }

    #[test]
    fn zero_concurrency_rejected() {
        let result = load(&[("OPENAI_API_KEY", "sk-test"), ("WORKER_CONCURRENCY", "0")]);
        assert_matches!(result, Err(CoreError::Config(_)));
    }

    #[test]
    fn zero_item_timeout_rejected() {
        let result = load(&[("OPENAI_API_KEY", "sk-test"), ("ITEM_TIMEOUT_SECS", "0")]);
        assert_matches!(result, Err(CoreError::Config(msg)) if msg.contains("ITEM_TIMEOUT_SECS"));
    }

    #[test]
    fn non_numeric_concurrency_rejected() {
        let result = load(&[("OPENAI_API_KEY", "sk-test"), ("WORKER_CONCURRENCY", "four")]);
        assert_matches!(result, Err(CoreError::Config(msg)) if msg.contains("WORKER_CONCURRENCY"));
    }
}
