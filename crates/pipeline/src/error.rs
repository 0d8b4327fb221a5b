use std::path::PathBuf;

use relocale_openai::OpenAiApiError;

/// Failure of a single transform call.
///
/// Never escapes the pool: each one is recorded as that item's
/// [`TaskOutcome::Failure`](relocale_core::types::TaskOutcome::Failure).
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The remote API rejected the call or could not be reached.
    #[error(transparent)]
    Api(#[from] OpenAiApiError),

    /// A prompt template could not be loaded.
    #[error("Prompt template {path} unavailable: {source}")]
    Prompt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the source image or writing the output failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
