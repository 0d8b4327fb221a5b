/// Run-level errors.
///
/// Per-item failures never surface here; they are captured as
/// [`TaskOutcome::Failure`](crate::types::TaskOutcome::Failure) values.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
