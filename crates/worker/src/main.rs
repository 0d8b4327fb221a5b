//! `relocale-worker` -- batch image localization.
//!
//! Picks the newest dataset in `DATASET_DIR`, regenerates every listed
//! image with its translated text, translates the file names, and writes
//! an updated dataset to `RESULTS_DIR`. See [`WorkerConfig::from_env`]
//! for all environment variables.

use relocale_worker::config::WorkerConfig;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "relocale_worker=info,relocale_pipeline=info,relocale_dataset=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkerConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    let started_at = chrono::Utc::now();
    match relocale_worker::run(&config, started_at).await {
        Ok(summary) => {
            tracing::info!(
                total = summary.total,
                succeeded = summary.succeeded,
                failed = summary.failed,
                "Batch run finished",
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Batch run aborted");
            std::process::exit(1);
        }
    }
}
