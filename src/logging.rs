//! Tracing setup and timing helpers.

use std::fmt::Display;
use std::future::Future;
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "superego=info";

/// Install a stderr fmt subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run `fut`, logging its start, elapsed time and outcome under `label`.
pub async fn log_execution<T, E, F>(label: &str, fut: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    let started = Instant::now();
    debug!("{} started", label);

    let result = fut.await;
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => info!(elapsed_ms, "{} completed", label),
        Err(e) => warn!(elapsed_ms, error = %e, "{} failed", label),
    }
    result
}
