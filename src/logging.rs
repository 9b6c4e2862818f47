//! Logging initialization and configuration.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "session_tracker=info";

fn filter_from(level: Option<&str>) -> EnvFilter {
    match level {
        // A bare level applies to this crate and the request trace layer.
        Some(level) if !level.contains('=') && !level.contains(',') => {
            EnvFilter::new(format!("session_tracker={level},tower_http={level}"))
        }
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// Initialize the logging system with an explicit filter.
///
/// `level` is either a plain level (`debug`) or a full `EnvFilter`
/// directive string (`session_tracker=debug,tower_http=info`).
pub fn init_with(level: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(filter_from(Some(level)))
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
}

/// Try to initialize the logging system from `RUST_LOG`, defaulting to
/// `session_tracker=info`.
///
/// Returns `Ok(())` if successful, or `Err` if logging has already been
/// initialized.
pub fn try_init() -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(filter_from(None))
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
}
