//! Tracing subscriber wiring for the sipd binary.

use axum::BoxError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Installs the global subscriber: env-filtered (default `info`), fmt output.
pub fn init_subscribers() -> Result<(), BoxError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}
