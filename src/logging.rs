//! Subscriber setup for applications that want the executor spans printed.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter};

/// Install a fmt subscriber filtered by `RUST_LOG`, or by `entity_service=<log_level>`
/// when `RUST_LOG` is unset
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_tracing(log_level: &str) -> Result<(), TryInitError> {
    let env_filter = format!("entity_service={log_level}");

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter)))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
