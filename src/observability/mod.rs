//! Logging setup
//!
//! Filter comes from `RUST_LOG` (default `info`). Output is human-readable
//! unless JSON lines are requested.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{CliError, CliResult};

/// Installs the global tracing subscriber.
pub fn init_tracing(json: bool) -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let result = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|e| CliError::boot_failed(format!("failed to initialize logging: {}", e)))
}
