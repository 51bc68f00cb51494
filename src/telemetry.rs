//! Tracing subscriber setup.

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

use crate::config::{Environment, LogFormat};

/// Filter applied when `RUST_LOG` is unset or unparsable.
#[must_use]
pub const fn default_filter(environment: Environment) -> &'static str {
    match environment {
        Environment::Development => "info,tasktrack=debug,tower_http=debug",
        Environment::Production | Environment::Test => "info",
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the environment-specific default filter.
///
/// # Errors
///
/// Returns [`TryInitError`] when a global subscriber is already installed.
pub fn init_tracing(environment: Environment, format: LogFormat) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(environment)));

    let (json, pretty) = match format {
        LogFormat::Json => (Some(fmt::layer().json().with_current_span(true)), None),
        LogFormat::Pretty => (None, Some(fmt::layer().with_target(true))),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .try_init()
}
