//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout carries only envelopes.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::LogFormat;
use crate::error::CliError;

const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber.
///
/// An explicit `level` wins over `RUST_LOG`; with neither, only warnings are
/// shown.
pub fn init_logging(level: Option<&str>, format: LogFormat) -> Result<(), CliError> {
    let env_filter = match level {
        Some(directive) => EnvFilter::try_new(directive)
            .map_err(|error| CliError::Command(format!("invalid log filter '{directive}': {error}")))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    installed.map_err(|error| CliError::Command(format!("cannot install logger: {error}")))
}
