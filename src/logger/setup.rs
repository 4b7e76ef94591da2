//! Setup logging subsystem.

use std::io;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use super::config::{Log, LogFormat};
use crate::errors::ConfigurationError;

/// Installs the global subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over the configured level and filtering
/// directive. Fails if a global subscriber is already installed.
pub fn setup(config: &Log) -> Result<(), ConfigurationError> {
    if !config.console.enabled {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = config
            .console
            .filtering_directive
            .clone()
            .unwrap_or_else(|| config.console.level.into_level().as_str().to_lowercase());
        EnvFilter::new(directive)
    });

    let subscriber = tracing_subscriber::registry().with(filter);

    match config.console.log_format {
        LogFormat::Default => subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(io::stderr),
            )
            .try_init(),
        LogFormat::Json => subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(io::stderr),
            )
            .try_init(),
    }
    .map_err(|_| ConfigurationError::LoggerInitFailed)
}
