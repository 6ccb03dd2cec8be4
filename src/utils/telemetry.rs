// src/utils/telemetry.rs
use tracing_subscriber::EnvFilter;

use crate::utils::{
    config::LoggingConfig,
    error::{Result, ServiceError},
};

pub const LOG_FILE_PREFIX: &str = "savestate.log";

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. With
/// `logging.directory` set, output goes to a daily rolling file there.
/// Fails if a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(&config.level)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_level(true)
        .with_file(true)
        .with_line_number(true);

    let installed = match &config.directory {
        Some(directory) => builder
            .with_ansi(false)
            .with_writer(tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX))
            .try_init(),
        None => builder.try_init(),
    };

    installed.map_err(|e| ServiceError::Logging(e.to_string()))
}

fn env_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| ServiceError::Logging(format!("invalid log level {level:?}: {e}")))
}
