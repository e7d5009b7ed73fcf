use blend_config::LogConfig;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::prelude::*;

pub const LOG_FILE_NAME: &str = "blend65.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create the log directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("tracing was already initialised: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over the configured filter.
///
/// With `log.dir` set, events go to `<dir>/blend65.log` through a background writer that
/// flushes for as long as the returned guard is alive. Otherwise they go to stderr.
pub fn init_tracing(config: &LogConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)?,
    };

    let layer = fmt::layer()
        .with_timer(ChronoUtc::rfc_3339())
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    let Some(log_dir) = &config.dir else {
        tracing_subscriber::registry()
            .with(layer.with_writer(std::io::stderr))
            .with(filter)
            .try_init()?;
        return Ok(None);
    };

    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(layer.with_writer(non_blocking))
        .with(filter)
        .try_init()?;

    tracing::info!(dir = %log_dir.display(), "blend65 logging started");
    Ok(Some(guard))
}
