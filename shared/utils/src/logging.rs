use anyhow::{Context, Result};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match (config.format.as_str(), &config.file_path) {
        ("json", Some(path)) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(open_log_file(path)?),
            )
            .init(),
        ("json", None) => registry
            .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE))
            .init(),
        (_, Some(path)) => registry
            .with(
                fmt::layer()
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(open_log_file(path)?),
            )
            .init(),
        (_, None) => registry
            .with(fmt::layer().with_span_events(FmtSpan::CLOSE))
            .init(),
    }

    tracing::info!("Logging initialized with level: {}", config.level);
    Ok(())
}

fn open_log_file(path: &str) -> Result<std::fs::File> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {path}"))
}
