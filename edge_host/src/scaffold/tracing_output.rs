use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_appender::{non_blocking::WorkerGuard, rolling::Rotation};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

pub fn setup(output_dir: &str, filter: &str) -> Result<WorkerGuard> {
    let file_rolling = tracing_appender::rolling::Builder::new()
        .filename_prefix("host")
        .filename_suffix("log")
        .rotation(Rotation::DAILY)
        .max_log_files(7)
        .build(output_dir)
        .context("create tracing file rolling output")?;

    let (file_rolling, guard) = tracing_appender::non_blocking(file_rolling);

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .parse_lossy(filter);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter.clone()))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(file_rolling)
                .with_filter(env_filter),
        )
        .try_init()
        .context("setup tracing output")?;

    Ok(guard)
}
