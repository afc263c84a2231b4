use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when RUST_LOG is not set
const DEFAULT_FILTER: &str = "nginx_mesh_config=info";

/// Initialize logging
///
/// Human-readable logs go to stderr so stdout stays free for command output.
/// When `log_file` is given, JSON lines are appended to it as well.
///
/// The log level can be controlled via the RUST_LOG environment variable:
/// - RUST_LOG=nginx_mesh_config=debug nginx-mesh-config resolve
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// for the lifetime of the process.
pub fn init(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let Some(log_file) = log_file else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .try_init()
            .context("Failed to initialize tracing subscriber")?;
        return Ok(None);
    };

    let log_dir = log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .context("Log file path has no file name")?;

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_line_number(true),
        )
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::debug!("Logging to {}", log_file.display());

    Ok(Some(guard))
}
